use anyhow::Context;
use clap::{Parser, Subcommand};

use book_kernel::settings::Settings;

/// Book catalogue service.
#[derive(Debug, Parser)]
#[command(name = "book-cli", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Apply migrations and serve the HTTP API until shutdown
    Serve,
    /// Apply pending migrations and exit
    Migrate,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let settings = Settings::load().context("failed to load settings")?;
    book_telemetry::init(&settings.telemetry)?;

    match cli.command {
        Command::Serve => book_app::bootstrap::serve(settings).await,
        Command::Migrate => {
            let applied = book_app::bootstrap::migrate(&settings).await?;
            tracing::info!(applied, "migrate finished");
            println!("applied {applied} migration(s)");
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_subcommands() {
        let cli = Cli::try_parse_from(["book-cli", "migrate"]).unwrap();
        assert!(matches!(cli.command, Command::Migrate));

        assert!(Cli::try_parse_from(["book-cli"]).is_err());
    }
}
