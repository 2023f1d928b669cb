use anyhow::Context;
use book_kernel::settings::Settings;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let settings = Settings::load().context("failed to load settings")?;
    book_telemetry::init(&settings.telemetry)?;

    book_app::bootstrap::serve(settings).await
}
