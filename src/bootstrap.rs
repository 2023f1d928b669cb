//! Process lifecycle: connect, migrate, serve, shut down.

use anyhow::Context;

use book_db::Database;
use book_kernel::{settings::Settings, InitCtx, ModuleRegistry};

use crate::modules;

/// Connect to the database and build the module registry.
pub async fn assemble(settings: &Settings) -> anyhow::Result<(Database, ModuleRegistry)> {
    let database = Database::connect(&settings.database).await?;

    let mut registry = ModuleRegistry::new();
    modules::register_all(&mut registry, &database, settings)
        .context("failed to register modules")?;
    tracing::info!(modules = registry.module_count(), "modules registered");

    Ok((database, registry))
}

/// Apply every pending module migration, returning how many ran.
pub async fn apply_migrations(database: &Database, registry: &ModuleRegistry) -> anyhow::Result<usize> {
    let applied = database
        .migrate(&registry.collect_migrations())
        .await
        .context("failed to apply migrations")?;
    tracing::info!(applied, "migrations complete");
    Ok(applied)
}

/// Run the service until a shutdown signal arrives.
pub async fn serve(settings: Settings) -> anyhow::Result<()> {
    tracing::info!(
        env = ?settings.environment,
        db = %settings.database.url,
        "book-app bootstrap starting"
    );

    let (database, registry) = assemble(&settings).await?;
    let ctx = InitCtx {
        settings: &settings,
    };

    registry.init_modules(&ctx).await?;
    apply_migrations(&database, &registry).await?;
    registry.start_modules(&ctx).await?;

    let served = book_http::start_server(&registry, &settings).await;

    if let Err(err) = registry.stop_modules().await {
        tracing::error!(error = %err, "failed to stop modules cleanly");
    }
    database.close().await;

    served
}

/// Connect and apply pending migrations without serving.
pub async fn migrate(settings: &Settings) -> anyhow::Result<usize> {
    let (database, registry) = assemble(settings).await?;
    let applied = apply_migrations(&database, &registry).await;
    database.close().await;
    applied
}
