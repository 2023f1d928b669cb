pub mod books;

use book_db::Database;
use book_kernel::{settings::Settings, ModuleRegistry};

/// Register every application module with the registry
pub fn register_all(
    registry: &mut ModuleRegistry,
    database: &Database,
    settings: &Settings,
) -> anyhow::Result<()> {
    registry.register(books::create_module(database, settings)?);
    Ok(())
}
