use crate::cli::Console;
use crate::db::Store;

use super::report_store_error;

pub async fn cmd_init_db(
    store: &Store,
    console: &mut dyn Console,
    assume_yes: bool,
) -> anyhow::Result<()> {
    if !assume_yes && !console.confirm("Initialize the database?")? {
        console.line("Cancelled.");
        return Ok(());
    }

    match store.initialize_schema().await {
        Ok(()) => console.success("Database initialized successfully."),
        Err(e) => report_store_error(console, "initialize the database", &e),
    }

    Ok(())
}
