mod add_anime;
mod add_to_watchlist;
mod add_user;
mod init_db;
mod notify_due;
mod watchlist;

use super::Console;
use crate::db::StoreError;

pub use add_anime::cmd_add_anime;
pub use add_to_watchlist::cmd_add_to_watchlist;
pub use add_user::cmd_add_user;
pub use init_db::cmd_init_db;
pub use notify_due::cmd_notify_due;
pub use watchlist::cmd_show_watchlist;

/// Renders a failed store call as a single status line.
pub(crate) fn report_store_error(console: &mut dyn Console, action: &str, err: &StoreError) {
    match err {
        StoreError::NotFound { .. } => console.failure(&format!("{err}.")),
        StoreError::ConstraintViolation(_) => {
            console.failure(&format!("Failed to {action}: it conflicts with an existing record."));
        }
        StoreError::EmptyUpdate => console.failure("Nothing to update."),
        StoreError::Storage(_) => console.failure(&format!("Failed to {action}: {err}")),
    }
}
