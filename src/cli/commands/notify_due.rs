use anyhow::Context;
use chrono::NaiveDate;

use crate::cli::Console;
use crate::db::Store;
use crate::domain::UserId;
use crate::notifications::Notifier;
use crate::services::notify_due_releases;

use super::report_store_error;

pub async fn cmd_notify_due(
    store: &Store,
    notifier: &dyn Notifier,
    console: &mut dyn Console,
    user_id: Option<i32>,
    date: Option<String>,
) -> anyhow::Result<()> {
    let user_id = match user_id {
        Some(id) => UserId::new(id),
        None => UserId::new(console.prompt_int("Enter user ID", None)?),
    };

    let date = match date {
        Some(d) => NaiveDate::parse_from_str(d.trim(), "%Y-%m-%d")
            .with_context(|| format!("Invalid date '{d}', expected YYYY-MM-DD"))?,
        None => chrono::Local::now().date_naive(),
    };
    let date = date.format("%Y-%m-%d").to_string();

    let due = match notify_due_releases(store, notifier, user_id, &date).await {
        Ok(due) => due,
        Err(e) => {
            report_store_error(console, "check releases", &e);
            return Ok(());
        }
    };

    if due.is_empty() {
        console.line(&format!("No new episodes for user {user_id} on {date}."));
        return Ok(());
    }

    for item in due {
        let text = format!(
            "{} - Episode {} ({})",
            item.anime.title, item.release.episode_number, item.release.broadcast_slot
        );
        if item.delivered {
            console.success(&format!("Notified: {text}"));
        } else {
            console.warning(&format!("Could not send notification: {text}"));
        }
    }

    Ok(())
}
