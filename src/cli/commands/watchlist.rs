use crate::cli::Console;
use crate::db::Store;
use crate::domain::UserId;

use super::report_store_error;

pub async fn cmd_show_watchlist(
    store: &Store,
    console: &mut dyn Console,
    user_id: Option<i32>,
) -> anyhow::Result<()> {
    let user_id = match user_id {
        Some(id) => UserId::new(id),
        None => UserId::new(console.prompt_int("Enter user ID", None)?),
    };

    let entries = match store.list_watchlist(user_id).await {
        Ok(entries) => entries,
        Err(e) => {
            report_store_error(console, "load watchlist", &e);
            return Ok(());
        }
    };

    if entries.is_empty() {
        console.line(&format!("User {user_id} has no anime on their watchlist."));
        return Ok(());
    }

    console.heading(&format!("Watchlist for user {user_id} ({} total)", entries.len()));

    for entry in entries {
        let (title, total) = match store.get_anime(entry.anime_id).await {
            Ok(anime) => (
                anime.title,
                anime
                    .episode_count
                    .map_or_else(|| "?".to_string(), |n| n.to_string()),
            ),
            Err(e) if e.is_not_found() => ("<missing anime>".to_string(), "?".to_string()),
            Err(e) => return Err(e.into()),
        };

        console.line(&format!(
            "[{}] {} - {}/{} watched (anime ID: {}, added {})",
            entry.id, title, entry.last_watched_episode, total, entry.anime_id, entry.added_on
        ));
    }

    Ok(())
}
