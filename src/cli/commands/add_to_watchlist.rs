use crate::cli::Console;
use crate::db::Store;
use crate::domain::{AnimeId, UserId};
use crate::models::NewWatchlistEntry;

use super::report_store_error;

pub async fn cmd_add_to_watchlist(
    store: &Store,
    console: &mut dyn Console,
    user_id: Option<i32>,
    anime_id: Option<i32>,
    last_watched_episode: Option<i32>,
) -> anyhow::Result<()> {
    let user_id = match user_id {
        Some(id) => id,
        None => console.prompt_int("Enter user ID", None)?,
    };
    let anime_id = match anime_id {
        Some(id) => id,
        None => console.prompt_int("Enter anime ID", None)?,
    };
    let last_watched_episode = match last_watched_episode {
        Some(ep) => ep,
        None => console.prompt_int("Last watched episode", Some(0))?,
    };

    let entry = NewWatchlistEntry::new(UserId::new(user_id), AnimeId::new(anime_id))
        .last_watched_episode(last_watched_episode);

    match store.add_to_watchlist(&entry).await {
        Ok(_) => console.success(&format!(
            "Anime ID {anime_id} added to user ID {user_id} watchlist."
        )),
        Err(e) => report_store_error(console, "add to watchlist", &e),
    }

    Ok(())
}
