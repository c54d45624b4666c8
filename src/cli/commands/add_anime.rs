use crate::cli::Console;
use crate::clients::CatalogSource;
use crate::db::{Store, StoreError};
use crate::domain::UserId;
use crate::models::NewWatchlistEntry;

use super::report_store_error;

/// Fetches an anime from the catalog, stores it after confirmation and
/// optionally links it into a user's watchlist.
pub async fn cmd_add_anime(
    store: &Store,
    catalog: &dyn CatalogSource,
    console: &mut dyn Console,
    mal_id: Option<i32>,
) -> anyhow::Result<()> {
    let mal_id = match mal_id {
        Some(id) => id,
        None => console.prompt_int("Enter MAL ID", None)?,
    };

    let info = match catalog.fetch_anime(mal_id).await {
        Ok(info) => info,
        Err(e) => {
            console.failure(&format!("Error fetching anime info: {e}"));
            return Ok(());
        }
    };

    console.line("");
    console.heading("Fetched Anime Information:");
    for (name, value) in info.fields() {
        console.field(name, &value);
    }

    if !console.confirm("Add this anime to database?")? {
        console.line("Cancelled.");
        return Ok(());
    }

    let anime = match store.create_anime(&info).await {
        Ok(anime) => {
            console.success("Anime added successfully!");
            anime
        }
        Err(StoreError::ConstraintViolation(_)) => {
            console.warning(&format!(
                "Anime with MAL ID {mal_id} is already in the database."
            ));
            match store.find_anime_by_external_id(mal_id).await {
                Ok(anime) => anime,
                Err(e) => {
                    report_store_error(console, "load anime", &e);
                    return Ok(());
                }
            }
        }
        Err(e) => {
            report_store_error(console, "add anime", &e);
            return Ok(());
        }
    };

    if !console.confirm("Would you like to add this anime to your watchlist?")? {
        return Ok(());
    }

    let user_id = console.prompt_int("Enter your user ID", None)?;
    let last_watched = console.prompt_int("How many episodes have you watched?", Some(0))?;

    let entry =
        NewWatchlistEntry::new(UserId::new(user_id), anime.id).last_watched_episode(last_watched);

    match store.add_to_watchlist(&entry).await {
        Ok(_) => console.success("Added to watchlist!"),
        Err(e) => report_store_error(console, "add to watchlist", &e),
    }

    Ok(())
}
