//! Menu-driven interactive mode.

use std::io;

use super::commands::{
    cmd_add_anime, cmd_add_to_watchlist, cmd_add_user, cmd_init_db, cmd_show_watchlist,
    report_store_error,
};
use super::Console;
use crate::clients::CatalogSource;
use crate::db::Store;
use crate::domain::{AnimeId, ReleaseId, UserId, WatchlistId};
use crate::models::{
    Anime, AnimePatch, NewAnime, NewRelease, PatchError, Release, ReleasePatch, UserPatch,
    WatchlistPatch,
};

/// Runs the main menu until the user quits or input is closed.
pub async fn run_interactive(
    store: &Store,
    catalog: &dyn CatalogSource,
    console: &mut dyn Console,
) -> anyhow::Result<()> {
    match main_menu(store, catalog, console).await {
        Err(e) if is_closed_input(&e) => {
            console.line("");
            Ok(())
        }
        other => other,
    }
}

fn is_closed_input(err: &anyhow::Error) -> bool {
    err.downcast_ref::<io::Error>()
        .is_some_and(|e| e.kind() == io::ErrorKind::UnexpectedEof)
}

fn show_menu(console: &mut dyn Console, title: &str, options: &[(&str, &str)]) {
    console.line("");
    console.heading(title);
    for (key, label) in options {
        console.line(&format!("[{key}] {label}"));
    }
}

async fn main_menu(
    store: &Store,
    catalog: &dyn CatalogSource,
    console: &mut dyn Console,
) -> anyhow::Result<()> {
    loop {
        show_menu(
            console,
            "What would you like to do?",
            &[
                ("1", "Initialize database"),
                ("2", "Manage users"),
                ("3", "Manage anime"),
                ("4", "Manage watchlist"),
                ("5", "Manage releases"),
                ("q", "Quit"),
            ],
        );

        match console.read_line("Enter your choice")?.as_str() {
            "q" => return Ok(()),
            "1" => cmd_init_db(store, console, false).await?,
            "2" => user_menu(store, console).await?,
            "3" => anime_menu(store, catalog, console).await?,
            "4" => watchlist_menu(store, console).await?,
            "5" => release_menu(store, console).await?,
            _ => console.failure("Invalid choice."),
        }
    }
}

async fn user_menu(store: &Store, console: &mut dyn Console) -> anyhow::Result<()> {
    loop {
        show_menu(
            console,
            "User Management",
            &[
                ("1", "Add new user"),
                ("2", "View user"),
                ("3", "Update user"),
                ("4", "Delete user"),
                ("5", "List users"),
                ("b", "Back"),
            ],
        );

        match console.read_line("Enter your choice")?.as_str() {
            "b" => return Ok(()),
            "1" => cmd_add_user(store, console, None).await?,
            "2" => {
                let id = UserId::new(console.prompt_int("Enter user ID", None)?);
                match store.get_user(id).await {
                    Ok(user) => console.success(&format!(
                        "User found: ID {} | MAL user {}",
                        user.id, user.external_id
                    )),
                    Err(e) => report_store_error(console, "load user", &e),
                }
            }
            "3" => {
                let id = UserId::new(console.prompt_int("Enter user ID", None)?);
                let external_id = console.prompt_text("Enter new MAL user ID")?;
                match store
                    .update_user(id, UserPatch::default().external_id(external_id))
                    .await
                {
                    Ok(_) => console.success("User updated successfully!"),
                    Err(e) => report_store_error(console, "update user", &e),
                }
            }
            "4" => {
                let id = UserId::new(console.prompt_int("Enter user ID", None)?);
                if console.confirm(&format!("Delete user {id} and their watchlist?"))? {
                    match store.delete_user(id).await {
                        Ok(true) => console.success("User deleted."),
                        Ok(false) => console.warning(&format!("No user with ID {id}.")),
                        Err(e) => report_store_error(console, "delete user", &e),
                    }
                }
            }
            "5" => match store.list_users().await {
                Ok(users) if users.is_empty() => console.line("No users yet."),
                Ok(users) => {
                    for user in users {
                        console.line(&format!("[{}] {}", user.id, user.external_id));
                    }
                }
                Err(e) => report_store_error(console, "list users", &e),
            },
            _ => console.failure("Invalid choice."),
        }
    }
}

fn show_anime(console: &mut dyn Console, anime: &Anime) {
    console.field("id", &anime.id.to_string());
    for (name, value) in NewAnime::from(anime.clone()).fields() {
        console.field(name, &value);
    }
}

/// Collects `field = value` assignments until an empty field name.
fn collect_assignments(
    console: &mut dyn Console,
    fields: &[&str],
    mut assign: impl FnMut(&str, &str) -> Result<(), PatchError>,
) -> io::Result<()> {
    console.line(&format!("Updatable fields: {}", fields.join(", ")));
    loop {
        let field = console.read_line("Field to update (empty to finish)")?;
        if field.is_empty() {
            return Ok(());
        }
        let value = console.read_line(&format!("New value for {field}"))?;
        if let Err(e) = assign(&field, &value) {
            console.failure(&e.to_string());
        }
    }
}

async fn anime_menu(
    store: &Store,
    catalog: &dyn CatalogSource,
    console: &mut dyn Console,
) -> anyhow::Result<()> {
    loop {
        show_menu(
            console,
            "Anime Management",
            &[
                ("1", "Add anime by MAL ID"),
                ("2", "View anime"),
                ("3", "Update anime"),
                ("4", "Delete anime"),
                ("5", "List anime"),
                ("b", "Back"),
            ],
        );

        match console.read_line("Enter your choice")?.as_str() {
            "b" => return Ok(()),
            "1" => cmd_add_anime(store, catalog, console, None).await?,
            "2" => {
                let id = AnimeId::new(console.prompt_int("Enter anime ID", None)?);
                match store.get_anime(id).await {
                    Ok(anime) => show_anime(console, &anime),
                    Err(e) => report_store_error(console, "load anime", &e),
                }
            }
            "3" => {
                let id = AnimeId::new(console.prompt_int("Enter anime ID", None)?);
                let mut patch = AnimePatch::default();
                collect_assignments(console, AnimePatch::FIELDS, |f, v| patch.assign(f, v))?;
                match store.update_anime(id, patch).await {
                    Ok(anime) => {
                        console.success("Anime updated successfully!");
                        show_anime(console, &anime);
                    }
                    Err(e) => report_store_error(console, "update anime", &e),
                }
            }
            "4" => {
                let id = AnimeId::new(console.prompt_int("Enter anime ID", None)?);
                if console.confirm(&format!(
                    "Delete anime {id} with its watchlist entries and releases?"
                ))? {
                    match store.delete_anime(id).await {
                        Ok(true) => console.success("Anime deleted."),
                        Ok(false) => console.warning(&format!("No anime with ID {id}.")),
                        Err(e) => report_store_error(console, "delete anime", &e),
                    }
                }
            }
            "5" => match store.list_anime().await {
                Ok(list) if list.is_empty() => console.line("No anime stored yet."),
                Ok(list) => {
                    for anime in list {
                        console.line(&format!(
                            "[{}] {} (MAL {}) - {}",
                            anime.id, anime.title, anime.external_id, anime.status
                        ));
                    }
                }
                Err(e) => report_store_error(console, "list anime", &e),
            },
            _ => console.failure("Invalid choice."),
        }
    }
}

async fn watchlist_menu(store: &Store, console: &mut dyn Console) -> anyhow::Result<()> {
    loop {
        show_menu(
            console,
            "Watchlist Management",
            &[
                ("1", "Add anime to watchlist"),
                ("2", "View watchlist"),
                ("3", "Update watched episodes"),
                ("4", "Remove from watchlist"),
                ("b", "Back"),
            ],
        );

        match console.read_line("Enter your choice")?.as_str() {
            "b" => return Ok(()),
            "1" => cmd_add_to_watchlist(store, console, None, None, None).await?,
            "2" => cmd_show_watchlist(store, console, None).await?,
            "3" => {
                let id = WatchlistId::new(console.prompt_int("Enter watchlist entry ID", None)?);
                let episode = console.prompt_int("Last watched episode", None)?;
                match store
                    .update_watchlist_entry(id, WatchlistPatch::default().last_watched_episode(episode))
                    .await
                {
                    Ok(entry) => console.success(&format!(
                        "Watchlist entry {} now at episode {}.",
                        entry.id, entry.last_watched_episode
                    )),
                    Err(e) => report_store_error(console, "update watchlist", &e),
                }
            }
            "4" => {
                let id = WatchlistId::new(console.prompt_int("Enter watchlist entry ID", None)?);
                match store.delete_watchlist_entry(id).await {
                    Ok(true) => console.success("Removed from watchlist."),
                    Ok(false) => console.warning(&format!("No watchlist entry with ID {id}.")),
                    Err(e) => report_store_error(console, "remove from watchlist", &e),
                }
            }
            _ => console.failure("Invalid choice."),
        }
    }
}

fn show_release(console: &mut dyn Console, release: &Release) {
    console.line(&format!(
        "[{}] anime {} episode {} on {} ({})",
        release.id,
        release.anime_id,
        release.episode_number,
        release.release_date,
        release.broadcast_slot
    ));
}

async fn release_menu(store: &Store, console: &mut dyn Console) -> anyhow::Result<()> {
    loop {
        show_menu(
            console,
            "Release Management",
            &[
                ("1", "Add new release"),
                ("2", "View release"),
                ("3", "Update release"),
                ("4", "Delete release"),
                ("5", "List releases for anime"),
                ("b", "Back"),
            ],
        );

        match console.read_line("Enter your choice")?.as_str() {
            "b" => return Ok(()),
            "1" => {
                let release = NewRelease {
                    anime_id: AnimeId::new(console.prompt_int("Enter anime ID", None)?),
                    episode_number: console.prompt_int("Episode number", None)?,
                    release_date: console.prompt_text("Release date (YYYY-MM-DD)")?,
                    broadcast_slot: console.prompt_text("Broadcast time")?,
                };
                match store.create_release(&release).await {
                    Ok(release) => {
                        console.success("Release added successfully!");
                        show_release(console, &release);
                    }
                    Err(e) => report_store_error(console, "add release", &e),
                }
            }
            "2" => {
                let id = ReleaseId::new(console.prompt_int("Enter release ID", None)?);
                match store.get_release(id).await {
                    Ok(release) => show_release(console, &release),
                    Err(e) => report_store_error(console, "load release", &e),
                }
            }
            "3" => {
                let id = ReleaseId::new(console.prompt_int("Enter release ID", None)?);
                let mut patch = ReleasePatch::default();
                collect_assignments(console, ReleasePatch::FIELDS, |f, v| patch.assign(f, v))?;
                match store.update_release(id, patch).await {
                    Ok(release) => {
                        console.success("Release updated successfully!");
                        show_release(console, &release);
                    }
                    Err(e) => report_store_error(console, "update release", &e),
                }
            }
            "4" => {
                let id = ReleaseId::new(console.prompt_int("Enter release ID", None)?);
                match store.delete_release(id).await {
                    Ok(true) => console.success("Release deleted."),
                    Ok(false) => console.warning(&format!("No release with ID {id}.")),
                    Err(e) => report_store_error(console, "delete release", &e),
                }
            }
            "5" => {
                let anime_id = AnimeId::new(console.prompt_int("Enter anime ID", None)?);
                match store.list_releases(anime_id).await {
                    Ok(releases) if releases.is_empty() => {
                        console.line(&format!("No releases for anime {anime_id}."));
                    }
                    Ok(releases) => {
                        for release in &releases {
                            show_release(console, release);
                        }
                    }
                    Err(e) => report_store_error(console, "list releases", &e),
                }
            }
            _ => console.failure("Invalid choice."),
        }
    }
}
