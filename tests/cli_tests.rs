//! Command flows driven through a scripted console.

use std::sync::atomic::{AtomicBool, Ordering};

use anitrack::cli::{
    BufferedConsole, Style, cmd_add_anime, cmd_add_to_watchlist, cmd_add_user, cmd_init_db,
    cmd_notify_due, cmd_show_watchlist, run_interactive,
};
use anitrack::clients::{CatalogError, CatalogSource};
use anitrack::db::Store;
use anitrack::domain::AnimeId;
use anitrack::models::{NewAnime, NewRelease, NewUser, NewWatchlistEntry};
use anitrack::notifications::{Notifier, ReleaseNotification};
use async_trait::async_trait;

struct StubCatalog;

#[async_trait]
impl CatalogSource for StubCatalog {
    async fn fetch_anime(&self, mal_id: i32) -> Result<NewAnime, CatalogError> {
        match mal_id {
            1 => Ok(NewAnime {
                external_id: 1,
                title: "Cowboy Bebop".to_string(),
                synopsis: Some("Space bounty hunters.".to_string()),
                episode_count: Some(26),
                status: "Finished Airing".to_string(),
                air_start: Some("1998-04-03".to_string()),
                air_end: Some("1999-04-24".to_string()),
                broadcast_slot: None,
            }),
            _ => Err(CatalogError::NotFound(mal_id)),
        }
    }
}

#[derive(Default)]
struct FlagNotifier {
    called: AtomicBool,
}

#[async_trait]
impl Notifier for FlagNotifier {
    async fn notify(&self, _notification: &ReleaseNotification) -> bool {
        self.called.store(true, Ordering::SeqCst);
        false
    }
}

async fn spawn_store() -> Store {
    let db_path =
        std::env::temp_dir().join(format!("anitrack-cli-test-{}.db", uuid::Uuid::new_v4()));

    Store::new(&format!("sqlite:{}", db_path.display()))
        .await
        .expect("failed to open store")
}

#[tokio::test]
async fn test_add_anime_and_link_to_watchlist() {
    let store = spawn_store().await;
    let user = store.create_user(&NewUser::new("alice123")).await.unwrap();

    let user_id = user.id.to_string();
    let mut console = BufferedConsole::with_answers(["y", "y", user_id.as_str(), "3"]);
    cmd_add_anime(&store, &StubCatalog, &mut console, Some(1))
        .await
        .unwrap();

    assert!(console.shows(Style::Heading, "Fetched Anime Information"));
    assert!(console.shows(Style::Plain, "title: Cowboy Bebop"));
    assert!(console.shows(Style::Success, "Anime added successfully!"));
    assert!(console.shows(Style::Success, "Added to watchlist!"));
    assert_eq!(console.remaining_answers(), 0);

    let entries = store.list_watchlist(user.id).await.unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].last_watched_episode, 3);
}

#[tokio::test]
async fn test_add_anime_twice_reuses_stored_row() {
    let store = spawn_store().await;

    let mut console = BufferedConsole::with_answers(["y", "n"]);
    cmd_add_anime(&store, &StubCatalog, &mut console, Some(1))
        .await
        .unwrap();

    let mut console = BufferedConsole::with_answers(["y", "n"]);
    cmd_add_anime(&store, &StubCatalog, &mut console, Some(1))
        .await
        .unwrap();

    assert!(console.shows(Style::Warning, "already in the database"));
    assert_eq!(store.list_anime().await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_add_anime_reports_catalog_failure() {
    let store = spawn_store().await;

    let mut console = BufferedConsole::with_answers(["42"]);
    cmd_add_anime(&store, &StubCatalog, &mut console, None)
        .await
        .unwrap();

    assert!(console.shows(Style::Failure, "Error fetching anime info"));
    assert!(store.list_anime().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_add_anime_declined_stores_nothing() {
    let store = spawn_store().await;

    let mut console = BufferedConsole::with_answers(["n"]);
    cmd_add_anime(&store, &StubCatalog, &mut console, Some(1))
        .await
        .unwrap();

    assert!(console.shows(Style::Plain, "Cancelled."));
    assert!(store.list_anime().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_user_and_watchlist_commands() {
    let store = spawn_store().await;

    let mut console = BufferedConsole::default();
    cmd_add_user(&store, &mut console, Some("bob".to_string()))
        .await
        .unwrap();
    assert!(console.shows(Style::Success, "User bob added successfully"));

    cmd_add_user(&store, &mut console, Some("bob".to_string()))
        .await
        .unwrap();
    assert!(console.shows(Style::Failure, "conflicts with an existing record"));

    let user = store.find_user_by_external_id("bob").await.unwrap();
    let anime = store
        .create_anime(&StubCatalog.fetch_anime(1).await.unwrap())
        .await
        .unwrap();

    let mut console = BufferedConsole::with_answers([""]);
    cmd_add_to_watchlist(
        &store,
        &mut console,
        Some(user.id.value()),
        Some(anime.id.value()),
        None,
    )
    .await
    .unwrap();
    assert!(console.shows(Style::Success, "added to user ID"));

    let mut console = BufferedConsole::default();
    cmd_show_watchlist(&store, &mut console, Some(user.id.value()))
        .await
        .unwrap();
    assert!(console.shows(Style::Heading, "1 total"));
    assert!(console.shows(Style::Plain, "Cowboy Bebop - 0/26 watched"));
}

#[tokio::test]
async fn test_init_db_can_be_cancelled() {
    let store = spawn_store().await;

    let mut console = BufferedConsole::with_answers(["n"]);
    cmd_init_db(&store, &mut console, false).await.unwrap();
    assert!(console.shows(Style::Plain, "Cancelled."));

    let mut console = BufferedConsole::default();
    cmd_init_db(&store, &mut console, true).await.unwrap();
    assert!(console.shows(Style::Success, "Database initialized"));
}

#[tokio::test]
async fn test_notify_due_reports_undelivered() {
    let store = spawn_store().await;
    let user = store.create_user(&NewUser::new("ivan")).await.unwrap();
    let anime = store
        .create_anime(&StubCatalog.fetch_anime(1).await.unwrap())
        .await
        .unwrap();
    store
        .add_to_watchlist(&NewWatchlistEntry::new(user.id, anime.id))
        .await
        .unwrap();
    store
        .create_release(&NewRelease {
            anime_id: anime.id,
            episode_number: 1,
            release_date: "2024-05-05".to_string(),
            broadcast_slot: "17:00".to_string(),
        })
        .await
        .unwrap();

    let notifier = FlagNotifier::default();
    let mut console = BufferedConsole::default();
    cmd_notify_due(
        &store,
        &notifier,
        &mut console,
        Some(user.id.value()),
        Some("2024-05-05".to_string()),
    )
    .await
    .unwrap();

    assert!(notifier.called.load(Ordering::SeqCst));
    assert!(console.shows(Style::Warning, "Cowboy Bebop - Episode 1"));

    let result = cmd_notify_due(
        &store,
        &notifier,
        &mut console,
        Some(user.id.value()),
        Some("05/05/2024".to_string()),
    )
    .await;
    assert!(result.is_err());
}

#[tokio::test]
async fn test_interactive_session_manages_records() {
    let store = spawn_store().await;

    let mut console = BufferedConsole::with_answers([
        // users: add, then back
        "2", "1", "alice", "b",
        // anime: add MAL 1 without watchlist, rename it, back
        "3", "1", "1", "y", "n",
        "3", "1", "title", "Bebop", "", "b",
        // releases: add one for anime 1, back
        "5", "1", "1", "1", "2024-01-01", "10:00", "b",
        "q",
    ]);

    run_interactive(&store, &StubCatalog, &mut console)
        .await
        .unwrap();

    assert_eq!(console.remaining_answers(), 0);
    assert!(console.shows(Style::Success, "User alice added successfully"));
    assert!(console.shows(Style::Success, "Anime updated successfully!"));
    assert!(console.shows(Style::Success, "Release added successfully!"));

    let anime = store.get_anime(AnimeId::new(1)).await.unwrap();
    assert_eq!(anime.title, "Bebop");
    assert_eq!(store.list_releases(anime.id).await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_interactive_rejects_bad_input_and_ends_on_closed_input() {
    let store = spawn_store().await;

    let mut console = BufferedConsole::with_answers(["9", "3", "3", "1", "rating", "5", ""]);

    run_interactive(&store, &StubCatalog, &mut console)
        .await
        .unwrap();

    assert!(console.shows(Style::Failure, "Invalid choice."));
    assert!(console.shows(Style::Failure, "Unknown or non-updatable field: rating"));
    assert!(console.shows(Style::Failure, "Nothing to update."));
}
