use anyhow::Result;
use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection, Statement};
use std::path::Path;
use std::time::Duration;
use tracing::info;

use crate::domain::{AnimeId, ReleaseId, UserId, WatchlistId};
use crate::models::{
    Anime, AnimePatch, NewAnime, NewRelease, NewUser, NewWatchlistEntry, Release, ReleasePatch,
    User, UserPatch, WatchlistEntry, WatchlistPatch,
};

pub mod error;
pub mod migrator;
pub mod repositories;

pub use error::{StoreError, StoreResult};

/// Handle to the watchlist database.
///
/// Cloning is cheap; all clones share one connection pool. Every mutating
/// operation runs inside its own transaction.
#[derive(Clone)]
pub struct Store {
    pub conn: DatabaseConnection,
}

impl Store {
    /// Connects and makes sure the schema exists.
    pub async fn new(db_url: &str) -> Result<Self> {
        let store = Self::connect(db_url).await?;
        store.initialize_schema().await?;
        Ok(store)
    }

    /// Connects without touching the schema.
    pub async fn connect(db_url: &str) -> Result<Self> {
        Self::with_pool_options(db_url, 5, 1).await
    }

    pub async fn with_pool_options(
        db_url: &str,
        max_connections: u32,
        min_connections: u32,
    ) -> Result<Self> {
        let in_memory = db_url.contains(":memory:");

        if !in_memory {
            let path_str = db_url
                .trim_start_matches("sqlite:")
                .trim_start_matches("//")
                .split('?')
                .next()
                .unwrap_or_default();
            if let Some(parent) = Path::new(path_str).parent() {
                tokio::fs::create_dir_all(parent).await.ok();
            }
            if !Path::new(path_str).exists() {
                std::fs::File::create(path_str)?;
            }
        }

        // Each in-memory connection is its own database.
        let (max_connections, min_connections) = if in_memory {
            (1, 1)
        } else {
            (max_connections, min_connections)
        };

        let mut opt = ConnectOptions::new(db_url.to_string());
        opt.max_connections(max_connections)
            .min_connections(min_connections)
            .connect_timeout(Duration::from_secs(10))
            .acquire_timeout(Duration::from_secs(10))
            .idle_timeout(Duration::from_secs(300))
            .max_lifetime(Duration::from_secs(600))
            .sqlx_logging(false);

        let conn = Database::connect(opt).await?;

        info!(
            "Database connected (pool: {}-{})",
            min_connections, max_connections
        );

        Ok(Self { conn })
    }

    /// Creates any missing tables. Safe to call repeatedly.
    pub async fn initialize_schema(&self) -> StoreResult<()> {
        use sea_orm_migration::MigratorTrait;

        migrator::Migrator::up(&self.conn, None).await?;
        info!("Database schema initialized");
        Ok(())
    }

    pub async fn ping(&self) -> StoreResult<()> {
        let backend = self.conn.get_database_backend();
        self.conn
            .query_one(Statement::from_string(backend, "SELECT 1".to_string()))
            .await?;
        Ok(())
    }

    fn user_repo(&self) -> repositories::user::UserRepository {
        repositories::user::UserRepository::new(self.conn.clone())
    }

    fn anime_repo(&self) -> repositories::anime::AnimeRepository {
        repositories::anime::AnimeRepository::new(self.conn.clone())
    }

    fn watchlist_repo(&self) -> repositories::watchlist::WatchlistRepository {
        repositories::watchlist::WatchlistRepository::new(self.conn.clone())
    }

    fn release_repo(&self) -> repositories::release::ReleaseRepository {
        repositories::release::ReleaseRepository::new(self.conn.clone())
    }

    // Users

    pub async fn create_user(&self, user: &NewUser) -> StoreResult<User> {
        self.user_repo().create(user).await
    }

    pub async fn get_user(&self, id: UserId) -> StoreResult<User> {
        self.user_repo().get(id).await
    }

    pub async fn find_user_by_external_id(&self, external_id: &str) -> StoreResult<User> {
        self.user_repo().find_by_external_id(external_id).await
    }

    pub async fn list_users(&self) -> StoreResult<Vec<User>> {
        self.user_repo().list().await
    }

    pub async fn update_user(&self, id: UserId, patch: UserPatch) -> StoreResult<User> {
        self.user_repo().update(id, patch).await
    }

    pub async fn delete_user(&self, id: UserId) -> StoreResult<bool> {
        self.user_repo().delete(id).await
    }

    // Anime

    pub async fn create_anime(&self, anime: &NewAnime) -> StoreResult<Anime> {
        self.anime_repo().create(anime).await
    }

    pub async fn get_anime(&self, id: AnimeId) -> StoreResult<Anime> {
        self.anime_repo().get(id).await
    }

    pub async fn find_anime_by_external_id(&self, external_id: i32) -> StoreResult<Anime> {
        self.anime_repo().find_by_external_id(external_id).await
    }

    pub async fn list_anime(&self) -> StoreResult<Vec<Anime>> {
        self.anime_repo().list().await
    }

    pub async fn update_anime(&self, id: AnimeId, patch: AnimePatch) -> StoreResult<Anime> {
        self.anime_repo().update(id, patch).await
    }

    pub async fn delete_anime(&self, id: AnimeId) -> StoreResult<bool> {
        self.anime_repo().delete(id).await
    }

    // Watchlist

    pub async fn add_to_watchlist(&self, entry: &NewWatchlistEntry) -> StoreResult<WatchlistEntry> {
        self.watchlist_repo().add(entry).await
    }

    pub async fn get_watchlist_entry(&self, id: WatchlistId) -> StoreResult<WatchlistEntry> {
        self.watchlist_repo().get(id).await
    }

    pub async fn list_watchlist(&self, user_id: UserId) -> StoreResult<Vec<WatchlistEntry>> {
        self.watchlist_repo().list_for_user(user_id).await
    }

    pub async fn update_watchlist_entry(
        &self,
        id: WatchlistId,
        patch: WatchlistPatch,
    ) -> StoreResult<WatchlistEntry> {
        self.watchlist_repo().update(id, patch).await
    }

    pub async fn delete_watchlist_entry(&self, id: WatchlistId) -> StoreResult<bool> {
        self.watchlist_repo().remove(id).await
    }

    // Releases

    pub async fn create_release(&self, release: &NewRelease) -> StoreResult<Release> {
        self.release_repo().add(release).await
    }

    pub async fn get_release(&self, id: ReleaseId) -> StoreResult<Release> {
        self.release_repo().get(id).await
    }

    pub async fn list_releases(&self, anime_id: AnimeId) -> StoreResult<Vec<Release>> {
        self.release_repo().list_for_anime(anime_id).await
    }

    pub async fn update_release(&self, id: ReleaseId, patch: ReleasePatch) -> StoreResult<Release> {
        self.release_repo().update(id, patch).await
    }

    pub async fn delete_release(&self, id: ReleaseId) -> StoreResult<bool> {
        self.release_repo().remove(id).await
    }
}
