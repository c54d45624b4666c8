use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
    TransactionTrait,
};
use tracing::info;

use crate::db::{StoreError, StoreResult};
use crate::domain::{AnimeId, UserId, WatchlistId};
use crate::entities::watchlist;
use crate::models::{NewWatchlistEntry, WatchlistEntry, WatchlistPatch};

/// Repository for watchlist operations
pub struct WatchlistRepository {
    conn: DatabaseConnection,
}

impl WatchlistRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    fn map_entry_model(m: watchlist::Model) -> WatchlistEntry {
        WatchlistEntry {
            id: WatchlistId::new(m.id),
            user_id: UserId::new(m.user_id),
            anime_id: AnimeId::new(m.anime_id),
            added_on: m.added_on,
            last_watched_episode: m.last_watched_episode,
        }
    }

    pub async fn add(&self, entry: &NewWatchlistEntry) -> StoreResult<WatchlistEntry> {
        let active_model = watchlist::ActiveModel {
            user_id: Set(entry.user_id.value()),
            anime_id: Set(entry.anime_id.value()),
            added_on: Set(chrono::Utc::now().to_rfc3339()),
            last_watched_episode: Set(entry.last_watched_episode),
            ..Default::default()
        };

        let txn = self.conn.begin().await?;
        let model = active_model.insert(&txn).await?;
        txn.commit().await?;

        info!(
            "Added anime {} to watchlist of user {}",
            entry.anime_id, entry.user_id
        );
        Ok(Self::map_entry_model(model))
    }

    pub async fn get(&self, id: WatchlistId) -> StoreResult<WatchlistEntry> {
        watchlist::Entity::find_by_id(id.value())
            .one(&self.conn)
            .await?
            .map(Self::map_entry_model)
            .ok_or_else(|| StoreError::not_found("Watchlist entry", id))
    }

    /// Entries for `user_id` in insertion order.
    pub async fn list_for_user(&self, user_id: UserId) -> StoreResult<Vec<WatchlistEntry>> {
        let rows = watchlist::Entity::find()
            .filter(watchlist::Column::UserId.eq(user_id.value()))
            .order_by_asc(watchlist::Column::Id)
            .all(&self.conn)
            .await?;

        Ok(rows.into_iter().map(Self::map_entry_model).collect())
    }

    pub async fn update(&self, id: WatchlistId, patch: WatchlistPatch) -> StoreResult<WatchlistEntry> {
        let Some(episode) = patch.last_watched_episode else {
            return Err(StoreError::EmptyUpdate);
        };

        let txn = self.conn.begin().await?;

        let result = watchlist::Entity::update_many()
            .col_expr(
                watchlist::Column::LastWatchedEpisode,
                sea_orm::sea_query::Expr::value(episode),
            )
            .filter(watchlist::Column::Id.eq(id.value()))
            .exec(&txn)
            .await?;

        if result.rows_affected == 0 {
            return Err(StoreError::not_found("Watchlist entry", id));
        }

        let model = watchlist::Entity::find_by_id(id.value())
            .one(&txn)
            .await?
            .ok_or_else(|| StoreError::not_found("Watchlist entry", id))?;

        txn.commit().await?;

        info!("Watchlist entry {} now at episode {}", id, episode);
        Ok(Self::map_entry_model(model))
    }

    pub async fn remove(&self, id: WatchlistId) -> StoreResult<bool> {
        let txn = self.conn.begin().await?;
        let result = watchlist::Entity::delete_by_id(id.value())
            .exec(&txn)
            .await?;
        txn.commit().await?;

        Ok(result.rows_affected > 0)
    }
}
