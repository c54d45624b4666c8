use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
    TransactionTrait,
};
use tracing::{debug, info};

use crate::db::{StoreError, StoreResult};
use crate::domain::AnimeId;
use crate::entities::{anime, releases, watchlist};
use crate::models::{Anime, AnimePatch, NewAnime};

pub struct AnimeRepository {
    conn: DatabaseConnection,
}

impl AnimeRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    fn map_model_to_anime(model: anime::Model) -> Anime {
        Anime {
            id: AnimeId::new(model.id),
            external_id: model.external_id,
            title: model.title,
            synopsis: model.synopsis,
            episode_count: model.episode_count,
            status: model.status,
            air_start: model.air_start,
            air_end: model.air_end,
            broadcast_slot: model.broadcast_slot,
        }
    }

    fn patch_to_active_model(patch: AnimePatch) -> anime::ActiveModel {
        let mut active_model = anime::ActiveModel {
            ..Default::default()
        };

        if let Some(external_id) = patch.external_id {
            active_model.external_id = Set(external_id);
        }
        if let Some(title) = patch.title {
            active_model.title = Set(title);
        }
        if let Some(synopsis) = patch.synopsis {
            active_model.synopsis = Set(synopsis);
        }
        if let Some(episode_count) = patch.episode_count {
            active_model.episode_count = Set(episode_count);
        }
        if let Some(status) = patch.status {
            active_model.status = Set(status);
        }
        if let Some(air_start) = patch.air_start {
            active_model.air_start = Set(air_start);
        }
        if let Some(air_end) = patch.air_end {
            active_model.air_end = Set(air_end);
        }
        if let Some(broadcast_slot) = patch.broadcast_slot {
            active_model.broadcast_slot = Set(broadcast_slot);
        }

        active_model
    }

    pub async fn create(&self, new: &NewAnime) -> StoreResult<Anime> {
        let active_model = anime::ActiveModel {
            external_id: Set(new.external_id),
            title: Set(new.title.clone()),
            synopsis: Set(new.synopsis.clone()),
            episode_count: Set(new.episode_count),
            status: Set(new.status.clone()),
            air_start: Set(new.air_start.clone()),
            air_end: Set(new.air_end.clone()),
            broadcast_slot: Set(new.broadcast_slot.clone()),
            ..Default::default()
        };

        let txn = self.conn.begin().await?;
        let model = active_model.insert(&txn).await?;
        txn.commit().await?;

        info!("Added anime: {} (MAL {})", model.title, model.external_id);
        Ok(Self::map_model_to_anime(model))
    }

    pub async fn get(&self, id: AnimeId) -> StoreResult<Anime> {
        debug!("Loading anime {}", id);
        anime::Entity::find_by_id(id.value())
            .one(&self.conn)
            .await?
            .map(Self::map_model_to_anime)
            .ok_or_else(|| StoreError::not_found("Anime", id))
    }

    pub async fn find_by_external_id(&self, external_id: i32) -> StoreResult<Anime> {
        anime::Entity::find()
            .filter(anime::Column::ExternalId.eq(external_id))
            .one(&self.conn)
            .await?
            .map(Self::map_model_to_anime)
            .ok_or_else(|| StoreError::not_found("Anime with MAL id", external_id))
    }

    pub async fn list(&self) -> StoreResult<Vec<Anime>> {
        let rows = anime::Entity::find()
            .order_by_asc(anime::Column::Title)
            .all(&self.conn)
            .await?;

        Ok(rows.into_iter().map(Self::map_model_to_anime).collect())
    }

    pub async fn update(&self, id: AnimeId, patch: AnimePatch) -> StoreResult<Anime> {
        if patch.is_empty() {
            return Err(StoreError::EmptyUpdate);
        }

        let txn = self.conn.begin().await?;

        let result = anime::Entity::update_many()
            .set(Self::patch_to_active_model(patch))
            .filter(anime::Column::Id.eq(id.value()))
            .exec(&txn)
            .await?;

        if result.rows_affected == 0 {
            return Err(StoreError::not_found("Anime", id));
        }

        let model = anime::Entity::find_by_id(id.value())
            .one(&txn)
            .await?
            .ok_or_else(|| StoreError::not_found("Anime", id))?;

        txn.commit().await?;

        info!("Updated anime {}: {}", id, model.title);
        Ok(Self::map_model_to_anime(model))
    }

    /// Removes the anime together with the watchlist and release rows that
    /// reference it.
    pub async fn delete(&self, id: AnimeId) -> StoreResult<bool> {
        let txn = self.conn.begin().await?;

        watchlist::Entity::delete_many()
            .filter(watchlist::Column::AnimeId.eq(id.value()))
            .exec(&txn)
            .await?;

        releases::Entity::delete_many()
            .filter(releases::Column::AnimeId.eq(id.value()))
            .exec(&txn)
            .await?;

        let result = anime::Entity::delete_by_id(id.value()).exec(&txn).await?;

        txn.commit().await?;

        let removed = result.rows_affected > 0;
        if removed {
            info!("Removed anime with ID: {}", id);
        }
        Ok(removed)
    }
}
