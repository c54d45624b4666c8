use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
    TransactionTrait,
};
use tracing::info;

use crate::db::{StoreError, StoreResult};
use crate::domain::{AnimeId, ReleaseId};
use crate::entities::releases;
use crate::models::{NewRelease, Release, ReleasePatch};

pub struct ReleaseRepository {
    conn: DatabaseConnection,
}

impl ReleaseRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    fn map_release_model(m: releases::Model) -> Release {
        Release {
            id: ReleaseId::new(m.id),
            anime_id: AnimeId::new(m.anime_id),
            episode_number: m.episode_number,
            release_date: m.release_date,
            broadcast_slot: m.broadcast_slot,
        }
    }

    pub async fn add(&self, release: &NewRelease) -> StoreResult<Release> {
        let active_model = releases::ActiveModel {
            anime_id: Set(release.anime_id.value()),
            episode_number: Set(release.episode_number),
            release_date: Set(release.release_date.clone()),
            broadcast_slot: Set(release.broadcast_slot.clone()),
            ..Default::default()
        };

        let txn = self.conn.begin().await?;
        let model = active_model.insert(&txn).await?;
        txn.commit().await?;

        info!(
            "Added release: anime {} episode {} on {}",
            model.anime_id, model.episode_number, model.release_date
        );
        Ok(Self::map_release_model(model))
    }

    pub async fn get(&self, id: ReleaseId) -> StoreResult<Release> {
        releases::Entity::find_by_id(id.value())
            .one(&self.conn)
            .await?
            .map(Self::map_release_model)
            .ok_or_else(|| StoreError::not_found("Release", id))
    }

    pub async fn list_for_anime(&self, anime_id: AnimeId) -> StoreResult<Vec<Release>> {
        let rows = releases::Entity::find()
            .filter(releases::Column::AnimeId.eq(anime_id.value()))
            .order_by_asc(releases::Column::EpisodeNumber)
            .order_by_asc(releases::Column::Id)
            .all(&self.conn)
            .await?;

        Ok(rows.into_iter().map(Self::map_release_model).collect())
    }

    pub async fn update(&self, id: ReleaseId, patch: ReleasePatch) -> StoreResult<Release> {
        if patch.is_empty() {
            return Err(StoreError::EmptyUpdate);
        }

        let mut active_model = releases::ActiveModel {
            ..Default::default()
        };
        if let Some(anime_id) = patch.anime_id {
            active_model.anime_id = Set(anime_id.value());
        }
        if let Some(episode_number) = patch.episode_number {
            active_model.episode_number = Set(episode_number);
        }
        if let Some(release_date) = patch.release_date {
            active_model.release_date = Set(release_date);
        }
        if let Some(broadcast_slot) = patch.broadcast_slot {
            active_model.broadcast_slot = Set(broadcast_slot);
        }

        let txn = self.conn.begin().await?;

        let result = releases::Entity::update_many()
            .set(active_model)
            .filter(releases::Column::Id.eq(id.value()))
            .exec(&txn)
            .await?;

        if result.rows_affected == 0 {
            return Err(StoreError::not_found("Release", id));
        }

        let model = releases::Entity::find_by_id(id.value())
            .one(&txn)
            .await?
            .ok_or_else(|| StoreError::not_found("Release", id))?;

        txn.commit().await?;

        info!("Updated release {}", id);
        Ok(Self::map_release_model(model))
    }

    pub async fn remove(&self, id: ReleaseId) -> StoreResult<bool> {
        let txn = self.conn.begin().await?;
        let result = releases::Entity::delete_by_id(id.value())
            .exec(&txn)
            .await?;
        txn.commit().await?;

        Ok(result.rows_affected > 0)
    }
}
