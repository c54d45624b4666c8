use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
    TransactionTrait,
};
use tracing::{debug, info};

use crate::db::{StoreError, StoreResult};
use crate::domain::UserId;
use crate::entities::{users, watchlist};
use crate::models::{NewUser, User, UserPatch};

impl From<users::Model> for User {
    fn from(model: users::Model) -> Self {
        Self {
            id: UserId::new(model.id),
            external_id: model.external_id,
        }
    }
}

pub struct UserRepository {
    conn: DatabaseConnection,
}

impl UserRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    pub async fn create(&self, user: &NewUser) -> StoreResult<User> {
        let active_model = users::ActiveModel {
            external_id: Set(user.external_id.clone()),
            ..Default::default()
        };

        let txn = self.conn.begin().await?;
        let model = active_model.insert(&txn).await?;
        txn.commit().await?;

        info!("Created user {} ({})", model.id, model.external_id);
        Ok(model.into())
    }

    pub async fn get(&self, id: UserId) -> StoreResult<User> {
        debug!("Loading user {}", id);
        users::Entity::find_by_id(id.value())
            .one(&self.conn)
            .await?
            .map(User::from)
            .ok_or_else(|| StoreError::not_found("User", id))
    }

    pub async fn find_by_external_id(&self, external_id: &str) -> StoreResult<User> {
        users::Entity::find()
            .filter(users::Column::ExternalId.eq(external_id))
            .one(&self.conn)
            .await?
            .map(User::from)
            .ok_or_else(|| StoreError::not_found("User with MAL id", external_id))
    }

    pub async fn list(&self) -> StoreResult<Vec<User>> {
        let rows = users::Entity::find()
            .order_by_asc(users::Column::Id)
            .all(&self.conn)
            .await?;

        Ok(rows.into_iter().map(User::from).collect())
    }

    pub async fn update(&self, id: UserId, patch: UserPatch) -> StoreResult<User> {
        let Some(external_id) = patch.external_id else {
            return Err(StoreError::EmptyUpdate);
        };

        let active_model = users::ActiveModel {
            external_id: Set(external_id),
            ..Default::default()
        };

        let txn = self.conn.begin().await?;

        let result = users::Entity::update_many()
            .set(active_model)
            .filter(users::Column::Id.eq(id.value()))
            .exec(&txn)
            .await?;

        if result.rows_affected == 0 {
            return Err(StoreError::not_found("User", id));
        }

        let model = users::Entity::find_by_id(id.value())
            .one(&txn)
            .await?
            .ok_or_else(|| StoreError::not_found("User", id))?;

        txn.commit().await?;

        info!("Updated user {}", id);
        Ok(model.into())
    }

    /// Removes the user and their watchlist rows. Deleting an unknown id is
    /// not an error; the returned flag says whether a user row was removed.
    pub async fn delete(&self, id: UserId) -> StoreResult<bool> {
        let txn = self.conn.begin().await?;

        watchlist::Entity::delete_many()
            .filter(watchlist::Column::UserId.eq(id.value()))
            .exec(&txn)
            .await?;

        let result = users::Entity::delete_by_id(id.value()).exec(&txn).await?;

        txn.commit().await?;

        let removed = result.rows_affected > 0;
        if removed {
            info!("Deleted user {}", id);
        }
        Ok(removed)
    }
}
