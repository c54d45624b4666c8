use crate::entities::{prelude::*, watchlist};
use sea_orm_migration::prelude::*;
use sea_orm_migration::sea_orm::Schema;

#[derive(DeriveMigrationName)]
pub struct Migration;

const WATCHLIST_PAIR_INDEX: &str = "idx_watchlist_user_anime";

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let backend = manager.get_database_backend();
        let schema = Schema::new(backend);

        manager
            .create_table(
                schema
                    .create_table_from_entity(Users)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                schema
                    .create_table_from_entity(Anime)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                schema
                    .create_table_from_entity(Watchlist)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                schema
                    .create_table_from_entity(Releases)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        // One tracking row per (user, anime) pair.
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name(WATCHLIST_PAIR_INDEX)
                    .table(Watchlist)
                    .col(watchlist::Column::UserId)
                    .col(watchlist::Column::AnimeId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name(WATCHLIST_PAIR_INDEX)
                    .table(Watchlist)
                    .to_owned(),
            )
            .await?;
        manager
            .drop_table(Table::drop().table(Releases).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Watchlist).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Anime).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Users).to_owned())
            .await?;

        Ok(())
    }
}
