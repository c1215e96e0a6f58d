use sea_orm_migration::prelude::*;
use sea_orm_migration::schema::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Rating::Table)
                    .if_not_exists()
                    .col(big_integer(Rating::Id).auto_increment().primary_key())
                    .col(big_integer(Rating::BusinessId))
                    .col(big_integer(Rating::UserId))
                    .col(integer(Rating::Rating))
                    .col(string_null(Rating::Comment))
                    .col(boolean(Rating::Verified).default(false))
                    .col(timestamp(Rating::CreatedAt))
                    .col(timestamp(Rating::UpdatedAt))
                    .to_owned(),
            )
            .await?;

        // 每个用户对同一商家只能评分一次
        manager
            .create_index(
                Index::create()
                    .name("idx_rating_business_user")
                    .table(Rating::Table)
                    .col(Rating::BusinessId)
                    .col(Rating::UserId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Rating::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Rating {
    Table,
    Id,
    BusinessId,
    UserId,
    Rating,
    Comment,
    Verified,
    CreatedAt,
    UpdatedAt,
}
