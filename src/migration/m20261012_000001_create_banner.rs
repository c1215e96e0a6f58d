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
                    .table(Banner::Table)
                    .if_not_exists()
                    .col(big_integer(Banner::Id).auto_increment().primary_key())
                    .col(string(Banner::Title))
                    .col(string(Banner::ImageUrl))
                    .col(string_null(Banner::TargetUrl))
                    .col(big_integer_null(Banner::BusinessId))
                    .col(double(Banner::CostPrice).default(0.0))
                    .col(big_integer(Banner::ClickCount).default(0))
                    .col(big_integer(Banner::ImpressionCount).default(0))
                    .col(boolean(Banner::IsActive).default(true))
                    .col(timestamp(Banner::CreatedAt))
                    .col(timestamp(Banner::UpdatedAt))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_banner_is_active")
                    .table(Banner::Table)
                    .col(Banner::IsActive)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Banner::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Banner {
    Table,
    Id,
    Title,
    ImageUrl,
    TargetUrl,
    BusinessId,
    CostPrice,
    ClickCount,
    ImpressionCount,
    IsActive,
    CreatedAt,
    UpdatedAt,
}
