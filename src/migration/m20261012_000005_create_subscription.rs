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
                    .table(Subscription::Table)
                    .if_not_exists()
                    .col(big_integer(Subscription::Id).auto_increment().primary_key())
                    .col(big_integer(Subscription::BusinessId))
                    .col(string(Subscription::Tier).default("BASIC")) // BASIC, VERIFIED, PREMIUM
                    .col(string(Subscription::Status).default("ACTIVE")) // ACTIVE, SUSPENDED, CANCELLED, PAST_DUE
                    .col(timestamp(Subscription::CurrentPeriodStart))
                    .col(timestamp(Subscription::CurrentPeriodEnd))
                    .col(double(Subscription::Amount))
                    .col(string(Subscription::Currency).default("USD"))
                    .col(string_null(Subscription::GatewayCustomerId))
                    .col(string_null(Subscription::GatewaySubscriptionId))
                    .col(timestamp(Subscription::CreatedAt))
                    .col(timestamp(Subscription::UpdatedAt))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_subscription_business_id")
                    .table(Subscription::Table)
                    .col(Subscription::BusinessId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Subscription::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Subscription {
    Table,
    Id,
    BusinessId,
    Tier,
    Status,
    CurrentPeriodStart,
    CurrentPeriodEnd,
    Amount,
    Currency,
    GatewayCustomerId,
    GatewaySubscriptionId,
    CreatedAt,
    UpdatedAt,
}
