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
                    .table(PhoneVerification::Table)
                    .if_not_exists()
                    .col(big_integer(PhoneVerification::Id).auto_increment().primary_key())
                    .col(string(PhoneVerification::PhoneNumber))
                    .col(string(PhoneVerification::Code))
                    .col(big_integer_null(PhoneVerification::BusinessId))
                    .col(big_integer_null(PhoneVerification::UserId))
                    .col(boolean(PhoneVerification::Verified).default(false))
                    .col(timestamp(PhoneVerification::ExpiresAt))
                    .col(integer(PhoneVerification::Attempts).default(0))
                    .col(timestamp(PhoneVerification::CreatedAt))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_phone_verification_phone_verified")
                    .table(PhoneVerification::Table)
                    .col(PhoneVerification::PhoneNumber)
                    .col(PhoneVerification::Verified)
                    .to_owned(),
            )
            .await?;

        // 过期清理任务按 expires_at 扫描
        manager
            .create_index(
                Index::create()
                    .name("idx_phone_verification_expires_at")
                    .table(PhoneVerification::Table)
                    .col(PhoneVerification::ExpiresAt)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(PhoneVerification::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum PhoneVerification {
    Table,
    Id,
    PhoneNumber,
    Code,
    BusinessId,
    UserId,
    Verified,
    ExpiresAt,
    Attempts,
    CreatedAt,
}
