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
                    .table(Message::Table)
                    .if_not_exists()
                    .col(big_integer(Message::Id).auto_increment().primary_key())
                    .col(big_integer(Message::BusinessId))
                    .col(big_integer_null(Message::UserId))
                    .col(string(Message::SenderEmail))
                    .col(string(Message::SenderName))
                    .col(string_null(Message::SenderPhone))
                    .col(string_null(Message::Subject))
                    .col(text(Message::Body))
                    .col(string(Message::Status).default("UNREAD")) // UNREAD, READ, REPLIED, ARCHIVED
                    .col(timestamp_null(Message::ReadAt))
                    .col(timestamp_null(Message::RepliedAt))
                    .col(text_null(Message::ReplyMessage))
                    .col(timestamp(Message::CreatedAt))
                    .col(timestamp(Message::UpdatedAt))
                    .to_owned(),
            )
            .await?;

        // 按商家+状态筛选
        manager
            .create_index(
                Index::create()
                    .name("idx_message_business_status")
                    .table(Message::Table)
                    .col(Message::BusinessId)
                    .col(Message::Status)
                    .to_owned(),
            )
            .await?;

        // 按商家+时间倒序列出
        manager
            .create_index(
                Index::create()
                    .name("idx_message_business_created_at")
                    .table(Message::Table)
                    .col(Message::BusinessId)
                    .col(Message::CreatedAt)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Message::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Message {
    Table,
    Id,
    BusinessId,
    UserId,
    SenderEmail,
    SenderName,
    SenderPhone,
    Subject,
    Body,
    Status,
    ReadAt,
    RepliedAt,
    ReplyMessage,
    CreatedAt,
    UpdatedAt,
}
