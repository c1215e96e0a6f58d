use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::ids::{BusinessId, UserId};

/// 留言状态
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Text")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MessageStatus {
    #[default]
    #[sea_orm(string_value = "UNREAD")]
    Unread,
    #[sea_orm(string_value = "READ")]
    Read,
    #[sea_orm(string_value = "REPLIED")]
    Replied,
    #[sea_orm(string_value = "ARCHIVED")]
    Archived,
}

impl MessageStatus {
    /// 允许的状态流转：不能回到 UNREAD，ARCHIVED 为终态
    pub fn can_transition_to(self, next: MessageStatus) -> bool {
        use MessageStatus::*;
        matches!(
            (self, next),
            (Unread, Read) | (Unread, Replied) | (Read, Replied) | (Unread | Read | Replied, Archived)
        )
    }
}

/// 访客发给商家的留言
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "message")]
#[serde(rename_all = "camelCase")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub business_id: BusinessId,
    pub user_id: Option<UserId>,
    pub sender_email: String,
    pub sender_name: String,
    pub sender_phone: Option<String>,
    pub subject: Option<String>,
    #[sea_orm(column_type = "Text")]
    pub body: String,
    pub status: MessageStatus,
    pub read_at: Option<DateTime>,
    pub replied_at: Option<DateTime>,
    #[sea_orm(column_type = "Text", nullable)]
    pub reply_message: Option<String>,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
