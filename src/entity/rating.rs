use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::ids::{BusinessId, UserId};

/// 用户对商家的评分，每个 (business_id, user_id) 仅一条
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "rating")]
#[serde(rename_all = "camelCase")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub business_id: BusinessId,
    pub user_id: UserId,
    pub rating: i32, // 1..=5
    pub comment: Option<String>,
    pub verified: bool,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
