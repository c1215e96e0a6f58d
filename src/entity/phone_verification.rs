use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::ids::{BusinessId, UserId};

/// 单条验证记录允许的最大尝试次数
pub const MAX_ATTEMPTS: i32 = 5;

/// 手机号验证码，过期后由清理任务删除
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "phone_verification")]
#[serde(rename_all = "camelCase")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub phone_number: String,
    #[serde(skip_serializing)]
    pub code: String,
    pub business_id: Option<BusinessId>,
    pub user_id: Option<UserId>,
    pub verified: bool,
    pub expires_at: DateTime,
    pub attempts: i32,
    pub created_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
