use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::ids::BusinessId;

/// 广告位
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "banner")]
#[serde(rename_all = "camelCase")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub title: String,
    pub image_url: String,
    pub target_url: Option<String>,
    pub business_id: Option<BusinessId>,
    /// 投放价格，汇总为平台收入
    pub cost_price: f64,
    /// 只增不减
    pub click_count: i64,
    /// 只增不减
    pub impression_count: i64,
    pub is_active: bool,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
