//! 正规化基金统计：所有广告位投放收入的 20%

use chrono::{DateTime, Utc};
use sea_orm::{ColumnTrait, ConnectionTrait, EntityTrait, PaginatorTrait, QueryFilter, QuerySelect};
use serde::Serialize;

use crate::entity::{banner, Banner};
use crate::error::AppResult;

/// 提取比例（百分比）
pub const FUND_PERCENTAGE: f64 = 20.0;

pub const FUND_CURRENCY: &str = "USD";

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FundReport {
    pub total_revenue: f64,
    pub fund_amount: f64,
    pub currency: &'static str,
    pub last_updated: DateTime<Utc>,
    #[serde(skip)]
    pub active_banners: u64,
}

/// 按给定收入计算基金金额
pub fn fund_amount(total_revenue: f64) -> f64 {
    total_revenue * FUND_PERCENTAGE / 100.0
}

/// 汇总全部广告位的 cost_price，并统计启用中的广告位数量
pub async fn fund_report<C: ConnectionTrait>(db: &C) -> AppResult<FundReport> {
    // 空表时 SUM 返回 NULL
    let total_revenue = Banner::find()
        .select_only()
        .column_as(banner::Column::CostPrice.sum(), "total_revenue")
        .into_tuple::<Option<f64>>()
        .one(db)
        .await?
        .flatten()
        .unwrap_or(0.0);

    let active_banners = Banner::find()
        .filter(banner::Column::IsActive.eq(true))
        .count(db)
        .await?;

    let report = FundReport {
        total_revenue,
        fund_amount: fund_amount(total_revenue),
        currency: FUND_CURRENCY,
        last_updated: Utc::now(),
        active_banners,
    };

    tracing::debug!(
        "基金统计: 收入 {} / 基金 {} / 启用广告位 {}",
        report.total_revenue,
        report.fund_amount,
        report.active_banners
    );
    Ok(report)
}
