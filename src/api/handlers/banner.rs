use axum::{
    body::Bytes,
    extract::Extension,
    http::StatusCode,
    response::Json,
};
use sea_orm::{ActiveModelTrait, EntityTrait, QueryOrder};
use serde::{Deserialize, Serialize};

use crate::analytics::{record_event, EventKind};
use crate::api::extract::{AppJson, AppPath};
use crate::entity::{banner, Banner};
use crate::error::{AppError, AppResult};
use crate::schema::NewBanner;
use crate::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct AnalyticsRequest {
    #[serde(rename = "type")]
    pub kind: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsResponse {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub click_count: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub impression_count: Option<i64>,
}

/// POST /api/banners/{id}/analytics - 记录点击或曝光
pub async fn record_banner_analytics(
    Extension(state): Extension<AppState>,
    AppPath(id): AppPath<i64>,
    body: Bytes,
) -> AppResult<Json<AnalyticsResponse>> {
    // 自己解析请求体，缺失或格式错误统一返回 400
    let req: AnalyticsRequest = if body.iter().all(u8::is_ascii_whitespace) {
        AnalyticsRequest::default()
    } else {
        serde_json::from_slice(&body)
            .map_err(|e| AppError::validation(format!("invalid request body: {}", e)))?
    };

    let kind = EventKind::parse(req.kind.as_deref())?;
    let result = record_event(&state.db, id, kind).await?;

    let (click_count, impression_count) = match result.kind {
        EventKind::Click => (Some(result.count), None),
        EventKind::Impression => (None, Some(result.count)),
    };

    Ok(Json(AnalyticsResponse {
        message: format!("{} recorded", result.kind),
        click_count,
        impression_count,
    }))
}

/// POST /api/banners - 创建广告位
pub async fn create_banner(
    Extension(state): Extension<AppState>,
    AppJson(req): AppJson<NewBanner>,
) -> AppResult<(StatusCode, Json<banner::Model>)> {
    let banner = req.validate()?.insert(&state.db).await?;
    tracing::info!("创建广告位 #{} ({})", banner.id, banner.title);
    Ok((StatusCode::CREATED, Json(banner)))
}

/// GET /api/banners - 获取所有广告位
pub async fn list_banners(
    Extension(state): Extension<AppState>,
) -> AppResult<Json<Vec<banner::Model>>> {
    let banners = Banner::find()
        .order_by_desc(banner::Column::CreatedAt)
        .all(&state.db)
        .await?;
    Ok(Json(banners))
}

/// GET /api/banners/{id} - 获取单个广告位
pub async fn get_banner(
    Extension(state): Extension<AppState>,
    AppPath(id): AppPath<i64>,
) -> AppResult<Json<banner::Model>> {
    Banner::find_by_id(id)
        .one(&state.db)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::not_found(format!("banner {} not found", id)))
}
