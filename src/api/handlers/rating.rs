use axum::{
    extract::Extension,
    http::StatusCode,
    response::Json,
};
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder};
use serde::Serialize;

use crate::api::extract::{AppJson, AppPath};
use crate::entity::{rating, Rating};
use crate::error::{AppError, AppResult};
use crate::ids::BusinessId;
use crate::schema::NewRating;
use crate::AppState;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RatingSummary {
    pub count: usize,
    pub average: Option<f64>,
    pub ratings: Vec<rating::Model>,
}

impl RatingSummary {
    fn from_ratings(ratings: Vec<rating::Model>) -> Self {
        let count = ratings.len();
        let average = if count == 0 {
            None
        } else {
            let total: i64 = ratings.iter().map(|r| i64::from(r.rating)).sum();
            Some(total as f64 / count as f64)
        };
        RatingSummary { count, average, ratings }
    }
}

/// POST /api/businesses/{business_id}/ratings - 给商家评分，每个用户仅一次
pub async fn create_rating(
    Extension(state): Extension<AppState>,
    AppPath(business_id): AppPath<i64>,
    AppJson(mut req): AppJson<NewRating>,
) -> AppResult<(StatusCode, Json<rating::Model>)> {
    req.business_id = Some(BusinessId(business_id));

    let rating = req.validate()?.insert(&state.db).await.map_err(|e| match AppError::from(e) {
        AppError::Conflict(_) => {
            AppError::Conflict(format!("user has already rated business {}", business_id))
        }
        other => other,
    })?;

    Ok((StatusCode::CREATED, Json(rating)))
}

/// GET /api/businesses/{business_id}/ratings - 商家评分列表与平均分
pub async fn list_ratings(
    Extension(state): Extension<AppState>,
    AppPath(business_id): AppPath<i64>,
) -> AppResult<Json<RatingSummary>> {
    let ratings = Rating::find()
        .filter(rating::Column::BusinessId.eq(BusinessId(business_id)))
        .order_by_desc(rating::Column::CreatedAt)
        .all(&state.db)
        .await?;
    Ok(Json(RatingSummary::from_ratings(ratings)))
}
