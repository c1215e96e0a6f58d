use axum::{
    extract::Extension,
    http::StatusCode,
    response::Json,
};
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter};

use crate::api::extract::{AppJson, AppPath};
use crate::entity::{subscription, Subscription};
use crate::error::{AppError, AppResult};
use crate::ids::BusinessId;
use crate::schema::NewSubscription;
use crate::AppState;

/// POST /api/businesses/{business_id}/subscription - 创建商家订阅，每个商家仅一条
pub async fn create_subscription(
    Extension(state): Extension<AppState>,
    AppPath(business_id): AppPath<i64>,
    AppJson(mut req): AppJson<NewSubscription>,
) -> AppResult<(StatusCode, Json<subscription::Model>)> {
    req.business_id = Some(BusinessId(business_id));

    let subscription = req.validate()?.insert(&state.db).await.map_err(|e| match AppError::from(e) {
        AppError::Conflict(_) => {
            AppError::Conflict(format!("business {} already has a subscription", business_id))
        }
        other => other,
    })?;

    tracing::info!(
        "商家 #{} 订阅 {:?}，有效期至 {}",
        business_id,
        subscription.tier,
        subscription.current_period_end
    );
    Ok((StatusCode::CREATED, Json(subscription)))
}

/// GET /api/businesses/{business_id}/subscription - 获取商家订阅
pub async fn get_subscription(
    Extension(state): Extension<AppState>,
    AppPath(business_id): AppPath<i64>,
) -> AppResult<Json<subscription::Model>> {
    Subscription::find()
        .filter(subscription::Column::BusinessId.eq(BusinessId(business_id)))
        .one(&state.db)
        .await?
        .map(Json)
        .ok_or_else(|| {
            AppError::not_found(format!("business {} has no subscription", business_id))
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::handlers::test_support::{json_body, test_state};

    fn new_subscription(tier: &str) -> NewSubscription {
        serde_json::from_value(serde_json::json!({
            "tier": tier,
            "currentPeriodEnd": "2031-01-01T00:00:00",
            "amount": 15.0,
            "gatewayCustomerId": "cus_123",
        }))
        .unwrap()
    }

    #[tokio::test]
    async fn test_one_subscription_per_business() {
        let state = test_state().await;

        let (status, body) = json_body(
            create_subscription(Extension(state.clone()), AppPath(5), AppJson(new_subscription("VERIFIED"))).await,
        )
        .await;
        assert_eq!(status, 201);
        assert_eq!(body["tier"], "VERIFIED");
        assert_eq!(body["status"], "ACTIVE");
        assert_eq!(body["currency"], "USD");
        assert_eq!(body["gatewayCustomerId"], "cus_123");

        let (status, body) = json_body(
            create_subscription(Extension(state.clone()), AppPath(5), AppJson(new_subscription("PREMIUM"))).await,
        )
        .await;
        assert_eq!(status, 409);
        assert!(body["error"].as_str().unwrap().contains("already has a subscription"));

        let (status, _) = json_body(
            create_subscription(Extension(state.clone()), AppPath(6), AppJson(new_subscription("BASIC"))).await,
        )
        .await;
        assert_eq!(status, 201);

        let (status, body) = json_body(get_subscription(Extension(state.clone()), AppPath(5)).await).await;
        assert_eq!(status, 200);
        assert_eq!(body["tier"], "VERIFIED");

        let (status, _) = json_body(get_subscription(Extension(state), AppPath(99)).await).await;
        assert_eq!(status, 404);
    }
}
