use axum::extract::Extension;
use axum::response::Json;

use crate::error::AppResult;
use crate::fund::{fund_report, FundReport};
use crate::AppState;

/// GET /api/fund/tracker - 正规化基金统计
pub async fn get_fund_tracker(Extension(state): Extension<AppState>) -> AppResult<Json<FundReport>> {
    let report = fund_report(&state.db).await?;
    Ok(Json(report))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analytics::tests::insert_banner;
    use crate::api::handlers::test_support::{json_body, test_state};

    #[tokio::test]
    async fn test_fund_tracker() {
        let state = test_state().await;

        let (status, body) = json_body(get_fund_tracker(Extension(state.clone())).await).await;
        assert_eq!(status, 200);
        assert_eq!(body["totalRevenue"], 0.0);
        assert_eq!(body["fundAmount"], 0.0);

        for price in [100.0, 200.0, 50.0] {
            insert_banner(&state.db, price, true).await;
        }

        let (status, body) = json_body(get_fund_tracker(Extension(state)).await).await;
        assert_eq!(status, 200);
        assert_eq!(body["totalRevenue"], 350.0);
        assert_eq!(body["fundAmount"], 70.0);
        assert_eq!(body["currency"], "USD");
        assert!(body["lastUpdated"].is_string());
    }
}
