use axum::response::Html;
use serde::Deserialize;

use crate::api::extract::{AppPath, AppQuery};
use crate::error::AppResult;
use crate::ids::BusinessId;
use crate::ui::{pages, BadgeSize, TrustBadge, TrustLevel};

#[derive(Debug, Deserialize)]
pub struct BadgeQuery {
    pub size: Option<String>,
}

/// GET /ui/trust-badge/{level} - 信任徽章片段
pub async fn trust_badge(
    AppPath(level): AppPath<String>,
    AppQuery(params): AppQuery<BadgeQuery>,
) -> AppResult<Html<String>> {
    let level: TrustLevel = level.parse()?;
    let size = match params.size.as_deref() {
        Some(size) => size.parse::<BadgeSize>()?,
        None => BadgeSize::default(),
    };
    Ok(Html(TrustBadge::new(level).size(size).render()))
}

/// GET /ui/businesses/{business_id}/contact-form - 联系商家表单
pub async fn contact_form(AppPath(business_id): AppPath<i64>) -> Html<String> {
    Html(pages::contact_form(BusinessId(business_id)))
}

/// GET /ui/businesses/{business_id}/rating-form - 评分表单
pub async fn rating_form(AppPath(business_id): AppPath<i64>) -> Html<String> {
    Html(pages::rating_form(BusinessId(business_id)))
}
