use chrono::Utc;
use sea_orm::{NotSet, Set};
use serde::Deserialize;

use super::{optional, required};
use crate::entity::banner;
use crate::error::{AppError, AppResult};
use crate::ids::BusinessId;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewBanner {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub image_url: String,
    pub target_url: Option<String>,
    pub business_id: Option<BusinessId>,
    pub cost_price: Option<f64>,
    pub is_active: Option<bool>,
}

impl NewBanner {
    pub fn validate(self) -> AppResult<banner::ActiveModel> {
        let cost_price = self.cost_price.unwrap_or(0.0);
        if !cost_price.is_finite() || cost_price < 0.0 {
            return Err(AppError::validation("costPrice must be a non-negative number"));
        }

        let now = Utc::now().naive_utc();
        Ok(banner::ActiveModel {
            id: NotSet,
            title: Set(required("title", &self.title, 200)?),
            image_url: Set(required("imageUrl", &self.image_url, 2048)?),
            target_url: Set(optional("targetUrl", self.target_url, 2048)?),
            business_id: Set(self.business_id),
            cost_price: Set(cost_price),
            click_count: Set(0),
            impression_count: Set(0),
            is_active: Set(self.is_active.unwrap_or(true)),
            created_at: Set(now),
            updated_at: Set(now),
        })
    }
}
