use chrono::Utc;
use sea_orm::{NotSet, Set};
use serde::Deserialize;

use super::optional;
use crate::entity::rating;
use crate::error::{AppError, AppResult};
use crate::ids::{BusinessId, UserId};

pub const MIN_RATING: i32 = 1;
pub const MAX_RATING: i32 = 5;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewRating {
    #[serde(skip)]
    pub business_id: Option<BusinessId>,
    pub user_id: Option<UserId>,
    pub rating: Option<i32>,
    pub comment: Option<String>,
}

impl NewRating {
    pub fn validate(self) -> AppResult<rating::ActiveModel> {
        let business_id = self
            .business_id
            .ok_or_else(|| AppError::validation("businessId is required"))?;
        let user_id = self
            .user_id
            .ok_or_else(|| AppError::validation("userId is required"))?;
        let value = self
            .rating
            .ok_or_else(|| AppError::validation("rating is required"))?;
        if !(MIN_RATING..=MAX_RATING).contains(&value) {
            return Err(AppError::validation(format!(
                "rating must be between {} and {}",
                MIN_RATING, MAX_RATING
            )));
        }

        let now = Utc::now().naive_utc();
        Ok(rating::ActiveModel {
            id: NotSet,
            business_id: Set(business_id),
            user_id: Set(user_id),
            rating: Set(value),
            comment: Set(optional("comment", self.comment, 1000)?),
            verified: Set(false),
            created_at: Set(now),
            updated_at: Set(now),
        })
    }
}
