use chrono::{NaiveDateTime, Utc};
use sea_orm::{NotSet, Set};
use serde::Deserialize;

use super::optional;
use crate::entity::subscription::{self, SubscriptionStatus, Tier};
use crate::error::{AppError, AppResult};
use crate::ids::BusinessId;

pub const DEFAULT_CURRENCY: &str = "USD";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewSubscription {
    #[serde(skip)]
    pub business_id: Option<BusinessId>,
    pub tier: Option<Tier>,
    pub status: Option<SubscriptionStatus>,
    pub current_period_start: Option<NaiveDateTime>,
    pub current_period_end: Option<NaiveDateTime>,
    pub amount: Option<f64>,
    pub currency: Option<String>,
    pub gateway_customer_id: Option<String>,
    pub gateway_subscription_id: Option<String>,
}

impl NewSubscription {
    pub fn validate(self) -> AppResult<subscription::ActiveModel> {
        let business_id = self
            .business_id
            .ok_or_else(|| AppError::validation("businessId is required"))?;

        let now = Utc::now().naive_utc();
        let period_start = self.current_period_start.unwrap_or(now);
        let period_end = self
            .current_period_end
            .ok_or_else(|| AppError::validation("currentPeriodEnd is required"))?;
        if period_end < period_start {
            return Err(AppError::validation(
                "currentPeriodEnd must not be before currentPeriodStart",
            ));
        }

        let amount = self
            .amount
            .ok_or_else(|| AppError::validation("amount is required"))?;
        if !amount.is_finite() || amount < 0.0 {
            return Err(AppError::validation("amount must be a non-negative number"));
        }

        let currency = match self.currency.as_deref().map(str::trim) {
            None | Some("") => DEFAULT_CURRENCY.to_string(),
            Some(code) if code.len() == 3 && code.chars().all(|c| c.is_ascii_alphabetic()) => {
                code.to_ascii_uppercase()
            }
            Some(_) => return Err(AppError::validation("currency must be a 3-letter code")),
        };

        Ok(subscription::ActiveModel {
            id: NotSet,
            business_id: Set(business_id),
            tier: Set(self.tier.unwrap_or_default()),
            status: Set(self.status.unwrap_or_default()),
            current_period_start: Set(period_start),
            current_period_end: Set(period_end),
            amount: Set(amount),
            currency: Set(currency),
            gateway_customer_id: Set(optional("gatewayCustomerId", self.gateway_customer_id, 255)?),
            gateway_subscription_id: Set(optional(
                "gatewaySubscriptionId",
                self.gateway_subscription_id,
                255,
            )?),
            created_at: Set(now),
            updated_at: Set(now),
        })
    }
}
