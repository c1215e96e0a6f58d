use chrono::{Duration, NaiveDateTime};
use sea_orm::{NotSet, Set};
use serde::Deserialize;

use super::is_phone_number;
use crate::entity::phone_verification;
use crate::error::{AppError, AppResult};
use crate::ids::{BusinessId, UserId};

pub const CODE_LEN: usize = 6;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewPhoneVerification {
    #[serde(default)]
    pub phone_number: String,
    pub business_id: Option<BusinessId>,
    pub user_id: Option<UserId>,
}

/// 去掉空格、横线和括号后的手机号
pub fn normalize_phone(raw: &str) -> String {
    raw.chars()
        .filter(|c| !c.is_whitespace() && !matches!(c, '-' | '(' | ')'))
        .collect()
}

pub fn is_code(value: &str) -> bool {
    value.len() == CODE_LEN && value.chars().all(|c| c.is_ascii_digit())
}

impl NewPhoneVerification {
    pub fn validate(
        self,
        code: String,
        now: NaiveDateTime,
        ttl: Duration,
    ) -> AppResult<phone_verification::ActiveModel> {
        let phone_number = normalize_phone(&self.phone_number);
        if phone_number.is_empty() {
            return Err(AppError::validation("phoneNumber is required"));
        }
        if !is_phone_number(&phone_number) {
            return Err(AppError::validation("phoneNumber is not a valid phone number"));
        }
        if !is_code(&code) {
            return Err(AppError::validation("code must be 6 digits"));
        }
        if ttl <= Duration::zero() {
            return Err(AppError::validation("expiresAt must be in the future"));
        }
        let expires_at = now
            .checked_add_signed(ttl)
            .ok_or_else(|| AppError::validation("expiresAt is out of range"))?;

        Ok(phone_verification::ActiveModel {
            id: NotSet,
            phone_number: Set(phone_number),
            code: Set(code),
            business_id: Set(self.business_id),
            user_id: Set(self.user_id),
            verified: Set(false),
            expires_at: Set(expires_at),
            attempts: Set(0),
            created_at: Set(now),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use sea_orm::ActiveValue;

    #[test]
    fn test_normalize_phone() {
        assert_eq!(normalize_phone("+254 (712) 345-678"), "+254712345678");
    }

    #[test]
    fn test_validate() {
        let now = Utc::now().naive_utc();
        let draft = NewPhoneVerification {
            phone_number: "+254 712 345 678".into(),
            business_id: Some(BusinessId(9)),
            user_id: None,
        };
        let model = draft.validate("012345".into(), now, Duration::minutes(10)).unwrap();
        assert_eq!(model.phone_number, ActiveValue::Set("+254712345678".to_string()));
        assert_eq!(model.verified, ActiveValue::Set(false));
        assert_eq!(model.attempts, ActiveValue::Set(0));
        assert_eq!(model.expires_at, ActiveValue::Set(now + Duration::minutes(10)));
    }

    #[test]
    fn test_rejects_bad_input() {
        let now = Utc::now().naive_utc();
        let bad_phone = NewPhoneVerification {
            phone_number: "12ab".into(),
            business_id: None,
            user_id: None,
        };
        assert!(bad_phone.validate("123456".into(), now, Duration::minutes(10)).is_err());

        let bad_code = NewPhoneVerification {
            phone_number: "0712345678".into(),
            business_id: None,
            user_id: None,
        };
        assert!(bad_code.validate("12345".into(), now, Duration::minutes(10)).is_err());

        let far_future = NewPhoneVerification {
            phone_number: "0712345678".into(),
            business_id: None,
            user_id: None,
        };
        let err = far_future
            .validate("123456".into(), now, Duration::days(365 * 300_000))
            .unwrap_err();
        assert!(err.to_string().contains("out of range"));

        assert!(!is_code("12a456"));
        assert!(is_code("000000"));
    }
}
