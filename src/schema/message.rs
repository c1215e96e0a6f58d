use chrono::Utc;
use sea_orm::{NotSet, Set};
use serde::Deserialize;

use super::{is_email, optional, required};
use crate::entity::message::{self, MessageStatus};
use crate::error::{AppError, AppResult};
use crate::ids::{BusinessId, UserId};

pub const MAX_BODY_LEN: usize = 5000;

/// 访客提交的留言，business_id 来自路由
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewMessage {
    #[serde(skip)]
    pub business_id: Option<BusinessId>,
    pub user_id: Option<UserId>,
    #[serde(default)]
    pub sender_email: String,
    #[serde(default)]
    pub sender_name: String,
    pub sender_phone: Option<String>,
    pub subject: Option<String>,
    #[serde(default)]
    pub body: String,
}

impl NewMessage {
    pub fn validate(self) -> AppResult<message::ActiveModel> {
        let business_id = self
            .business_id
            .ok_or_else(|| AppError::validation("businessId is required"))?;

        let sender_email = required("senderEmail", &self.sender_email, 254)?.to_lowercase();
        if !is_email(&sender_email) {
            return Err(AppError::validation("senderEmail is not a valid email address"));
        }

        let now = Utc::now().naive_utc();
        Ok(message::ActiveModel {
            id: NotSet,
            business_id: Set(business_id),
            user_id: Set(self.user_id),
            sender_email: Set(sender_email),
            sender_name: Set(required("senderName", &self.sender_name, 100)?),
            sender_phone: Set(optional("senderPhone", self.sender_phone, 30)?),
            subject: Set(optional("subject", self.subject, 200)?),
            body: Set(required("body", &self.body, MAX_BODY_LEN)?),
            status: Set(MessageStatus::default()),
            read_at: Set(None),
            replied_at: Set(None),
            reply_message: Set(None),
            created_at: Set(now),
            updated_at: Set(now),
        })
    }
}
