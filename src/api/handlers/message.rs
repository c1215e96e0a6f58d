use axum::{
    extract::Extension,
    http::StatusCode,
    response::Json,
};
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder, Set,
};
use serde::Deserialize;

use crate::api::extract::{AppJson, AppPath, AppQuery};
use crate::entity::message::{self, MessageStatus};
use crate::entity::Message;
use crate::error::{AppError, AppResult};
use crate::ids::BusinessId;
use crate::schema::message::MAX_BODY_LEN;
use crate::schema::{optional, NewMessage};
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct MessageQuery {
    pub status: Option<MessageStatus>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateMessageStatusRequest {
    pub status: MessageStatus,
    pub reply_message: Option<String>,
}

/// POST /api/businesses/{business_id}/messages - 访客给商家留言
pub async fn create_message(
    Extension(state): Extension<AppState>,
    AppPath(business_id): AppPath<i64>,
    AppJson(mut req): AppJson<NewMessage>,
) -> AppResult<(StatusCode, Json<message::Model>)> {
    req.business_id = Some(BusinessId(business_id));
    let message = req.validate()?.insert(&state.db).await?;
    tracing::info!("📨 商家 #{} 收到新留言 #{}", business_id, message.id);
    Ok((StatusCode::CREATED, Json(message)))
}

/// GET /api/businesses/{business_id}/messages - 商家的留言列表，最新的在前
pub async fn list_messages(
    Extension(state): Extension<AppState>,
    AppPath(business_id): AppPath<i64>,
    AppQuery(params): AppQuery<MessageQuery>,
) -> AppResult<Json<Vec<message::Model>>> {
    let mut query = Message::find().filter(message::Column::BusinessId.eq(BusinessId(business_id)));
    if let Some(status) = params.status {
        query = query.filter(message::Column::Status.eq(status));
    }

    let messages = query
        .order_by_desc(message::Column::CreatedAt)
        .order_by_desc(message::Column::Id)
        .all(&state.db)
        .await?;
    Ok(Json(messages))
}

/// PUT /api/messages/{id}/status - 更新留言状态
pub async fn update_message_status(
    Extension(state): Extension<AppState>,
    AppPath(id): AppPath<i64>,
    AppJson(req): AppJson<UpdateMessageStatusRequest>,
) -> AppResult<Json<message::Model>> {
    let current = Message::find_by_id(id)
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::not_found(format!("message {} not found", id)))?;

    let message = change_status(&state.db, current, req.status, req.reply_message).await?;
    Ok(Json(message))
}

/// 按 `current` 的状态做条件更新：状态已被其它请求改动时返回 Conflict
async fn change_status<C: ConnectionTrait>(
    db: &C,
    current: message::Model,
    next: MessageStatus,
    reply_message: Option<String>,
) -> AppResult<message::Model> {
    if !current.status.can_transition_to(next) {
        return Err(AppError::validation(format!(
            "cannot change message status from {:?} to {:?}",
            current.status, next
        )));
    }

    let now = Utc::now().naive_utc();
    let mut changes = message::ActiveModel {
        status: Set(next),
        updated_at: Set(now),
        ..Default::default()
    };

    match next {
        MessageStatus::Read => {
            changes.read_at = Set(Some(now));
        }
        MessageStatus::Replied => {
            let reply = optional("replyMessage", reply_message, MAX_BODY_LEN)?
                .ok_or_else(|| AppError::validation("replyMessage is required when replying"))?;
            changes.reply_message = Set(Some(reply));
            changes.replied_at = Set(Some(now));
            if current.read_at.is_none() {
                changes.read_at = Set(Some(now));
            }
        }
        MessageStatus::Archived | MessageStatus::Unread => {}
    }

    let result = Message::update_many()
        .set(changes)
        .filter(message::Column::Id.eq(current.id))
        .filter(message::Column::Status.eq(current.status))
        .exec(db)
        .await?;

    if result.rows_affected == 0 {
        return Err(AppError::Conflict(format!(
            "message {} status changed concurrently, reload and retry",
            current.id
        )));
    }

    Message::find_by_id(current.id)
        .one(db)
        .await?
        .ok_or_else(|| AppError::not_found(format!("message {} not found", current.id)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::handlers::test_support::{json_body, test_state};

    fn new_message(subject: &str) -> NewMessage {
        serde_json::from_value(serde_json::json!({
            "senderEmail": "guest@mail.example",
            "senderName": "Guest",
            "subject": subject,
            "body": "Do you deliver?",
        }))
        .unwrap()
    }

    async fn create(state: &AppState, business_id: i64, subject: &str) -> i64 {
        let (status, body) = json_body(
            create_message(Extension(state.clone()), AppPath(business_id), AppJson(new_message(subject))).await,
        )
        .await;
        assert_eq!(status, 201);
        assert_eq!(body["status"], "UNREAD");
        assert_eq!(body["businessId"], business_id);
        body["id"].as_i64().unwrap()
    }

    async fn set_status(state: &AppState, id: i64, status: MessageStatus, reply: Option<&str>) -> (u16, serde_json::Value) {
        let req = UpdateMessageStatusRequest {
            status,
            reply_message: reply.map(str::to_string),
        };
        json_body(update_message_status(Extension(state.clone()), AppPath(id), AppJson(req)).await).await
    }

    #[tokio::test]
    async fn test_list_by_business_and_status() {
        let state = test_state().await;
        let first = create(&state, 1, "first").await;
        create(&state, 1, "second").await;
        create(&state, 2, "other business").await;

        let (_, all) = json_body(
            list_messages(Extension(state.clone()), AppPath(1), AppQuery(MessageQuery { status: None })).await,
        )
        .await;
        let all = all.as_array().unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0]["subject"], "second");

        set_status(&state, first, MessageStatus::Read, None).await;
        let (_, unread) = json_body(
            list_messages(
                Extension(state.clone()),
                AppPath(1),
                AppQuery(MessageQuery { status: Some(MessageStatus::Unread) }),
            )
            .await,
        )
        .await;
        assert_eq!(unread.as_array().unwrap().len(), 1);
        assert_eq!(unread[0]["subject"], "second");
    }

    #[tokio::test]
    async fn test_lifecycle() {
        let state = test_state().await;
        let id = create(&state, 1, "hello").await;

        let (status, body) = set_status(&state, id, MessageStatus::Read, None).await;
        assert_eq!(status, 200);
        assert_eq!(body["status"], "READ");
        assert!(body["readAt"].is_string());

        // 回复必须带内容
        let (status, _) = set_status(&state, id, MessageStatus::Replied, Some("  ")).await;
        assert_eq!(status, 400);

        let (status, body) = set_status(&state, id, MessageStatus::Replied, Some("Yes we do")).await;
        assert_eq!(status, 200);
        assert_eq!(body["status"], "REPLIED");
        assert_eq!(body["replyMessage"], "Yes we do");
        assert!(body["repliedAt"].is_string());

        let (status, _) = set_status(&state, id, MessageStatus::Unread, None).await;
        assert_eq!(status, 400);

        let (status, body) = set_status(&state, id, MessageStatus::Archived, None).await;
        assert_eq!(status, 200);
        assert_eq!(body["status"], "ARCHIVED");

        let (status, _) = set_status(&state, id, MessageStatus::Read, None).await;
        assert_eq!(status, 400);

        let (status, _) = set_status(&state, id + 1, MessageStatus::Read, None).await;
        assert_eq!(status, 404);
    }

    #[tokio::test]
    async fn test_create_requires_sender() {
        let state = test_state().await;
        let req: NewMessage = serde_json::from_str(r#"{"senderEmail":"guest@mail.example","body":"hi"}"#).unwrap();
        let (status, body) = json_body(create_message(Extension(state), AppPath(1), AppJson(req)).await).await;
        assert_eq!(status, 400);
        assert_eq!(body["error"], "senderName is required");
    }

    #[tokio::test]
    async fn test_stale_status_change_is_conflict() {
        let state = test_state().await;
        let id = create(&state, 1, "race").await;
        let stale = Message::find_by_id(id).one(&state.db).await.unwrap().unwrap();

        let (status, _) = set_status(&state, id, MessageStatus::Archived, None).await;
        assert_eq!(status, 200);

        // 基于旧快照的 UNREAD -> READ 不能覆盖 ARCHIVED
        let err = change_status(&state.db, stale, MessageStatus::Read, None).await.unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)));

        let stored = Message::find_by_id(id).one(&state.db).await.unwrap().unwrap();
        assert_eq!(stored.status, MessageStatus::Archived);
        assert_eq!(stored.read_at, None);
    }
}
