use axum::{extract::Extension, http::StatusCode, response::Json};
use chrono::Utc;
use serde::Deserialize;

use crate::api::extract::AppJson;
use crate::entity::phone_verification;
use crate::error::AppResult;
use crate::schema::NewPhoneVerification;
use crate::verification::{confirm_code, issue_code};
use crate::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfirmPhoneRequest {
    #[serde(default)]
    pub phone_number: String,
    #[serde(default)]
    pub code: String,
}

/// POST /api/verifications/phone - 下发验证码（响应中不含验证码）
pub async fn request_phone_verification(
    Extension(state): Extension<AppState>,
    AppJson(req): AppJson<NewPhoneVerification>,
) -> AppResult<(StatusCode, Json<phone_verification::Model>)> {
    let record = issue_code(&state.db, req, state.config.verification_ttl()).await?;
    Ok((StatusCode::CREATED, Json(record)))
}

/// POST /api/verifications/phone/confirm - 校验验证码
pub async fn confirm_phone_verification(
    Extension(state): Extension<AppState>,
    AppJson(req): AppJson<ConfirmPhoneRequest>,
) -> AppResult<Json<phone_verification::Model>> {
    let record = confirm_code(&state.db, &req.phone_number, req.code.trim(), Utc::now().naive_utc()).await?;
    Ok(Json(record))
}
