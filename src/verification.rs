//! 手机号验证码：下发、校验、过期清理

use std::time::Duration as StdDuration;

use chrono::{Duration, NaiveDateTime, Utc};
use rand::Rng;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait, QueryFilter,
    QueryOrder, Set, TransactionTrait,
};

use crate::entity::phone_verification::{self, MAX_ATTEMPTS};
use crate::entity::PhoneVerification;
use crate::error::{AppError, AppResult};
use crate::schema::phone_verification::{is_code, normalize_phone, CODE_LEN};
use crate::schema::NewPhoneVerification;

/// 生成 6 位数字验证码
pub fn generate_code() -> String {
    let mut rng = rand::rng();
    (0..CODE_LEN)
        .map(|_| char::from(b'0' + rng.random_range(0..10u8)))
        .collect()
}

/// 为手机号创建一条新的验证记录
pub async fn issue_code<C>(
    db: &C,
    draft: NewPhoneVerification,
    ttl: Duration,
) -> AppResult<phone_verification::Model>
where
    C: ConnectionTrait + TransactionTrait,
{
    issue_with_code(db, draft, generate_code(), ttl).await
}

/// 同一手机号只保留最新一条待验证记录，旧记录在新记录写入的同一事务中置为过期
async fn issue_with_code<C>(
    db: &C,
    draft: NewPhoneVerification,
    code: String,
    ttl: Duration,
) -> AppResult<phone_verification::Model>
where
    C: ConnectionTrait + TransactionTrait,
{
    let now = Utc::now().naive_utc();
    let phone_number = normalize_phone(&draft.phone_number);
    let new_record = draft.validate(code, now, ttl)?;

    let txn = db.begin().await?;
    let superseded = PhoneVerification::update_many()
        .col_expr(phone_verification::Column::ExpiresAt, Expr::value(now))
        .filter(phone_verification::Column::PhoneNumber.eq(phone_number.as_str()))
        .filter(phone_verification::Column::Verified.eq(false))
        .filter(phone_verification::Column::ExpiresAt.gt(now))
        .exec(&txn)
        .await?;
    let record = new_record.insert(&txn).await?;
    txn.commit().await?;

    if superseded.rows_affected > 0 {
        tracing::debug!("手机号 {} 的 {} 条旧验证码已失效", phone_number, superseded.rows_affected);
    }
    // 短信通道不在本服务内，验证码只写日志
    tracing::debug!("手机号 {} 验证码: {}", record.phone_number, record.code);
    tracing::info!("📱 已为 {} 生成验证码，过期时间 {}", record.phone_number, record.expires_at);
    Ok(record)
}

/// 查找仍然有效的验证码：未验证且未过期
pub async fn find_valid_code<C: ConnectionTrait>(
    db: &C,
    phone_number: &str,
    code: &str,
    now: NaiveDateTime,
) -> AppResult<Option<phone_verification::Model>> {
    let record = PhoneVerification::find()
        .filter(phone_verification::Column::PhoneNumber.eq(normalize_phone(phone_number)))
        .filter(phone_verification::Column::Code.eq(code))
        .filter(phone_verification::Column::Verified.eq(false))
        .filter(phone_verification::Column::ExpiresAt.gt(now))
        .order_by_desc(phone_verification::Column::CreatedAt)
        .one(db)
        .await?;
    Ok(record)
}

/// 校验验证码
///
/// 只接受该手机号最新一条待验证记录的验证码。该记录承担尝试计数：
/// 达到上限后不再接受校验，验证码不匹配时计数原子 +1。
pub async fn confirm_code<C: ConnectionTrait>(
    db: &C,
    phone_number: &str,
    code: &str,
    now: NaiveDateTime,
) -> AppResult<phone_verification::Model> {
    let phone_number = normalize_phone(phone_number);
    if !is_code(code) {
        return Err(AppError::validation("code must be 6 digits"));
    }

    let pending = PhoneVerification::find()
        .filter(phone_verification::Column::PhoneNumber.eq(phone_number.as_str()))
        .filter(phone_verification::Column::Verified.eq(false))
        .filter(phone_verification::Column::ExpiresAt.gt(now))
        .order_by_desc(phone_verification::Column::CreatedAt)
        .order_by_desc(phone_verification::Column::Id)
        .one(db)
        .await?
        .ok_or_else(|| {
            AppError::not_found(format!("no pending verification for {}", phone_number))
        })?;

    if pending.attempts >= MAX_ATTEMPTS {
        return Err(AppError::validation("too many attempts, request a new code"));
    }

    let matched = match find_valid_code(db, &phone_number, code, now).await? {
        Some(record) if record.id == pending.id && record.attempts < MAX_ATTEMPTS => record,
        _ => {
            PhoneVerification::update_many()
                .col_expr(
                    phone_verification::Column::Attempts,
                    Expr::col(phone_verification::Column::Attempts).add(1),
                )
                .filter(phone_verification::Column::Id.eq(pending.id))
                .filter(phone_verification::Column::Attempts.lt(MAX_ATTEMPTS))
                .exec(db)
                .await?;
            tracing::warn!("手机号 {} 验证码错误 (第 {} 次)", phone_number, pending.attempts + 1);
            return Err(AppError::validation("invalid verification code"));
        }
    };

    let mut active: phone_verification::ActiveModel = matched.into();
    active.verified = Set(true);
    let verified = active.update(db).await?;

    tracing::info!("✅ 手机号 {} 验证成功", phone_number);
    Ok(verified)
}

/// 删除所有已过期的验证记录，返回删除条数
pub async fn purge_expired<C: ConnectionTrait>(db: &C, now: NaiveDateTime) -> AppResult<u64> {
    let result = PhoneVerification::delete_many()
        .filter(phone_verification::Column::ExpiresAt.lte(now))
        .exec(db)
        .await?;
    Ok(result.rows_affected)
}

/// 启动过期验证码清理后台任务
pub fn start_expiry_sweeper(db: DatabaseConnection, every: StdDuration) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(every);

        loop {
            interval.tick().await;

            match purge_expired(&db, Utc::now().naive_utc()).await {
                Ok(0) => {}
                Ok(removed) => tracing::info!("🧹 已清理 {} 条过期验证码", removed),
                Err(e) => tracing::error!("清理过期验证码失败: {}", e),
            }
        }
    })
}
