//! 写入前的数据校验
//!
//! 每种记录对应一个 `NewXxx` 草稿，`validate()` 检查所有约束后
//! 返回可以直接插入的 `ActiveModel`，否则返回 [`AppError::Validation`]。
//! 唯一约束和索引由迁移声明，交给数据库保证。

pub mod banner;
pub mod message;
pub mod phone_verification;
pub mod rating;
pub mod subscription;

pub use banner::NewBanner;
pub use message::NewMessage;
pub use phone_verification::NewPhoneVerification;
pub use rating::NewRating;
pub use subscription::NewSubscription;

use crate::error::{AppError, AppResult};

/// 必填字符串：去掉首尾空白后不能为空，且不超过 `max` 个字符
pub(crate) fn required(field: &str, value: &str, max: usize) -> AppResult<String> {
    let value = value.trim();
    if value.is_empty() {
        return Err(AppError::validation(format!("{} is required", field)));
    }
    bounded(field, value, max)
}

/// 选填字符串：空白视为未填写
pub(crate) fn optional(field: &str, value: Option<String>, max: usize) -> AppResult<Option<String>> {
    match value.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) => bounded(field, value, max).map(Some),
    }
}

fn bounded(field: &str, value: &str, max: usize) -> AppResult<String> {
    if value.chars().count() > max {
        return Err(AppError::validation(format!(
            "{} must be at most {} characters",
            field, max
        )));
    }
    Ok(value.to_string())
}

/// 宽松的邮箱格式检查：local@domain.tld
pub(crate) fn is_email(value: &str) -> bool {
    let Some((local, domain)) = value.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && !value.chars().any(char::is_whitespace)
        && !domain.contains('@')
        && domain
            .split_once('.')
            .is_some_and(|(host, tld)| !host.is_empty() && !tld.is_empty() && !tld.ends_with('.'))
}

/// 手机号：可选的 `+` 前缀，后接 7~15 位数字
pub(crate) fn is_phone_number(value: &str) -> bool {
    let digits = value.strip_prefix('+').unwrap_or(value);
    (7..=15).contains(&digits.len()) && digits.chars().all(|c| c.is_ascii_digit())
}
