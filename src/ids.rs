//! 外部实体的引用标识
//!
//! Business 和 User 不在本服务中定义，这里只保存它们的 id，
//! 不做存在性或级联校验。

use std::fmt;

use sea_orm::DeriveValueType;
use serde::{Deserialize, Serialize};

/// 商家 id
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, DeriveValueType, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BusinessId(pub i64);

/// 用户 id
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, DeriveValueType, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(pub i64);

impl fmt::Display for BusinessId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
