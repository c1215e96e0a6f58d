//! 商家目录服务：广告位统计、正规化基金、留言/评分/订阅/手机验证记录，
//! 以及少量无状态的 HTML 组件。

use std::sync::Arc;

use sea_orm::DatabaseConnection;

pub mod analytics;
pub mod api;
pub mod config;
pub mod entity;
pub mod error;
pub mod fund;
pub mod ids;
pub mod migration;
pub mod schema;
pub mod ui;
pub mod verification;

/// 应用状态
#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub config: Arc<config::Config>,
}

impl AppState {
    pub fn new(db: DatabaseConnection, config: config::Config) -> Self {
        AppState {
            db,
            config: Arc::new(config),
        }
    }
}
