use axum::routing::{get, post, put};
use axum::{Extension, Router};
use tower_http::cors::CorsLayer;
use tracing::info;

use crate::AppState;

pub mod extract;
pub mod handlers;

/// 构建完整路由
pub fn build_router(app_state: AppState) -> Router {
    let api_routes = Router::new()
        // 广告位
        .route("/banners", get(handlers::list_banners).post(handlers::create_banner))
        .route("/banners/{id}", get(handlers::get_banner))
        .route("/banners/{id}/analytics", post(handlers::record_banner_analytics))
        // 正规化基金
        .route("/fund/tracker", get(handlers::get_fund_tracker))
        // 留言
        .route(
            "/businesses/{business_id}/messages",
            get(handlers::list_messages).post(handlers::create_message),
        )
        .route("/messages/{id}/status", put(handlers::update_message_status))
        // 评分
        .route(
            "/businesses/{business_id}/ratings",
            get(handlers::list_ratings).post(handlers::create_rating),
        )
        // 订阅
        .route(
            "/businesses/{business_id}/subscription",
            get(handlers::get_subscription).post(handlers::create_subscription),
        )
        // 手机验证
        .route("/verifications/phone", post(handlers::request_phone_verification))
        .route("/verifications/phone/confirm", post(handlers::confirm_phone_verification))
        // 添加应用状态
        .layer(Extension(app_state));

    // HTML 组件片段
    let ui_routes = Router::new()
        .route("/trust-badge/{level}", get(handlers::trust_badge))
        .route("/businesses/{business_id}/contact-form", get(handlers::contact_form))
        .route("/businesses/{business_id}/rating-form", get(handlers::rating_form));

    Router::new()
        .nest("/api", api_routes)
        .nest("/ui", ui_routes)
        .layer(CorsLayer::permissive())
}

/// 启动 Web API 服务
pub fn start_web_server(app_state: AppState) -> tokio::task::JoinHandle<()> {
    let web_port = app_state.config.web_port;

    tokio::spawn(async move {
        let app = build_router(app_state);

        let web_addr = format!("0.0.0.0:{}", web_port);
        match tokio::net::TcpListener::bind(web_addr.clone()).await {
            Ok(listener) => {
                info!("🌐 API 服务: http://{}", web_addr);
                if let Err(err) = axum::serve(listener, app).await {
                    tracing::error!("Web服务错误：{}", err);
                }
            }
            Err(err) => {
                tracing::error!("Web服务启动失败：{}", err);
            }
        }
    })
}
