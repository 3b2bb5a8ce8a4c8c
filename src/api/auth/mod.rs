//! Authentication API Module
//!
//! 公共路由 (无需认证)：注册和登录。

mod handler;

use axum::{Router, routing::post};

use crate::core::ServerState;

/// Auth router
pub fn router() -> Router<ServerState> {
    Router::new()
        .route("/api/register", post(handler::register))
        .route("/api/login", post(handler::login))
}
