//! 认证模块
//!
//! JWT 令牌服务和认证中间件：
//!
//! - [`JwtService`] - 令牌生成和验证
//! - [`require_auth`] - Bearer 令牌认证中间件
//! - [`CurrentUser`] - 认证后的用户上下文

pub mod jwt;
pub mod middleware;

pub use jwt::{Claims, CurrentUser, JwtConfig, JwtError, JwtService};
pub use middleware::require_auth;
