//! API 路由模块
//!
//! # 结构
//!
//! - [`auth`] - 注册和登录接口
//! - [`health`] - 健康检查
//! - [`employees`] - 员工管理接口 (需认证)
//! - [`upload`] - 上传图片的静态访问

pub mod auth;
pub mod employees;
pub mod health;
pub mod upload;
