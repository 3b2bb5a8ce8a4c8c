//! Directory Server - 员工目录后端
//!
//! # 架构概述
//!
//! 提供以下核心功能：
//!
//! - **认证** (`auth`): JWT + Argon2 认证体系
//! - **数据库** (`db`): 嵌入式 SurrealDB 存储，模型与仓储层
//! - **图片存储** (`services`): 上传图片的验证和落盘
//! - **HTTP API** (`api`): RESTful API 接口
//!
//! # 模块结构
//!
//! ```text
//! src/
//! ├── core/          # 配置、状态、服务器
//! ├── auth/          # JWT 认证中间件
//! ├── db/            # 数据库层 (models + repository)
//! ├── services/      # 图片存储
//! ├── api/           # HTTP 路由和处理器
//! └── utils/         # 错误、验证、日志
//! ```

pub mod api;
pub mod auth;
pub mod core;
pub mod db;
pub mod services;
pub mod utils;

// Re-export 公共类型
pub use auth::{CurrentUser, JwtService};
pub use core::{Config, Server, ServerState};
pub use utils::{AppError, AppResult};

/// 设置运行环境 (dotenv + 日志)
pub fn setup_environment() -> Result<(), Box<dyn std::error::Error>> {
    dotenv::dotenv().ok();
    utils::logger::init_logger();
    Ok(())
}

pub fn print_banner() {
    println!(
        r#"
    ____  _                __
   / __ \(_)_______  _____/ /_____  _______  __
  / / / / / ___/ _ \/ ___/ __/ __ \/ ___/ / / /
 / /_/ / / /  /  __/ /__/ /_/ /_/ / /  / /_/ /
/_____/_/_/   \___/\___/\__/\____/_/   \__, /
                                      /____/
    "#
    );
}
