use std::path::PathBuf;

use crate::auth::JwtConfig;

/// 服务器配置
///
/// # 环境变量
///
/// | 环境变量 | 默认值 | 说明 |
/// |----------|--------|------|
/// | WORK_DIR | ./data | 工作目录 (数据库、上传文件) |
/// | HTTP_PORT | 5000 | HTTP 服务端口 |
/// | PUBLIC_URL | http://localhost:{HTTP_PORT} | 图片 URL 前缀 |
/// | JWT_SECRET | (必填) | 令牌签名密钥，缺失则启动失败 |
/// | JWT_EXPIRATION_MINUTES | 60 | 令牌过期时间 |
/// | ENVIRONMENT | development | 运行环境 |
///
/// # 示例
///
/// ```ignore
/// WORK_DIR=/data/directory HTTP_PORT=8080 JWT_SECRET=... cargo run
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// 工作目录，存储数据库和上传文件
    pub work_dir: String,
    /// HTTP API 服务端口
    pub http_port: u16,
    /// 对外可达的基础 URL (scheme + host)，用于构造图片 URL
    pub public_url: String,
    /// JWT 认证配置
    pub jwt: JwtConfig,
    /// 运行环境: development | staging | production
    pub environment: String,
}

impl Config {
    /// 从环境变量加载配置
    ///
    /// 除 `JWT_SECRET` 外的配置项缺失时使用默认值；
    /// `JWT_SECRET` 缺失或过短会返回错误，进程应当拒绝启动。
    pub fn from_env() -> anyhow::Result<Self> {
        let jwt = JwtConfig::from_env()?;

        let http_port = std::env::var("HTTP_PORT")
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(5000);

        Ok(Self {
            work_dir: std::env::var("WORK_DIR").unwrap_or_else(|_| "./data".into()),
            http_port,
            public_url: std::env::var("PUBLIC_URL")
                .unwrap_or_else(|_| format!("http://localhost:{}", http_port)),
            jwt,
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into()),
        })
    }

    /// 使用固定值构造配置
    ///
    /// 常用于测试场景，不读取环境变量
    pub fn with_overrides(work_dir: impl Into<String>, http_port: u16) -> Self {
        Self {
            work_dir: work_dir.into(),
            http_port,
            public_url: format!("http://localhost:{}", http_port),
            jwt: JwtConfig {
                secret: "local-test-secret-local-test-secret!".to_string(),
                expiration_minutes: 60,
                issuer: "directory-server".to_string(),
                audience: "directory-clients".to_string(),
            },
            environment: "development".to_string(),
        }
    }

    /// 数据库目录 (work_dir/database)
    pub fn database_dir(&self) -> PathBuf {
        PathBuf::from(&self.work_dir).join("database")
    }

    /// 上传文件目录 (work_dir/uploads)
    pub fn uploads_dir(&self) -> PathBuf {
        PathBuf::from(&self.work_dir).join("uploads")
    }

    /// 确保工作目录结构存在 (幂等)
    pub fn ensure_work_dir_structure(&self) -> std::io::Result<()> {
        std::fs::create_dir_all(self.database_dir())?;
        std::fs::create_dir_all(self.uploads_dir())?;
        Ok(())
    }

    /// 是否生产环境
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    /// 是否开发环境
    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }
}
