use std::sync::Arc;

use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use crate::auth::JwtService;
use crate::core::Config;
use crate::db::DbService;
use crate::services::ImageStore;

/// 服务器状态 - 持有所有服务的共享引用
///
/// 配置和 JWT 服务在启动后只读；Clone 成本极低 (Arc / 内部引用计数)。
///
/// # 服务组件
///
/// | 字段 | 类型 | 说明 |
/// |------|------|------|
/// | config | Config | 配置项 (不可变) |
/// | db | Surreal<Db> | 嵌入式数据库 |
/// | jwt_service | Arc<JwtService> | JWT 认证服务 |
/// | image_store | ImageStore | 上传图片存储 |
#[derive(Clone, Debug)]
pub struct ServerState {
    /// 服务器配置
    pub config: Config,
    /// 嵌入式数据库 (SurrealDB)
    pub db: Surreal<Db>,
    /// JWT 认证服务 (Arc 共享所有权)
    pub jwt_service: Arc<JwtService>,
    /// 上传图片存储
    pub image_store: ImageStore,
}

impl ServerState {
    /// 创建服务器状态 (手动构造)
    ///
    /// 通常使用 [`Self::initialize`] 方法代替；测试场景直接传入
    /// 内存数据库和临时目录。
    pub fn new(
        config: Config,
        db: Surreal<Db>,
        jwt_service: Arc<JwtService>,
        image_store: ImageStore,
    ) -> Self {
        Self {
            config,
            db,
            jwt_service,
            image_store,
        }
    }

    /// 初始化服务器状态
    ///
    /// 按顺序初始化：
    /// 1. 工作目录结构 (确保目录存在)
    /// 2. 数据库 (work_dir/database)
    /// 3. JWT 服务和图片存储
    pub async fn initialize(config: &Config) -> anyhow::Result<Self> {
        config.ensure_work_dir_structure()?;

        let db_service = DbService::new(&config.database_dir()).await?;

        let jwt_service = Arc::new(JwtService::with_config(config.jwt.clone()));
        let image_store = ImageStore::new(config.uploads_dir(), config.public_url.clone())?;

        Ok(Self::new(
            config.clone(),
            db_service.db,
            jwt_service,
            image_store,
        ))
    }

    /// 获取数据库实例
    pub fn get_db(&self) -> Surreal<Db> {
        self.db.clone()
    }

    /// 获取 JWT 服务
    pub fn get_jwt_service(&self) -> Arc<JwtService> {
        self.jwt_service.clone()
    }
}
