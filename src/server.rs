/*!
 * HTTP 服务器模块
 *
 * 负责启动和运行 HTTP 服务器，协调所有组件的初始化：
 * - 日志系统初始化
 * - 数据库连接和迁移
 * - 路由和中间件配置
 * - HTTP 服务器启动
 */

use crate::config::Config;
use crate::database::Database;
use crate::error::AppResult;
use crate::handlers::AppState;
use crate::logging;
use crate::routes::create_router;
use axum::serve;
use tokio::net::TcpListener;
use tracing::info;

/// HTTP 服务器结构体
///
/// 封装服务器配置和启动逻辑
pub struct Server {
    /// 应用配置
    config: Config,
}

impl Server {
    /// 创建新的服务器实例
    ///
    /// # 参数
    /// - `config`: 应用程序配置，包含数据库、服务器等设置
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// 启动并运行服务器
    ///
    /// 执行完整的服务器启动流程：
    /// 1. 初始化日志系统
    /// 2. 连接数据库并按配置执行迁移
    /// 3. 创建应用状态和路由
    /// 4. 绑定地址并启动 HTTP 服务器
    ///
    /// # 错误处理
    /// 启动过程中的任何错误都会导致服务器停止启动：
    /// - 日志系统初始化失败
    /// - 数据库连接失败
    /// - 端口绑定失败
    pub async fn run(&self) -> AppResult<()> {
        // 第一步：初始化日志系统
        // 必须首先配置日志，以便后续步骤的日志能够正确输出
        logging::init_logging(&self.config.log_level).map_err(|e| {
            crate::error::AppError::Config(format!("Failed to initialize logging: {}", e))
        })?;

        // 输出启动信息
        info!("Starting Newswire Server v{}", env!("CARGO_PKG_VERSION"));
        info!("Log level: {}", self.config.log_level);

        // 第二步：初始化数据库连接
        info!(
            "Connecting to database: {}",
            // 隐藏密码信息，仅显示主机和数据库名
            self.config.database_url.split('@').last().unwrap_or("***")
        );
        let db = Database::new(&self.config.database_url).await?;
        info!("Database connection established");

        // 根据配置决定是否执行数据库迁移
        if self.config.auto_migrate {
            info!("Running database migrations (AUTO_MIGRATE=true)...");
            db.migrate().await?;
            info!("Database migrations completed successfully");
        } else {
            info!("Skipping database migrations (AUTO_MIGRATE=false)");
            info!("Note: Please ensure database schema is up-to-date before starting");
        }

        // 第三步：创建应用状态
        let state = AppState { db };

        // 第四步：创建路由器
        // 配置所有 API 端点和中间件
        let app = create_router(state);

        // 第五步：绑定网络地址
        // 使用配置中的主机地址和端口
        let addr = format!("{}:{}", self.config.server_host, self.config.server_port);
        let listener = TcpListener::bind(&addr).await.map_err(|e| {
            crate::error::AppError::Config(format!("Failed to bind to address {}: {}", addr, e))
        })?;

        // 输出服务器启动信息和 API 文档
        info!("Server listening on http://{}", addr);
        info!("API Documentation:");
        info!("  GET /api - Endpoint directory");
        info!("  GET /api/topics - List topics");
        info!("  GET /api/articles - List articles (topic, sort_by, order, limit, p)");
        info!("  POST /api/articles - Create article");
        info!("  GET /api/articles/{{id}} - Fetch one article");
        info!("  PATCH /api/articles/{{id}} - Adjust article votes");
        info!("  DELETE /api/articles/{{id}} - Delete article and its comments");
        info!("  GET /api/articles/{{id}}/comments - List comments (limit, p)");
        info!("  POST /api/articles/{{id}}/comments - Add comment");
        info!("  PATCH /api/comments/{{id}} - Adjust comment votes");
        info!("  DELETE /api/comments/{{id}} - Delete comment");
        info!("  GET /api/users - List users");
        info!("  GET /api/users/{{username}} - Fetch one user");

        // 第六步：启动 HTTP 服务器
        // 开始监听和处理客户端请求
        serve(listener, app)
            .await
            .map_err(|e| crate::error::AppError::Internal(format!("Server error: {}", e)))?;

        Ok(())
    }
}
