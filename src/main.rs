/*!
 * Newswire - 社区新闻 JSON API 服务
 *
 * 这是应用程序的主入口点，负责：
 * - 加载环境配置
 * - 初始化服务器
 * - 启动 HTTP 服务
 *
 * 服务提供文章、评论、话题和用户的读写接口，
 * 数据持久化委托给 PostgreSQL。
 */

use newswire::{config::Config, server::Server, AppResult};

/// 应用程序主入口点
///
/// 执行以下步骤：
/// 1. 从环境变量加载配置
/// 2. 创建服务器实例
/// 3. 启动异步服务器运行
///
/// # 错误处理
/// 如果配置加载或服务器启动失败，将返回相应的错误
#[tokio::main]
async fn main() -> AppResult<()> {
    // 从环境变量加载配置，如果失败则返回错误
    let config = Config::from_env()?;

    // 使用配置创建服务器实例
    let server = Server::new(config);

    // 启动服务器并运行直到收到停止信号
    server.run().await
}
