/*!
 * 错误处理模块
 *
 * 定义了应用程序中所有可能出现的错误类型，并提供统一的错误处理机制。
 * 所有错误都会被转换为 `{"msg": "..."}` 形式的 JSON 响应，
 * 确保客户端能够获得有意义的错误信息。
 */

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use tracing::error;

/// 应用程序结果类型的别名
///
/// 所有可能失败的操作都应该返回这个类型，统一错误处理
pub type AppResult<T> = Result<T, AppError>;

/// 映射为 400 "Bad Request" 的 PostgreSQL 错误码：
/// 输入语法无效、非空约束冲突、外键约束冲突、SQL 语法错误
const PG_BAD_REQUEST_CODES: [&str; 4] = ["22P02", "23502", "23503", "42601"];

/// 应用程序错误枚举
///
/// 定义了所有可能出现的错误情况，每种错误都会映射到相应的 HTTP 状态码
#[derive(Error, Debug)]
pub enum AppError {
    /// 数据库操作错误
    /// 包括连接失败、查询错误、约束冲突等
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// 数据库迁移错误
    /// 在应用启动时执行数据库迁移失败
    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    /// 请求验证错误
    /// 请求参数格式错误、必填字段缺失等，消息原样返回给客户端
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// 资源未找到错误
    /// 请求的资源不存在，消息原样返回给客户端
    #[error("Not found: {0}")]
    NotFound(String),

    /// JSON 解析错误
    /// 内置 endpoints 目录的 JSON 格式错误
    #[error("JSON parsing error: {0}")]
    JsonParsing(#[from] serde_json::Error),

    /// 配置错误
    /// 环境变量缺失、配置格式错误等
    #[error("Configuration error: {0}")]
    Config(String),

    /// 内部服务器错误
    /// 未预期的错误情况
    #[error("Internal server error: {0}")]
    Internal(String),
}

impl IntoResponse for AppError {
    /// 将错误转换为 HTTP 响应
    ///
    /// 结构化错误（BadRequest / NotFound）原样返回其消息；
    /// 数据库错误按 SQLSTATE 归类为 400 或 500；其余一律 500
    fn into_response(self) -> Response {
        let (status, msg) = match &self {
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg.clone()),
            AppError::Database(err) if is_bad_request_code(err) => {
                (StatusCode::BAD_REQUEST, "Bad Request".to_string())
            }
            _ => {
                error!("Unhandled error: {}", self);
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error".to_string())
            }
        };

        // 构造 JSON 错误响应
        let body = Json(json!({ "msg": msg }));

        (status, body).into_response()
    }
}

fn is_bad_request_code(err: &sqlx::Error) -> bool {
    err.as_database_error()
        .and_then(|db_err| db_err.code())
        .map(|code| PG_BAD_REQUEST_CODES.contains(&code.as_ref()))
        .unwrap_or(false)
}
