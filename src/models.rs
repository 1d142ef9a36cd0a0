use crate::error::{AppError, AppResult};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Topic {
    pub slug: String,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct User {
    pub username: String,
    pub name: String,
    pub avatar_url: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Article {
    pub article_id: i32,
    pub author: String,
    pub title: String,
    pub body: String,
    pub topic: String,
    pub created_at: DateTime<Utc>,
    pub votes: i32,
    pub article_img_url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct ArticleSummary {
    pub author: String,
    pub title: String,
    pub article_id: i32,
    pub topic: String,
    pub created_at: DateTime<Utc>,
    pub votes: i32,
    pub article_img_url: String,
    pub comment_count: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct ArticleDetail {
    pub author: String,
    pub title: String,
    pub article_id: i32,
    pub body: String,
    pub topic: String,
    pub created_at: DateTime<Utc>,
    pub votes: i32,
    pub article_img_url: String,
    pub comment_count: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Comment {
    pub comment_id: i32,
    pub body: String,
    pub article_id: i32,
    pub author: String,
    pub votes: i32,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
pub struct ArticleQuery {
    pub topic: Option<String>,
    pub sort_by: Option<String>,
    pub order: Option<String>,
    pub limit: Option<String>,
    pub p: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct PageQuery {
    pub limit: Option<String>,
    pub p: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct NewArticle {
    pub author: Option<String>,
    pub title: Option<String>,
    pub body: Option<String>,
    pub topic: Option<String>,
    pub article_img_url: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct NewComment {
    pub username: Option<String>,
    pub body: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct VoteUpdate {
    pub inc_votes: Option<Value>,
}

impl VoteUpdate {
    /// 缺失或非整数的 inc_votes 与数据库类型错误同样映射为 400
    pub fn delta(&self) -> AppResult<i32> {
        self.inc_votes
            .as_ref()
            .and_then(Value::as_i64)
            .and_then(|value| i32::try_from(value).ok())
            .ok_or_else(|| AppError::BadRequest("Bad Request".to_string()))
    }
}

#[derive(Debug, Serialize)]
pub struct TopicsResponse {
    pub topics: Vec<Topic>,
}

#[derive(Debug, Serialize)]
pub struct ArticlesResponse {
    pub articles: Vec<ArticleSummary>,
}

#[derive(Debug, Serialize)]
pub struct ArticleResponse<T: Serialize> {
    pub article: T,
}

#[derive(Debug, Serialize)]
pub struct CommentsResponse {
    pub comments: Vec<Comment>,
}

#[derive(Debug, Serialize)]
pub struct CommentResponse {
    pub comment: Comment,
}

#[derive(Debug, Serialize)]
pub struct UsersResponse {
    pub users: Vec<User>,
}

#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub user: User,
}

#[derive(Debug, Serialize)]
pub struct EndpointsResponse {
    pub endpoints: Value,
}

/// 文章列表允许排序的列，封闭枚举，用户输入永远不会拼接进 SQL 文本
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortBy {
    ArticleId,
    Title,
    Topic,
    Author,
    CreatedAt,
    Votes,
    CommentCount,
}

impl SortBy {
    pub fn parse(value: Option<&str>) -> AppResult<Self> {
        match value {
            None => Ok(SortBy::CreatedAt),
            Some("article_id") => Ok(SortBy::ArticleId),
            Some("title") => Ok(SortBy::Title),
            Some("topic") => Ok(SortBy::Topic),
            Some("author") => Ok(SortBy::Author),
            Some("created_at") => Ok(SortBy::CreatedAt),
            Some("votes") => Ok(SortBy::Votes),
            Some("comment_count") => Ok(SortBy::CommentCount),
            Some(_) => Err(AppError::BadRequest(
                "Invalid sort by option given".to_string(),
            )),
        }
    }

    pub fn column(&self) -> &'static str {
        match self {
            SortBy::ArticleId => "articles.article_id",
            SortBy::Title => "articles.title",
            SortBy::Topic => "articles.topic",
            SortBy::Author => "articles.author",
            SortBy::CreatedAt => "articles.created_at",
            SortBy::Votes => "articles.votes",
            SortBy::CommentCount => "comment_count",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Asc,
    Desc,
}

impl SortOrder {
    pub fn parse(value: Option<&str>) -> AppResult<Self> {
        match value {
            None => Ok(SortOrder::Desc),
            Some("asc") => Ok(SortOrder::Asc),
            Some("desc") => Ok(SortOrder::Desc),
            Some(_) => Err(AppError::BadRequest(
                "Invalid order option given".to_string(),
            )),
        }
    }

    pub fn keyword(&self) -> &'static str {
        match self {
            SortOrder::Asc => "ASC",
            SortOrder::Desc => "DESC",
        }
    }
}

/// 偏移式分页：OFFSET = limit * (p - 1)，默认每页 10 条、第 1 页
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub limit: i64,
    pub offset: i64,
}

impl Pagination {
    pub fn parse(limit: Option<&str>, p: Option<&str>) -> AppResult<Self> {
        let limit = match limit {
            None => 10,
            Some(raw) => raw
                .parse::<i64>()
                .map_err(|_| AppError::BadRequest("Invalid limit/page option given".to_string()))?,
        };

        let page = match p {
            None => 1,
            Some(raw) => raw
                .parse::<i64>()
                .map_err(|_| AppError::BadRequest("Invalid limit/page option given".to_string()))?,
        };

        let offset = page
            .checked_sub(1)
            .and_then(|pages_before| limit.checked_mul(pages_before))
            .ok_or_else(|| AppError::BadRequest("Invalid limit/page option given".to_string()))?;

        Ok(Pagination { limit, offset })
    }
}
