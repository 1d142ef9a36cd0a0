use crate::database::Database;
use crate::error::{AppError, AppResult};
use crate::models::{
    Article, ArticleDetail, ArticleQuery, ArticleResponse, ArticlesResponse, CommentResponse,
    CommentsResponse, EndpointsResponse, NewArticle, NewComment, PageQuery, Pagination, SortBy,
    SortOrder, TopicsResponse, UserResponse, UsersResponse, VoteUpdate,
};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde_json::json;
use tracing::info;

#[derive(Clone)]
pub struct AppState {
    pub db: Database,
}

pub async fn get_endpoints() -> AppResult<Json<EndpointsResponse>> {
    let endpoints = serde_json::from_str(include_str!("../endpoints.json"))?;

    Ok(Json(EndpointsResponse { endpoints }))
}

pub async fn get_topics(State(state): State<AppState>) -> AppResult<Json<TopicsResponse>> {
    let topics = state.db.fetch_topics().await?;

    Ok(Json(TopicsResponse { topics }))
}

pub async fn get_articles(
    State(state): State<AppState>,
    Query(query): Query<ArticleQuery>,
) -> AppResult<Json<ArticlesResponse>> {
    // Validate everything up front so a bad parameter never reaches the database
    let sort_by = SortBy::parse(query.sort_by.as_deref())?;
    let order = SortOrder::parse(query.order.as_deref())?;
    let page = Pagination::parse(query.limit.as_deref(), query.p.as_deref())?;

    // Listing and topic-existence check run concurrently; the existence
    // check's rejection takes precedence over the listing result
    let (articles, topic_check) = tokio::join!(
        state
            .db
            .fetch_articles(query.topic.as_deref(), sort_by, order, page),
        state.db.check_topic_exists(query.topic.as_deref()),
    );

    topic_check?;

    Ok(Json(ArticlesResponse {
        articles: articles?,
    }))
}

pub async fn get_article(
    State(state): State<AppState>,
    Path(article_id): Path<String>,
) -> AppResult<Json<ArticleResponse<ArticleDetail>>> {
    let article_id = parse_id(&article_id)?;

    let article = state.db.fetch_article_by_id(article_id).await?;

    Ok(Json(ArticleResponse { article }))
}

pub async fn post_article(
    State(state): State<AppState>,
    Json(request): Json<NewArticle>,
) -> AppResult<(StatusCode, Json<ArticleResponse<ArticleDetail>>)> {
    let (Some(author), Some(title), Some(body), Some(topic)) = (
        request.author.as_deref(),
        request.title.as_deref(),
        request.body.as_deref(),
        request.topic.as_deref(),
    ) else {
        return Err(AppError::BadRequest("Bad Request".to_string()));
    };

    let article_id = state
        .db
        .insert_article(author, title, body, topic, request.article_img_url.as_deref())
        .await?;

    info!("Article {} created by {}", article_id, author);

    // Re-read so the response carries the derived comment_count
    let article = state.db.fetch_article_by_id(article_id).await?;

    Ok((StatusCode::CREATED, Json(ArticleResponse { article })))
}

pub async fn patch_article(
    State(state): State<AppState>,
    Path(article_id): Path<String>,
    Json(request): Json<VoteUpdate>,
) -> AppResult<Json<ArticleResponse<Article>>> {
    let article_id = parse_id(&article_id)?;
    let delta = request.delta()?;

    let article = state.db.update_article_votes(article_id, delta).await?;

    info!("Article {} votes adjusted by {}", article_id, delta);

    Ok(Json(ArticleResponse { article }))
}

pub async fn delete_article(
    State(state): State<AppState>,
    Path(article_id): Path<String>,
) -> AppResult<StatusCode> {
    let article_id = parse_id(&article_id)?;

    state.db.delete_article(article_id).await?;

    info!("Article {} deleted", article_id);

    Ok(StatusCode::NO_CONTENT)
}

pub async fn get_article_comments(
    State(state): State<AppState>,
    Path(article_id): Path<String>,
    Query(query): Query<PageQuery>,
) -> AppResult<Json<CommentsResponse>> {
    let article_id = parse_id(&article_id)?;
    let page = Pagination::parse(query.limit.as_deref(), query.p.as_deref())?;

    // A missing article 404s even though an empty comment list would not
    let (comments, article_check) = tokio::join!(
        state.db.fetch_article_comments(article_id, page),
        state.db.check_article_exists(article_id),
    );

    article_check?;

    Ok(Json(CommentsResponse {
        comments: comments?,
    }))
}

pub async fn post_comment(
    State(state): State<AppState>,
    Path(article_id): Path<String>,
    Json(request): Json<NewComment>,
) -> AppResult<(StatusCode, Json<CommentResponse>)> {
    let article_id = parse_id(&article_id)?;

    // Existence checks run in order: article first, then the author
    state.db.check_article_exists(article_id).await?;

    if let Some(username) = request.username.as_deref() {
        state.db.check_username_exists(username).await?;
    }

    let (Some(username), Some(body)) = (request.username.as_deref(), request.body.as_deref())
    else {
        return Err(AppError::BadRequest("Bad Request".to_string()));
    };

    let comment = state.db.insert_comment(article_id, username, body).await?;

    info!("Comment {} added to article {}", comment.comment_id, article_id);

    Ok((StatusCode::CREATED, Json(CommentResponse { comment })))
}

pub async fn patch_comment(
    State(state): State<AppState>,
    Path(comment_id): Path<String>,
    Json(request): Json<VoteUpdate>,
) -> AppResult<Json<CommentResponse>> {
    let comment_id = parse_id(&comment_id)?;
    let delta = request.delta()?;

    let comment = state.db.update_comment_votes(comment_id, delta).await?;

    info!("Comment {} votes adjusted by {}", comment_id, delta);

    Ok(Json(CommentResponse { comment }))
}

pub async fn delete_comment(
    State(state): State<AppState>,
    Path(comment_id): Path<String>,
) -> AppResult<StatusCode> {
    let comment_id = parse_id(&comment_id)?;

    state.db.delete_comment(comment_id).await?;

    info!("Comment {} deleted", comment_id);

    Ok(StatusCode::NO_CONTENT)
}

pub async fn get_users(State(state): State<AppState>) -> AppResult<Json<UsersResponse>> {
    let users = state.db.fetch_users().await?;

    Ok(Json(UsersResponse { users }))
}

pub async fn get_user(
    State(state): State<AppState>,
    Path(username): Path<String>,
) -> AppResult<Json<UserResponse>> {
    let user = state.db.fetch_user_by_username(&username).await?;

    Ok(Json(UserResponse { user }))
}

pub async fn handle_unmatched_path() -> (StatusCode, Json<serde_json::Value>) {
    (
        StatusCode::NOT_FOUND,
        Json(json!({ "msg": "Path not found" })),
    )
}

fn parse_id(raw: &str) -> AppResult<i32> {
    // Non-numeric path segments map to the same 400 the database would raise
    raw.parse::<i32>()
        .map_err(|_| AppError::BadRequest("Bad Request".to_string()))
}
