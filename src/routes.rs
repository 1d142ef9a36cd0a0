use crate::handlers::{
    delete_article, delete_comment, get_article, get_article_comments, get_articles,
    get_endpoints, get_topics, get_user, get_users, handle_unmatched_path, patch_article,
    patch_comment, post_article, post_comment, AppState,
};
use axum::{
    routing::{delete, get},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_methods(Any)
        .allow_headers(Any)
        .allow_origin(Any);

    Router::new()
        // Endpoint directory
        .route("/api", get(get_endpoints))

        // Topic routes
        .route("/api/topics", get(get_topics))

        // Article routes
        .route("/api/articles", get(get_articles).post(post_article))
        .route(
            "/api/articles/:article_id",
            get(get_article).patch(patch_article).delete(delete_article),
        )
        .route(
            "/api/articles/:article_id/comments",
            get(get_article_comments).post(post_comment),
        )

        // Comment routes
        .route(
            "/api/comments/:comment_id",
            delete(delete_comment).patch(patch_comment),
        )

        // User routes
        .route("/api/users", get(get_users))
        .route("/api/users/:username", get(get_user))

        .fallback(handle_unmatched_path)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
