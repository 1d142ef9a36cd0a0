/*!
 * 数据库操作模块
 *
 * 提供 PostgreSQL 数据库的操作接口：
 * - 话题查询
 * - 文章查询与增删改
 * - 评论查询与增删改
 * - 用户查询
 */

use crate::error::{AppError, AppResult};
use crate::models::{
    Article, ArticleDetail, ArticleSummary, Comment, Pagination, SortBy, SortOrder, Topic, User,
};
use sqlx::{PgPool, Pool, Postgres, QueryBuilder};

/// 文章缺省配图，与原始数据一致
pub const DEFAULT_ARTICLE_IMG_URL: &str =
    "https://images.pexels.com/photos/97050/pexels-photo-97050.jpeg?w=700&h=700";

#[derive(Clone)]
pub struct Database {
    pool: Pool<Postgres>,
}

impl Database {
    pub async fn new(database_url: &str) -> AppResult<Self> {
        let pool = PgPool::connect(database_url).await?;
        Ok(Database { pool })
    }

    pub async fn new_with_migrations(database_url: &str) -> AppResult<Self> {
        let pool = PgPool::connect(database_url).await?;
        let db = Database { pool };
        db.migrate().await?;
        Ok(db)
    }

    pub async fn migrate(&self) -> AppResult<()> {
        sqlx::migrate!("./migrations").run(&self.pool).await?;
        Ok(())
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    // ---------------------------------------------------------------------
    // 话题
    // ---------------------------------------------------------------------

    pub async fn fetch_topics(&self) -> AppResult<Vec<Topic>> {
        let topics = sqlx::query_as::<_, Topic>("SELECT slug, description FROM topics")
            .fetch_all(&self.pool)
            .await?;

        Ok(topics)
    }

    /// 话题过滤参数缺省时直接通过；给定但不存在时拒绝 404
    pub async fn check_topic_exists(&self, slug: Option<&str>) -> AppResult<()> {
        let Some(slug) = slug else {
            return Ok(());
        };

        let row = sqlx::query("SELECT slug FROM topics WHERE slug = $1")
            .bind(slug)
            .fetch_optional(&self.pool)
            .await?;

        if row.is_none() {
            return Err(AppError::NotFound("Topic not found".to_string()));
        }

        Ok(())
    }

    // ---------------------------------------------------------------------
    // 文章
    // ---------------------------------------------------------------------

    /// 文章列表查询
    ///
    /// 排序列与方向来自封闭枚举，分页值作为绑定参数传入，
    /// 话题过滤同样使用绑定参数，不拼接任何用户输入
    pub async fn fetch_articles(
        &self,
        topic: Option<&str>,
        sort_by: SortBy,
        order: SortOrder,
        page: Pagination,
    ) -> AppResult<Vec<ArticleSummary>> {
        let mut query_builder = QueryBuilder::<Postgres>::new(
            "SELECT articles.author, articles.title, articles.article_id, articles.topic, \
             articles.created_at, articles.votes, articles.article_img_url, \
             COUNT(comments.comment_id)::INT AS comment_count \
             FROM articles \
             LEFT JOIN comments ON articles.article_id = comments.article_id",
        );

        if let Some(topic) = topic {
            query_builder
                .push(" WHERE articles.topic = ")
                .push_bind(topic);
        }

        query_builder.push(" GROUP BY articles.article_id");

        query_builder
            .push(" ORDER BY ")
            .push(sort_by.column())
            .push(" ")
            .push(order.keyword());

        query_builder
            .push(" LIMIT ")
            .push_bind(page.limit)
            .push(" OFFSET ")
            .push_bind(page.offset);

        let articles = query_builder
            .build_query_as::<ArticleSummary>()
            .fetch_all(&self.pool)
            .await?;

        Ok(articles)
    }

    pub async fn fetch_article_by_id(&self, article_id: i32) -> AppResult<ArticleDetail> {
        let article = sqlx::query_as::<_, ArticleDetail>(
            r#"
            SELECT
                articles.author,
                articles.title,
                articles.article_id,
                articles.body,
                articles.topic,
                articles.created_at,
                articles.votes,
                articles.article_img_url,
                COUNT(comments.comment_id)::INT AS comment_count
            FROM articles
            LEFT JOIN comments ON articles.article_id = comments.article_id
            WHERE articles.article_id = $1
            GROUP BY articles.article_id
            "#,
        )
        .bind(article_id)
        .fetch_optional(&self.pool)
        .await?;

        article.ok_or_else(|| AppError::NotFound("No article found".to_string()))
    }

    pub async fn check_article_exists(&self, article_id: i32) -> AppResult<()> {
        let row = sqlx::query("SELECT article_id FROM articles WHERE article_id = $1")
            .bind(article_id)
            .fetch_optional(&self.pool)
            .await?;

        if row.is_none() {
            return Err(AppError::NotFound("No article found".to_string()));
        }

        Ok(())
    }

    pub async fn insert_article(
        &self,
        author: &str,
        title: &str,
        body: &str,
        topic: &str,
        article_img_url: Option<&str>,
    ) -> AppResult<i32> {
        let article = sqlx::query_as::<_, Article>(
            r#"
            INSERT INTO articles
                (author, title, body, topic, article_img_url)
            VALUES
                ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(author)
        .bind(title)
        .bind(body)
        .bind(topic)
        .bind(article_img_url.unwrap_or(DEFAULT_ARTICLE_IMG_URL))
        .fetch_one(&self.pool)
        .await?;

        Ok(article.article_id)
    }

    pub async fn update_article_votes(&self, article_id: i32, delta: i32) -> AppResult<Article> {
        let article = sqlx::query_as::<_, Article>(
            r#"
            UPDATE articles
            SET votes = votes + $1
            WHERE article_id = $2
            RETURNING *
            "#,
        )
        .bind(delta)
        .bind(article_id)
        .fetch_optional(&self.pool)
        .await?;

        article.ok_or_else(|| AppError::NotFound("No article found".to_string()))
    }

    /// 先删除文章的评论再删除文章自身，顺序保证外键不被违反
    pub async fn delete_article(&self, article_id: i32) -> AppResult<()> {
        sqlx::query("DELETE FROM comments WHERE article_id = $1")
            .bind(article_id)
            .execute(&self.pool)
            .await?;

        let result = sqlx::query("DELETE FROM articles WHERE article_id = $1")
            .bind(article_id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("No article found".to_string()));
        }

        Ok(())
    }

    // ---------------------------------------------------------------------
    // 评论
    // ---------------------------------------------------------------------

    pub async fn fetch_article_comments(
        &self,
        article_id: i32,
        page: Pagination,
    ) -> AppResult<Vec<Comment>> {
        let comments = sqlx::query_as::<_, Comment>(
            r#"
            SELECT comment_id, body, article_id, author, votes, created_at
            FROM comments
            WHERE article_id = $1
            ORDER BY created_at DESC
            LIMIT $2 OFFSET $3
            "#,
        )
        .bind(article_id)
        .bind(page.limit)
        .bind(page.offset)
        .fetch_all(&self.pool)
        .await?;

        Ok(comments)
    }

    pub async fn insert_comment(
        &self,
        article_id: i32,
        username: &str,
        body: &str,
    ) -> AppResult<Comment> {
        let comment = sqlx::query_as::<_, Comment>(
            r#"
            INSERT INTO comments
                (body, article_id, author)
            VALUES
                ($1, $2, $3)
            RETURNING comment_id, body, article_id, author, votes, created_at
            "#,
        )
        .bind(body)
        .bind(article_id)
        .bind(username)
        .fetch_one(&self.pool)
        .await?;

        Ok(comment)
    }

    pub async fn update_comment_votes(&self, comment_id: i32, delta: i32) -> AppResult<Comment> {
        let comment = sqlx::query_as::<_, Comment>(
            r#"
            UPDATE comments
            SET votes = votes + $1
            WHERE comment_id = $2
            RETURNING comment_id, body, article_id, author, votes, created_at
            "#,
        )
        .bind(delta)
        .bind(comment_id)
        .fetch_optional(&self.pool)
        .await?;

        comment.ok_or_else(|| AppError::NotFound("Comment not found".to_string()))
    }

    pub async fn delete_comment(&self, comment_id: i32) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM comments WHERE comment_id = $1")
            .bind(comment_id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Comment not found".to_string()));
        }

        Ok(())
    }

    // ---------------------------------------------------------------------
    // 用户
    // ---------------------------------------------------------------------

    pub async fn fetch_users(&self) -> AppResult<Vec<User>> {
        let users = sqlx::query_as::<_, User>("SELECT username, name, avatar_url FROM users")
            .fetch_all(&self.pool)
            .await?;

        Ok(users)
    }

    pub async fn fetch_user_by_username(&self, username: &str) -> AppResult<User> {
        let user = sqlx::query_as::<_, User>(
            "SELECT username, name, avatar_url FROM users WHERE username = $1",
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;

        user.ok_or_else(|| AppError::NotFound("User not found".to_string()))
    }

    pub async fn check_username_exists(&self, username: &str) -> AppResult<()> {
        let row = sqlx::query("SELECT username FROM users WHERE username = $1")
            .bind(username)
            .fetch_optional(&self.pool)
            .await?;

        if row.is_none() {
            return Err(AppError::NotFound("Username does not exist".to_string()));
        }

        Ok(())
    }
}
