/*!
 * 种子数据模块
 *
 * 提供确定性的开发/测试数据集：先清空所有表并重置自增序列，
 * 再按固定顺序插入，保证文章和评论的 id 可预测。
 */

use crate::database::Database;
use crate::error::AppResult;

const TOPICS: &[(&str, &str)] = &[
    ("rust", "Systems programming talk"),
    ("gardening", "Growing things"),
    ("chess", "Openings, endgames, blunders"),
];

const USERS: &[(&str, &str, &str)] = &[
    (
        "sloe_gin",
        "Nina Okafor",
        "https://avatars.example.com/sloe_gin.png",
    ),
    (
        "parsnip_dev",
        "Priya Raman",
        "https://avatars.example.com/parsnip_dev.png",
    ),
    (
        "caretaker7",
        "Tom Wills",
        "https://avatars.example.com/caretaker7.png",
    ),
    (
        "lurkmore",
        "Ada Quinn",
        "https://avatars.example.com/lurkmore.png",
    ),
];

// (title, topic, author, body, votes, created_at)
// 插入顺序即 article_id 1..=13，created_at 逐日递增
const ARTICLES: &[(&str, &str, &str, &str, i32, &str)] = &[
    (
        "Borrow checker diaries",
        "rust",
        "sloe_gin",
        "Week one: the compiler and I are not on speaking terms.",
        100,
        "2023-06-01T10:00:00Z",
    ),
    (
        "Mulch myths debunked",
        "gardening",
        "parsnip_dev",
        "No, wood chips will not steal all your nitrogen.",
        0,
        "2023-06-02T10:00:00Z",
    ),
    (
        "Lifetime elision, explained",
        "rust",
        "caretaker7",
        "The three rules, and the places they quietly apply.",
        0,
        "2023-06-03T10:00:00Z",
    ),
    (
        "Composting for beginners",
        "gardening",
        "caretaker7",
        "Browns, greens, and the art of turning the heap.",
        0,
        "2023-06-04T10:00:00Z",
    ),
    (
        "Async without fear",
        "rust",
        "sloe_gin",
        "Futures are just state machines wearing a trench coat.",
        7,
        "2023-06-05T10:00:00Z",
    ),
    (
        "Pruning roses in autumn",
        "gardening",
        "parsnip_dev",
        "Cut above an outward-facing bud and be brave about it.",
        2,
        "2023-06-06T10:00:00Z",
    ),
    (
        "Error handling taxonomies",
        "rust",
        "parsnip_dev",
        "Recoverable, unrecoverable, and the ones you log and forget.",
        0,
        "2023-06-07T10:00:00Z",
    ),
    (
        "Raised beds on a budget",
        "gardening",
        "sloe_gin",
        "Scaffold boards, four screws, and an afternoon.",
        -3,
        "2023-06-08T10:00:00Z",
    ),
    (
        "Traits as capabilities",
        "rust",
        "caretaker7",
        "Model what a thing can do, not what a thing is.",
        12,
        "2023-06-09T10:00:00Z",
    ),
    (
        "Tomatoes hate wind",
        "gardening",
        "caretaker7",
        "Stake early, stake twice, and stop apologising to the vines.",
        0,
        "2023-06-10T10:00:00Z",
    ),
    (
        "Zero-cost abstractions, audited",
        "rust",
        "sloe_gin",
        "We read the assembly so you don't have to.",
        5,
        "2023-06-11T10:00:00Z",
    ),
    (
        "Winter cover crops",
        "gardening",
        "parsnip_dev",
        "Field beans now, free nitrogen in spring.",
        1,
        "2023-06-12T10:00:00Z",
    ),
    (
        "Send, Sync and you",
        "rust",
        "parsnip_dev",
        "Two marker traits walk into a thread pool.",
        0,
        "2023-06-13T10:00:00Z",
    ),
];

// (article_id, author, body, votes, created_at)
// 插入顺序即 comment_id 1..=14；文章 1 恰有 11 条评论，文章 2 没有评论
const COMMENTS: &[(i32, &str, &str, i32, &str)] = &[
    (1, "parsnip_dev", "Hang in there, week two is worse.", 12, "2023-07-01T09:00:00Z"),
    (1, "caretaker7", "Clone until it compiles, refactor until it doesn't.", 3, "2023-07-02T09:00:00Z"),
    (1, "lurkmore", "First comment I have ever left anywhere.", 0, "2023-07-03T09:00:00Z"),
    (1, "parsnip_dev", "Have you met Rc<RefCell<T>> yet?", 5, "2023-07-04T09:00:00Z"),
    (1, "sloe_gin", "Author here: week three update, we are friends now.", 20, "2023-07-05T09:00:00Z"),
    (1, "caretaker7", "The diary format really works for this.", 1, "2023-07-06T09:00:00Z"),
    (1, "parsnip_dev", "Week one of gardening is also mostly errors.", 2, "2023-07-07T09:00:00Z"),
    (1, "lurkmore", "Second comment I have ever left anywhere.", 0, "2023-07-08T09:00:00Z"),
    (1, "caretaker7", "Bookmarking this for every new starter.", 8, "2023-07-09T09:00:00Z"),
    (1, "sloe_gin", "Replying to myself counts as engagement.", -2, "2023-07-10T09:00:00Z"),
    (1, "parsnip_dev", "Eleven comments and not one about monads. Proud of us.", 4, "2023-07-11T09:00:00Z"),
    (3, "sloe_gin", "Rule three is the one everyone forgets.", 6, "2023-07-12T09:00:00Z"),
    (3, "parsnip_dev", "Quietly apply is right, I never see them.", 1, "2023-07-13T09:00:00Z"),
    (5, "caretaker7", "The trench coat image is doing a lot of work here.", 9, "2023-07-14T09:00:00Z"),
];

/// 清空全部表并写入固定数据集
pub async fn run(db: &Database) -> AppResult<()> {
    let pool = db.pool();

    sqlx::query("TRUNCATE comments, articles, users, topics RESTART IDENTITY CASCADE")
        .execute(pool)
        .await?;

    for (slug, description) in TOPICS.iter().copied() {
        sqlx::query("INSERT INTO topics (slug, description) VALUES ($1, $2)")
            .bind(slug)
            .bind(description)
            .execute(pool)
            .await?;
    }

    for (username, name, avatar_url) in USERS.iter().copied() {
        sqlx::query("INSERT INTO users (username, name, avatar_url) VALUES ($1, $2, $3)")
            .bind(username)
            .bind(name)
            .bind(avatar_url)
            .execute(pool)
            .await?;
    }

    for (title, topic, author, body, votes, created_at) in ARTICLES.iter().copied() {
        sqlx::query(
            r#"
            INSERT INTO articles (title, topic, author, body, votes, created_at)
            VALUES ($1, $2, $3, $4, $5, ($6)::timestamptz)
            "#,
        )
        .bind(title)
        .bind(topic)
        .bind(author)
        .bind(body)
        .bind(votes)
        .bind(created_at)
        .execute(pool)
        .await?;
    }

    for (article_id, author, body, votes, created_at) in COMMENTS.iter().copied() {
        sqlx::query(
            r#"
            INSERT INTO comments (article_id, author, body, votes, created_at)
            VALUES ($1, $2, $3, $4, ($5)::timestamptz)
            "#,
        )
        .bind(article_id)
        .bind(author)
        .bind(body)
        .bind(votes)
        .bind(created_at)
        .execute(pool)
        .await?;
    }

    Ok(())
}
