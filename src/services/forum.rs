use crate::{
    error::{AppError, AppResult},
    models::{
        thread, trending_thread, AuthorSnapshot, Category, CategoryModel, TagList, Thread,
        ThreadModel, TrendingThread, TrendingThreadModel,
    },
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait,
    FromQueryResult, QueryFilter, QueryOrder, Statement, TransactionTrait,
};

/// Sort keys accepted by the thread listing. Anything unrecognized falls
/// back to newest-first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThreadSort {
    Newest,
    Popular,
    MostLiked,
    MostViewed,
}

impl ThreadSort {
    pub fn parse(key: &str) -> Self {
        match key {
            "popular" => Self::Popular,
            "most-liked" => Self::MostLiked,
            "most-viewed" => Self::MostViewed,
            _ => Self::Newest,
        }
    }
}

pub struct ForumService {
    db: DatabaseConnection,
}

impl ForumService {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn list_categories(&self) -> AppResult<Vec<CategoryModel>> {
        let categories = Category::find().all(&self.db).await?;
        Ok(categories)
    }

    pub async fn get_category(&self, id: i32) -> AppResult<CategoryModel> {
        Category::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(AppError::NotFound)
    }

    /// All threads in a category, full result set, no pagination. A
    /// category with no threads (or an unknown category) yields an empty
    /// list. Every ordering carries a secondary ascending id key so ties
    /// keep insertion order.
    pub async fn list_threads_by_category(
        &self,
        category_id: i32,
        sort: ThreadSort,
    ) -> AppResult<Vec<ThreadModel>> {
        let query = Thread::find().filter(thread::Column::CategoryId.eq(category_id));
        let query = match sort {
            ThreadSort::Popular => {
                // Reply count lives inside the jsonb array; order in SQL
                // rather than materializing every thread first.
                let sql = "SELECT id, category_id, title, content, author, likes, views, \
                    replies, tags, created_at, updated_at \
                    FROM threads WHERE category_id = $1 \
                    ORDER BY jsonb_array_length(replies) DESC, id ASC";
                let threads = ThreadModel::find_by_statement(Statement::from_sql_and_values(
                    sea_orm::DatabaseBackend::Postgres,
                    sql,
                    [category_id.into()],
                ))
                .all(&self.db)
                .await?;
                return Ok(threads);
            }
            ThreadSort::Newest => query.order_by_desc(thread::Column::CreatedAt),
            ThreadSort::MostLiked => query.order_by_desc(thread::Column::Likes),
            ThreadSort::MostViewed => query.order_by_desc(thread::Column::Views),
        };

        let threads = query
            .order_by_asc(thread::Column::Id)
            .all(&self.db)
            .await?;
        Ok(threads)
    }

    /// Persist a new thread and bump the category's denormalized thread
    /// counter in the same transaction.
    pub async fn create_thread(
        &self,
        author: AuthorSnapshot,
        category_id: i32,
        title: &str,
        content: &str,
        tags: Vec<String>,
    ) -> AppResult<ThreadModel> {
        let category = self.get_category(category_id).await?;

        let now = chrono::Utc::now().naive_utc();
        let txn = self.db.begin().await?;

        let new_thread = thread::ActiveModel {
            category_id: sea_orm::ActiveValue::Set(category.id),
            title: sea_orm::ActiveValue::Set(title.to_string()),
            content: sea_orm::ActiveValue::Set(content.to_string()),
            author: sea_orm::ActiveValue::Set(author),
            likes: sea_orm::ActiveValue::Set(0),
            views: sea_orm::ActiveValue::Set(0),
            replies: sea_orm::ActiveValue::Set(Default::default()),
            tags: sea_orm::ActiveValue::Set(TagList(tags)),
            created_at: sea_orm::ActiveValue::Set(now),
            updated_at: sea_orm::ActiveValue::Set(now),
            ..Default::default()
        };

        let created = new_thread.insert(&txn).await?;

        txn.execute(Statement::from_sql_and_values(
            sea_orm::DatabaseBackend::Postgres,
            "UPDATE categories SET thread_count = thread_count + 1, updated_at = $2 WHERE id = $1",
            [category.id.into(), now.into()],
        ))
        .await?;

        txn.commit().await?;
        Ok(created)
    }

    /// Number of threads whose author snapshot points at this user. Used
    /// when stamping a fresh snapshot for an authenticated caller.
    pub async fn count_threads_by_author(&self, author_id: i32) -> AppResult<i64> {
        let row = self
            .db
            .query_one(Statement::from_sql_and_values(
                sea_orm::DatabaseBackend::Postgres,
                "SELECT COUNT(*) AS count FROM threads WHERE (author->>'id')::int = $1",
                [author_id.into()],
            ))
            .await?
            .ok_or(AppError::Internal(anyhow::anyhow!("Count query failed")))?;

        let count: i64 = row.try_get_by_index(0)?;
        Ok(count)
    }

    pub async fn list_trending(&self) -> AppResult<Vec<TrendingThreadModel>> {
        let threads = TrendingThread::find()
            .order_by_desc(trending_thread::Column::Replies)
            .order_by_asc(trending_thread::Column::Id)
            .all(&self.db)
            .await?;
        Ok(threads)
    }
}
