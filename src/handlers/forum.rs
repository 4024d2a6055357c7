use crate::error::{AppError, AppResult};
use crate::middleware::OptionalAuthUser;
use crate::models::{
    AuthorSnapshot, CategoryModel, Reply, ThreadModel, TrendingThreadModel,
};
use crate::response::ApiResponse;
use crate::services::auth::AuthService;
use crate::services::forum::{ForumService, ThreadSort};
use axum::{
    extract::{Path, Query},
    http::StatusCode,
    response::IntoResponse,
    Extension, Json,
};
use sea_orm::DatabaseConnection;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateThreadRequest {
    /// Thread title (at least 5 characters)
    #[validate(length(min = 5, message = "Title must be at least 5 characters"))]
    pub title: String,
    /// Thread body (at least 20 characters)
    #[validate(length(min = 20, message = "Content must be at least 20 characters"))]
    pub content: String,
    /// Target category id, sent as a string by the client
    pub category_id: String,
    /// Optional tag list
    pub tags: Option<Vec<String>>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct ThreadListQuery {
    /// Sort order: newest, popular, most-liked, most-viewed
    pub sort: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CategoryResponse {
    /// Category ID
    pub id: i32,
    /// Category name
    pub name: String,
    /// Short description
    pub description: String,
    /// Display glyph or icon URL
    pub icon: String,
    /// Display color tag
    pub color: String,
    /// Number of threads in the category
    pub thread_count: i32,
}

impl From<CategoryModel> for CategoryResponse {
    fn from(c: CategoryModel) -> Self {
        Self {
            id: c.id,
            name: c.name,
            description: c.description,
            icon: c.icon,
            color: c.color,
            thread_count: c.thread_count,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ThreadResponse {
    /// Thread ID
    pub id: i32,
    /// Thread title
    pub title: String,
    /// Thread body
    pub content: String,
    /// Owning category ID
    pub category_id: i32,
    /// Author snapshot captured at creation time
    pub author: AuthorSnapshot,
    /// Like count
    pub likes: i32,
    /// View count
    pub views: i32,
    /// Embedded replies, oldest first
    pub replies: Vec<Reply>,
    /// Tags
    pub tags: Vec<String>,
    /// Creation timestamp
    pub created_at: String,
}

impl From<ThreadModel> for ThreadResponse {
    fn from(t: ThreadModel) -> Self {
        Self {
            id: t.id,
            title: t.title,
            content: t.content,
            category_id: t.category_id,
            author: t.author,
            likes: t.likes,
            views: t.views,
            replies: t.replies.0,
            tags: t.tags.0,
            created_at: t.created_at.to_string(),
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TrendingThreadResponse {
    /// Trending entry ID
    pub id: i32,
    /// Thread title
    pub title: String,
    /// Author display name
    pub author: String,
    /// Category display name
    pub category: String,
    /// Reply count
    pub replies: i32,
    /// Human-readable recency label
    pub last_active: String,
    /// Whether the entry is marked hot
    pub is_hot: bool,
}

impl From<TrendingThreadModel> for TrendingThreadResponse {
    fn from(t: TrendingThreadModel) -> Self {
        Self {
            id: t.id,
            title: t.title,
            author: t.author,
            category: t.category,
            replies: t.replies,
            last_active: t.last_active,
            is_hot: t.is_hot,
        }
    }
}

#[utoipa::path(
    get,
    path = "/api/categories",
    responses(
        (status = 200, description = "All categories", body = Vec<CategoryResponse>),
    ),
    tag = "categories"
)]
pub async fn list_categories(
    Extension(db): Extension<DatabaseConnection>,
) -> AppResult<impl IntoResponse> {
    let service = ForumService::new(db);
    let categories = service.list_categories().await?;
    let response: Vec<CategoryResponse> =
        categories.into_iter().map(CategoryResponse::from).collect();
    Ok(ApiResponse::ok(response))
}

#[utoipa::path(
    get,
    path = "/api/categories/{id}",
    params(("id" = i32, Path, description = "Category ID")),
    responses(
        (status = 200, description = "Category details", body = CategoryResponse),
        (status = 404, description = "Category not found", body = AppError),
    ),
    tag = "categories"
)]
pub async fn get_category(
    Extension(db): Extension<DatabaseConnection>,
    Path(id): Path<i32>,
) -> AppResult<impl IntoResponse> {
    let service = ForumService::new(db);
    let category = service.get_category(id).await?;
    Ok(ApiResponse::ok(CategoryResponse::from(category)))
}

#[utoipa::path(
    get,
    path = "/api/categories/{id}/threads",
    params(
        ("id" = i32, Path, description = "Category ID"),
        ("sort" = Option<String>, Query, description = "Sort order: newest, popular, most-liked, most-viewed"),
    ),
    responses(
        (status = 200, description = "Threads in the category", body = Vec<ThreadResponse>),
    ),
    tag = "threads"
)]
pub async fn list_threads(
    Extension(db): Extension<DatabaseConnection>,
    Path(id): Path<i32>,
    Query(params): Query<ThreadListQuery>,
) -> AppResult<impl IntoResponse> {
    let sort = ThreadSort::parse(params.sort.as_deref().unwrap_or("newest"));

    let service = ForumService::new(db);
    let threads = service.list_threads_by_category(id, sort).await?;
    let response: Vec<ThreadResponse> = threads.into_iter().map(ThreadResponse::from).collect();
    Ok(ApiResponse::ok(response))
}

#[utoipa::path(
    post,
    path = "/api/threads",
    request_body = CreateThreadRequest,
    responses(
        (status = 201, description = "Thread created", body = ThreadResponse),
        (status = 400, description = "Validation error", body = AppError),
        (status = 401, description = "Invalid session token", body = AppError),
        (status = 404, description = "Category not found", body = AppError),
    ),
    tag = "threads"
)]
pub async fn create_thread(
    Extension(db): Extension<DatabaseConnection>,
    auth_user: OptionalAuthUser,
    Json(payload): Json<CreateThreadRequest>,
) -> AppResult<impl IntoResponse> {
    payload
        .validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    // Malformed ids are rejected before any store lookup.
    let category_id: i32 = payload
        .category_id
        .parse()
        .map_err(|_| AppError::Validation("Invalid or missing categoryId".to_string()))?;

    let service = ForumService::new(db.clone());

    let author = match auth_user.0 {
        Some(user_id) => {
            let user = AuthService::new(db).get_user_by_id(user_id).await?;
            // Post count includes the thread being created.
            let post_count = service.count_threads_by_author(user.id).await? + 1;
            AuthorSnapshot {
                id: user.id,
                name: user.full_name,
                avatar: format!("https://i.pravatar.cc/150?u={}", user.id),
                join_date: user.created_at.and_utc().to_rfc3339(),
                post_count: post_count as i32,
            }
        }
        None => AuthorSnapshot::guest(),
    };

    let thread = service
        .create_thread(
            author,
            category_id,
            &payload.title,
            &payload.content,
            payload.tags.unwrap_or_default(),
        )
        .await?;

    Ok((
        StatusCode::CREATED,
        ApiResponse::ok(ThreadResponse::from(thread)),
    ))
}

#[utoipa::path(
    get,
    path = "/api/threads/trending",
    responses(
        (status = 200, description = "Trending threads, most replies first", body = Vec<TrendingThreadResponse>),
    ),
    tag = "threads"
)]
pub async fn trending_threads(
    Extension(db): Extension<DatabaseConnection>,
) -> AppResult<impl IntoResponse> {
    let service = ForumService::new(db);
    let threads = service.list_trending().await?;
    let response: Vec<TrendingThreadResponse> = threads
        .into_iter()
        .map(TrendingThreadResponse::from)
        .collect();
    Ok(ApiResponse::ok(response))
}
