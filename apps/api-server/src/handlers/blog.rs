//! Public blog endpoints.
//!
//! Everything here is anonymous. Store failures never surface as 5xx: lists
//! come back empty and lookups 404, the same as genuinely missing data.

use actix_web::{HttpResponse, web};
use serde::Deserialize;
use uuid::Uuid;

use inkpost_core::domain::PostStatus;

use crate::middleware::auth::OptionalIdentity;
use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

const FEATURED_DEFAULT_LIMIT: u64 = 3;
const RECENT_DEFAULT_LIMIT: u64 = 6;

#[derive(Debug, Deserialize)]
pub struct LimitQuery {
    pub limit: Option<u64>,
}

/// GET /api/blog/posts
pub async fn list_posts(
    state: web::Data<AppState>,
    query: web::Query<LimitQuery>,
) -> HttpResponse {
    HttpResponse::Ok().json(state.blog.list_published(query.limit).await)
}

/// GET /api/blog/posts/featured
pub async fn featured_posts(
    state: web::Data<AppState>,
    query: web::Query<LimitQuery>,
) -> HttpResponse {
    let limit = query.limit.unwrap_or(FEATURED_DEFAULT_LIMIT);
    HttpResponse::Ok().json(state.blog.list_featured(limit).await)
}

/// GET /api/blog/posts/recent
pub async fn recent_posts(
    state: web::Data<AppState>,
    query: web::Query<LimitQuery>,
) -> HttpResponse {
    let limit = query.limit.unwrap_or(RECENT_DEFAULT_LIMIT);
    HttpResponse::Ok().json(state.blog.list_recent(limit).await)
}

/// GET /api/blog/posts/{id}
///
/// Published posts are visible to anyone and count a view. An authenticated
/// author may preview their own draft; drafts stay 404 for everyone else and
/// never count views.
pub async fn get_post(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
    identity: OptionalIdentity,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();

    let details = match identity.0 {
        Some(identity) => state
            .blog
            .post_by_id(id, true)
            .await
            .filter(|details| {
                details.post.status == PostStatus::Published
                    || details.post.author_id == Some(identity.user.id)
            }),
        None => state.blog.post_by_id(id, false).await,
    };

    let details = details.ok_or_else(|| AppError::NotFound("Post not found".to_string()))?;

    if details.post.status == PostStatus::Published {
        state.blog.increment_view_count(id).await;
    }

    Ok(HttpResponse::Ok().json(details))
}

/// GET /api/blog/tags
pub async fn list_tags(state: web::Data<AppState>) -> HttpResponse {
    HttpResponse::Ok().json(state.blog.all_tags().await)
}

/// GET /api/blog/tags/{slug}
pub async fn get_tag(state: web::Data<AppState>, path: web::Path<String>) -> AppResult<HttpResponse> {
    let tag = state
        .blog
        .tag_by_slug(&path.into_inner())
        .await
        .ok_or_else(|| AppError::NotFound("Tag not found".to_string()))?;
    Ok(HttpResponse::Ok().json(tag))
}

/// GET /api/blog/tags/{slug}/posts
pub async fn posts_by_tag(
    state: web::Data<AppState>,
    path: web::Path<String>,
    query: web::Query<LimitQuery>,
) -> HttpResponse {
    HttpResponse::Ok().json(state.blog.posts_by_tag(&path.into_inner(), query.limit).await)
}

/// GET /api/blog/categories
pub async fn list_categories(state: web::Data<AppState>) -> HttpResponse {
    HttpResponse::Ok().json(state.blog.all_categories().await)
}

/// GET /api/blog/categories/{slug}
pub async fn get_category(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> AppResult<HttpResponse> {
    let category = state
        .blog
        .category_by_slug(&path.into_inner())
        .await
        .ok_or_else(|| AppError::NotFound("Category not found".to_string()))?;
    Ok(HttpResponse::Ok().json(category))
}

/// GET /api/blog/categories/{slug}/posts
pub async fn posts_by_category(
    state: web::Data<AppState>,
    path: web::Path<String>,
    query: web::Query<LimitQuery>,
) -> HttpResponse {
    HttpResponse::Ok().json(
        state
            .blog
            .posts_by_category(&path.into_inner(), query.limit)
            .await,
    )
}

/// GET /api/blog/authors/{display_name}
pub async fn get_author(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> AppResult<HttpResponse> {
    let author = state
        .blog
        .author_by_display_name(&path.into_inner())
        .await
        .ok_or_else(|| AppError::NotFound("Author not found".to_string()))?;
    Ok(HttpResponse::Ok().json(author))
}

/// GET /api/blog/authors/{display_name}/posts
pub async fn posts_by_author(
    state: web::Data<AppState>,
    path: web::Path<String>,
    query: web::Query<LimitQuery>,
) -> AppResult<HttpResponse> {
    let author = state
        .blog
        .author_by_display_name(&path.into_inner())
        .await
        .ok_or_else(|| AppError::NotFound("Author not found".to_string()))?;
    Ok(HttpResponse::Ok().json(state.blog.posts_by_author(author.id, query.limit).await))
}
