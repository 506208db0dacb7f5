//! Session-scoped post management endpoints.
//!
//! Ownership is enforced inside the repository by filtering every query on
//! the session user's id; these handlers only translate outcomes to HTTP.

use actix_web::{HttpResponse, web};
use uuid::Uuid;

use inkpost_core::domain::{NewPost, PostPatch, PostStatus};
use inkpost_shared::{CreatePostRequest, MessageBody, UpdatePostRequest};

use crate::middleware::auth::Identity;
use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

fn parse_status(value: &str) -> Result<PostStatus, AppError> {
    PostStatus::parse(value)
        .ok_or_else(|| AppError::BadRequest(format!("Invalid post status: {value}")))
}

/// GET /api/posts
pub async fn list_my_posts(state: web::Data<AppState>, identity: Identity) -> HttpResponse {
    HttpResponse::Ok().json(state.dashboard.posts_for(identity.user.id).await)
}

/// POST /api/posts
pub async fn create_post(
    state: web::Data<AppState>,
    identity: Identity,
    body: web::Json<CreatePostRequest>,
) -> AppResult<HttpResponse> {
    let body = body.into_inner();
    let status = match body.status.as_deref() {
        Some(value) => parse_status(value)?,
        None => PostStatus::Draft,
    };

    let new_post = NewPost {
        title: body.title,
        content: body.content,
        image_url: body.image_url,
        status,
        featured: body.featured.unwrap_or(false),
    };

    let post = state.dashboard.create_post(identity.user.id, new_post).await?;
    Ok(HttpResponse::Created().json(post))
}

/// GET /api/posts/{id}
pub async fn get_post(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let post = state
        .dashboard
        .post_for_editing(path.into_inner(), identity.user.id)
        .await
        .ok_or_else(|| AppError::NotFound("Post not found or access denied".to_string()))?;
    Ok(HttpResponse::Ok().json(post))
}

/// PUT /api/posts/{id}
pub async fn update_post(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<Uuid>,
    body: web::Json<UpdatePostRequest>,
) -> AppResult<HttpResponse> {
    let body = body.into_inner();
    let status = match body.status.as_deref() {
        Some(value) => Some(parse_status(value)?),
        None => None,
    };

    let patch = PostPatch {
        title: body.title,
        content: body.content,
        image_url: body.image_url,
        status,
        featured: body.featured,
    };

    let post = state
        .dashboard
        .update_post(path.into_inner(), identity.user.id, patch)
        .await?;
    Ok(HttpResponse::Ok().json(post))
}

/// DELETE /api/posts/{id}
pub async fn delete_post(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    state
        .dashboard
        .delete_post(path.into_inner(), identity.user.id)
        .await?;
    Ok(HttpResponse::Ok().json(MessageBody::new("Post deleted successfully")))
}
