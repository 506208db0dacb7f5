//! Profile endpoints for the session user.

use actix_web::{HttpResponse, web};

use inkpost_core::Outcome;
use inkpost_core::domain::ProfilePatch;
use inkpost_shared::{ProfileBody, UpdateProfileRequest};

use crate::middleware::auth::Identity;
use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

/// GET /api/profile
///
/// Creates the profile row on first access; the four outcome kinds map to
/// 200, 404, 401 and 400 respectively.
pub async fn get_profile(
    state: web::Data<AppState>,
    identity: Identity,
) -> AppResult<HttpResponse> {
    match state.dashboard.profile_for(&identity.user).await {
        Outcome::Success(profile) => Ok(HttpResponse::Ok().json(ProfileBody { profile })),
        Outcome::NotFound(message) => Err(AppError::NotFound(message)),
        Outcome::Unauthorized(message) => Err(AppError::Unauthorized(message)),
        Outcome::Error(message) => Err(AppError::BadRequest(message)),
    }
}

/// PUT /api/profile
pub async fn update_profile(
    state: web::Data<AppState>,
    identity: Identity,
    body: web::Json<UpdateProfileRequest>,
) -> AppResult<HttpResponse> {
    let body = body.into_inner();
    let patch = ProfilePatch {
        display_name: body.display_name,
        bio: body.bio,
        avatar_url: body.avatar_url,
    };

    let profile = state.dashboard.update_profile(identity.user.id, patch).await?;
    Ok(HttpResponse::Ok().json(ProfileBody { profile }))
}
