//! Dashboard analytics endpoint.

use actix_web::{HttpResponse, web};

use crate::middleware::auth::Identity;
use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

/// GET /api/dashboard/analytics
pub async fn analytics(
    state: web::Data<AppState>,
    identity: Identity,
) -> AppResult<HttpResponse> {
    let summary = state
        .dashboard
        .analytics_for(identity.user.id)
        .await
        .ok_or_else(|| AppError::NotFound("Analytics unavailable".to_string()))?;
    Ok(HttpResponse::Ok().json(summary))
}
