//! Data Transfer Objects - request types for the API.

use serde::{Deserialize, Serialize};

/// Request to create a post. `status` defaults to draft when absent.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatePostRequest {
    pub title: String,
    pub content: String,
    pub image_url: Option<String>,
    pub status: Option<String>,
    pub featured: Option<bool>,
}

/// Request to update a post; absent fields are left untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdatePostRequest {
    pub title: Option<String>,
    pub content: Option<String>,
    pub image_url: Option<String>,
    pub status: Option<String>,
    pub featured: Option<bool>,
}

/// Request to update the session user's profile.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateProfileRequest {
    pub display_name: Option<String>,
    pub bio: Option<String>,
    pub avatar_url: Option<String>,
}
