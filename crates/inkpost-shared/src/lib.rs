//! # Inkpost Shared
//!
//! Request and response types shared between the API server and its clients.

pub mod dto;
pub mod response;

pub use dto::{CreatePostRequest, UpdatePostRequest, UpdateProfileRequest};
pub use response::{MessageBody, ProfileBody};
