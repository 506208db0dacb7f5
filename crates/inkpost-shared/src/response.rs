//! API response body shapes.

use serde::{Deserialize, Serialize};

/// Plain `{message}` body used for errors and delete confirmations.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageBody {
    pub message: String,
}

impl MessageBody {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// `{profile}` wrapper returned by the profile endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileBody<T> {
    pub profile: T,
}
