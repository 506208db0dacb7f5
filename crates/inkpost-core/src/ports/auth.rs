//! Identity-provider session ports.

use uuid::Uuid;

/// Claims carried by a provider-issued session token.
#[derive(Debug, Clone)]
pub struct TokenClaims {
    pub user_id: Uuid,
    pub email: Option<String>,
    pub display_name: Option<String>,
    pub exp: i64,
}

/// The session-bound user. Owner-scoped operations take this explicitly;
/// nothing in the Query Layer reads ambient session state.
#[derive(Debug, Clone)]
pub struct SessionUser {
    pub id: Uuid,
    pub email: Option<String>,
    pub display_name: Option<String>,
}

impl SessionUser {
    /// Display name used to seed a lazily created profile: session metadata
    /// first, then the email, then a fixed fallback.
    pub fn default_display_name(&self) -> String {
        self.display_name
            .clone()
            .or_else(|| self.email.clone())
            .unwrap_or_else(|| "Author".to_string())
    }
}

impl From<TokenClaims> for SessionUser {
    fn from(claims: TokenClaims) -> Self {
        Self {
            id: claims.user_id,
            email: claims.email,
            display_name: claims.display_name,
        }
    }
}

/// Validates provider-issued session tokens.
pub trait SessionValidator: Send + Sync {
    fn validate_token(&self, token: &str) -> Result<TokenClaims, AuthError>;
}

/// Authentication errors.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("Token expired")]
    TokenExpired,

    #[error("Invalid token: {0}")]
    InvalidToken(String),

    #[error("Missing authorization header")]
    MissingAuth,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session(display_name: Option<&str>, email: Option<&str>) -> SessionUser {
        SessionUser {
            id: Uuid::new_v4(),
            email: email.map(str::to_owned),
            display_name: display_name.map(str::to_owned),
        }
    }

    #[test]
    fn default_display_name_prefers_metadata_then_email() {
        assert_eq!(
            session(Some("Ada"), Some("ada@example.com")).default_display_name(),
            "Ada"
        );
        assert_eq!(
            session(None, Some("ada@example.com")).default_display_name(),
            "ada@example.com"
        );
        assert_eq!(session(None, None).default_display_name(), "Author");
    }
}
