//! Bearer token value object

use crate::util::redact;

/// Short-lived bearer token returned by the identity service
///
/// Held only for the duration of a single prediction call; it is never
/// cached or reused across invocations.
#[derive(Clone, PartialEq, Eq)]
pub struct AccessToken {
    token: String,
    expires_in: Option<u64>,
}

impl AccessToken {
    /// Try to create a token, returning None if the value is blank
    pub fn try_new(token: impl Into<String>) -> Option<Self> {
        let token = token.into();
        if token.trim().is_empty() {
            None
        } else {
            Some(Self {
                token,
                expires_in: None,
            })
        }
    }

    /// Attach the lifetime reported by the identity service (seconds)
    pub fn with_expires_in(mut self, seconds: u64) -> Self {
        self.expires_in = Some(seconds);
        self
    }

    /// Raw token, for the `Authorization` header only
    pub fn expose(&self) -> &str {
        &self.token
    }

    /// Lifetime in seconds, if the identity service reported one
    pub fn expires_in(&self) -> Option<u64> {
        self.expires_in
    }
}

impl std::fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AccessToken")
            .field("token", &redact(&self.token))
            .field("expires_in", &self.expires_in)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_try_new_blank() {
        assert!(AccessToken::try_new("").is_none());
        assert!(AccessToken::try_new("   ").is_none());
    }

    #[test]
    fn test_try_new_valid() {
        let token = AccessToken::try_new("eyJhbGciOi").unwrap().with_expires_in(3600);
        assert_eq!(token.expose(), "eyJhbGciOi");
        assert_eq!(token.expires_in(), Some(3600));
    }

    #[test]
    fn test_debug_is_redacted() {
        let token = AccessToken::try_new("eyJhbGciOi").unwrap();
        assert!(!format!("{:?}", token).contains("eyJhbGciOi"));
    }
}
