//! API key value object

use crate::core::error::DomainError;
use crate::util::redact;

/// Cloud API key (Value Object)
///
/// Opaque to this system: the only local check is that it is not blank.
/// The plaintext is reachable only through [`ApiKey::expose`].
#[derive(Clone, PartialEq, Eq)]
pub struct ApiKey {
    secret: String,
}

impl ApiKey {
    /// Create a new API key, rejecting blank input
    pub fn new(secret: impl Into<String>) -> Result<Self, DomainError> {
        let secret = secret.into();
        if secret.trim().is_empty() {
            return Err(DomainError::EmptyApiKey);
        }
        Ok(Self { secret })
    }

    /// Plaintext key, for building the identity request only
    pub fn expose(&self) -> &str {
        &self.secret
    }
}

impl std::fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("ApiKey").field(&redact(&self.secret)).finish()
    }
}

impl std::fmt::Display for ApiKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", redact(&self.secret))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_key_creation() {
        let key = ApiKey::new("valid-key").unwrap();
        assert_eq!(key.expose(), "valid-key");
    }

    #[test]
    fn test_blank_api_key_rejected() {
        assert_eq!(ApiKey::new(""), Err(DomainError::EmptyApiKey));
        assert_eq!(ApiKey::new("  \t"), Err(DomainError::EmptyApiKey));
    }

    #[test]
    fn test_debug_and_display_do_not_leak() {
        let key = ApiKey::new("very-secret-value").unwrap();
        assert!(!format!("{:?}", key).contains("very-secret-value"));
        assert!(!key.to_string().contains("very-secret-value"));
    }
}
