use std::env;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::utils::error::AppError;

/// Role required for create/update/delete operations.
pub const ADMIN_ROLE: &str = "admin";

/// The authenticated caller for a single request: id and role claim derived
/// from the bearer token. Never persisted.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Identity {
    pub id: u64,
    pub role: String,
}

/// Token verification boundary.
///
/// The static verifier below is the only implementation today; a real scheme
/// (signed tokens with expiry) plugs in here without touching the user
/// service or the admin check.
#[async_trait]
pub trait TokenVerifier: Send + Sync {
    async fn verify(&self, token: &str) -> Result<Identity, AppError>;
}

/// Accepts exactly one shared-secret token and yields a fixed admin identity.
pub struct StaticTokenVerifier {
    token: String,
}

impl StaticTokenVerifier {
    pub fn new(token: String) -> Self {
        StaticTokenVerifier { token }
    }

    /// Reads the accepted token from `API_TOKEN`.
    pub fn from_env() -> Self {
        Self::new(env::var("API_TOKEN").unwrap_or_else(|_| "valid-token".to_string()))
    }
}

#[async_trait]
impl TokenVerifier for StaticTokenVerifier {
    async fn verify(&self, token: &str) -> Result<Identity, AppError> {
        if token == self.token {
            Ok(Identity {
                id: 1,
                role: ADMIN_ROLE.to_string(),
            })
        } else {
            Err(AppError::Unauthenticated(
                "Invalid authentication credentials".to_string(),
            ))
        }
    }
}

/// Admin gate applied to mutating operations. Read endpoints only pass
/// through the authentication middleware.
pub fn require_admin(identity: &Identity) -> Result<(), AppError> {
    if identity.role == ADMIN_ROLE {
        Ok(())
    } else {
        Err(AppError::Forbidden("Admin privileges required".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[actix_rt::test]
    async fn static_verifier_accepts_the_configured_token() {
        let verifier = StaticTokenVerifier::new("valid-token".to_string());

        let identity = verifier.verify("valid-token").await.unwrap();
        assert_eq!(identity.id, 1);
        assert_eq!(identity.role, "admin");
    }

    #[actix_rt::test]
    async fn static_verifier_rejects_any_other_token() {
        let verifier = StaticTokenVerifier::new("valid-token".to_string());

        for bad in ["", "wrong-token", "valid-token ", "VALID-TOKEN"] {
            let err = verifier.verify(bad).await.unwrap_err();
            assert!(matches!(err, AppError::Unauthenticated(_)));
        }
    }

    #[test]
    fn require_admin_gates_on_the_role_claim() {
        let admin = Identity {
            id: 1,
            role: "admin".to_string(),
        };
        assert!(require_admin(&admin).is_ok());

        let student = Identity {
            id: 2,
            role: "student".to_string(),
        };
        let err = require_admin(&student).unwrap_err();
        assert!(matches!(err, AppError::Forbidden(_)));
    }
}
