//! Admin gate and the access level it grants

use std::fmt;

use chrono::{DateTime, Utc};
use sha2::{Digest, Sha256};

use crate::error::AccessError;

/// Access level carried by every screen after the landing gate
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum AccessLevel {
    #[default]
    Visitor,
    Admin,
}

impl AccessLevel {
    /// Value of the `userType` route parameter
    pub fn query_value(self) -> &'static str {
        match self {
            AccessLevel::Visitor => "visitor",
            AccessLevel::Admin => "hc7",
        }
    }

    /// Anything but the admin value resolves to visitor
    pub fn from_query_value(value: &str) -> Self {
        if value == "hc7" {
            AccessLevel::Admin
        } else {
            AccessLevel::Visitor
        }
    }

    pub fn is_admin(self) -> bool {
        self == AccessLevel::Admin
    }

    pub fn badge(self) -> &'static str {
        match self {
            AccessLevel::Visitor => "Visitor",
            AccessLevel::Admin => "HC7 Admin",
        }
    }
}

/// Verifies the shared admin secret.
///
/// Only the SHA-256 digest of the secret is kept, and digests are compared
/// without early exit. The gate holds no per-attempt state.
#[derive(Clone)]
pub struct AccessGate {
    secret_digest: [u8; 32],
}

impl AccessGate {
    pub fn new(secret: &str) -> Self {
        Self {
            secret_digest: digest(secret),
        }
    }

    pub fn verify(&self, submitted_key: &str) -> Result<AccessLevel, AccessError> {
        if constant_time_eq(&self.secret_digest, &digest(submitted_key)) {
            Ok(AccessLevel::Admin)
        } else {
            Err(AccessError::InvalidCredential)
        }
    }

    /// Guest entry point. No credential is involved.
    pub fn continue_as_visitor(&self) -> AccessLevel {
        AccessLevel::Visitor
    }
}

impl fmt::Debug for AccessGate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AccessGate").finish_non_exhaustive()
    }
}

fn digest(value: &str) -> [u8; 32] {
    Sha256::digest(value.as_bytes()).into()
}

fn constant_time_eq(a: &[u8; 32], b: &[u8; 32]) -> bool {
    a.iter().zip(b.iter()).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}

/// Result of one submit on the admin key dialog. Discarded once the gate
/// resolves.
pub struct AccessAttempt {
    pub submitted_key: String,
    pub submitted_at: DateTime<Utc>,
    pub outcome: Result<AccessLevel, AccessError>,
}

impl AccessAttempt {
    pub fn submit(gate: &AccessGate, submitted_key: String) -> Self {
        let outcome = gate.verify(&submitted_key);
        Self {
            submitted_key,
            submitted_at: Utc::now(),
            outcome,
        }
    }

    pub fn succeeded(&self) -> bool {
        self.outcome.is_ok()
    }

    /// Message shown under the key field on failure
    pub fn error_message(&self) -> Option<String> {
        self.outcome.as_ref().err().map(|e| e.to_string())
    }
}

impl fmt::Debug for AccessAttempt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AccessAttempt")
            .field("submitted_key", &"<redacted>")
            .field("submitted_at", &self.submitted_at)
            .field("outcome", &self.outcome)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const KEY: &str = "11ojd-yy63n-9232n";

    #[test]
    fn correct_key_grants_admin() {
        let gate = AccessGate::new(KEY);
        assert_eq!(gate.verify(KEY), Ok(AccessLevel::Admin));
    }

    #[test]
    fn wrong_and_empty_keys_are_rejected() {
        let gate = AccessGate::new(KEY);
        assert_eq!(gate.verify("wrong"), Err(AccessError::InvalidCredential));
        assert_eq!(gate.verify(""), Err(AccessError::InvalidCredential));
        // Exact match only
        assert!(gate.verify(" 11ojd-yy63n-9232n").is_err());
        assert!(gate.verify("11OJD-YY63N-9232N").is_err());
    }

    #[test]
    fn gate_is_stateless_across_attempts() {
        let gate = AccessGate::new(KEY);
        for _ in 0..10 {
            assert!(gate.verify("nope").is_err());
        }
        assert_eq!(gate.verify(KEY), Ok(AccessLevel::Admin));
    }

    #[test]
    fn visitor_entry_bypasses_verification() {
        let gate = AccessGate::new(KEY);
        assert_eq!(gate.continue_as_visitor(), AccessLevel::Visitor);
    }

    #[test]
    fn attempt_carries_display_message_and_hides_key() {
        let gate = AccessGate::new(KEY);
        let attempt = AccessAttempt::submit(&gate, "guess".to_string());
        assert!(!attempt.succeeded());
        assert_eq!(attempt.error_message().as_deref(), Some("Invalid key, please try again."));
        assert!(!format!("{:?}", attempt).contains("guess"));

        let attempt = AccessAttempt::submit(&gate, KEY.to_string());
        assert!(attempt.succeeded());
        assert_eq!(attempt.error_message(), None);
    }

    #[test]
    fn query_values_map_to_levels() {
        assert_eq!(AccessLevel::Admin.query_value(), "hc7");
        assert_eq!(AccessLevel::Visitor.query_value(), "visitor");
        assert_eq!(AccessLevel::from_query_value("hc7"), AccessLevel::Admin);
        assert_eq!(AccessLevel::from_query_value("admin"), AccessLevel::Visitor);
        assert_eq!(AccessLevel::from_query_value(""), AccessLevel::Visitor);
    }
}
