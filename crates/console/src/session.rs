//! Login gate. Any credentials pass, empty ones included; the gate exists
//! to stamp a session, not to authenticate against a directory.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;

use knocx_core::ConsoleConfig;

/// A signed-in operator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdminSession {
    pub name: String,
    pub email: String,
    pub signed_in_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl AdminSession {
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }
}

/// Issues sessions for the console.
pub struct SessionGate {
    operator_name: String,
    session_hours: i64,
}

impl SessionGate {
    pub fn new(config: &ConsoleConfig) -> Self {
        Self {
            operator_name: config.operator_name.clone(),
            session_hours: config.session_hours,
        }
    }

    /// Sign in. Every pair of credentials is accepted, empty strings
    /// included; the password is discarded and the operator name comes
    /// from config.
    pub fn sign_in(&self, email: &str, _password: &str) -> AdminSession {
        let now = Utc::now();
        let session = AdminSession {
            name: self.operator_name.clone(),
            email: email.trim().to_string(),
            signed_in_at: now,
            expires_at: now + Duration::hours(self.session_hours),
        };
        info!(email = %session.email, "Operator signed in");
        session
    }
}
