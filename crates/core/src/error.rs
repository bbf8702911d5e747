//! Error taxonomy for the console. Validation failures are carried as
//! structured values so the presentation layer can render them non-blocking
//! instead of interrupting the operator.

use serde::Serialize;
use thiserror::Error;
use uuid::Uuid;

pub type KnocxResult<T> = Result<T, KnocxError>;

#[derive(Error, Debug)]
pub enum KnocxError {
    #[error("validation failed: {0}")]
    Validation(ValidationErrors),

    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: String },

    #[error("user {user_id} already holds role {role_id}")]
    DuplicateAssignment { user_id: Uuid, role_id: Uuid },

    #[error("ticket {0} is closed; reopen it before editing")]
    TicketClosed(Uuid),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl KnocxError {
    pub fn not_found(entity: &'static str, id: impl ToString) -> Self {
        Self::NotFound {
            entity,
            id: id.to_string(),
        }
    }
}

/// A single failed field check, e.g. `org_name: "Organization name is required"`.
/// Serialize-only: the `field` label is a static identifier, never read back.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

/// All field errors from one submitted form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ValidationErrors(pub Vec<FieldError>);

impl ValidationErrors {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn fields(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.0.iter().map(|e| e.field)
    }
}

impl std::fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let joined: Vec<&str> = self.0.iter().map(|e| e.message.as_str()).collect();
        f.write_str(&joined.join("; "))
    }
}

/// Accumulates field checks for one form submission.
///
/// ```
/// use knocx_core::Validator;
///
/// let result = Validator::new()
///     .require("org_name", "", "Organization name is required")
///     .require("email", "info@zones.com", "Email is required")
///     .finish();
/// assert!(result.is_err());
/// ```
#[derive(Debug, Default)]
pub struct Validator {
    errors: Vec<FieldError>,
}

impl Validator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an error when `value` is blank (empty or whitespace only).
    pub fn require(mut self, field: &'static str, value: &str, message: &str) -> Self {
        if value.trim().is_empty() {
            self.errors.push(FieldError {
                field,
                message: message.to_string(),
            });
        }
        self
    }

    /// Record an error unless `condition` holds.
    pub fn check(mut self, field: &'static str, condition: bool, message: &str) -> Self {
        if !condition {
            self.errors.push(FieldError {
                field,
                message: message.to_string(),
            });
        }
        self
    }

    pub fn finish(self) -> Result<(), ValidationErrors> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(ValidationErrors(self.errors))
        }
    }

    /// Like [`finish`](Self::finish) but wrapped in the console error type.
    pub fn finish_as_error(self) -> KnocxResult<()> {
        self.finish().map_err(KnocxError::Validation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validator_collects_all_blank_fields() {
        let err = Validator::new()
            .require("org_name", "  ", "Organization name is required")
            .require("user_name", "Ali", "User name is required")
            .require("email", "", "Email is required")
            .finish()
            .unwrap_err();

        let fields: Vec<_> = err.fields().collect();
        assert_eq!(fields, vec!["org_name", "email"]);
        assert_eq!(
            err.to_string(),
            "Organization name is required; Email is required"
        );
    }

    #[test]
    fn test_validator_check_condition() {
        let err = Validator::new()
            .check("seats", 0 >= 1, "Seats must be at least 1")
            .finish()
            .unwrap_err();
        assert_eq!(err.0.len(), 1);
        assert_eq!(err.0[0].field, "seats");
    }

    #[test]
    fn test_valid_form_passes() {
        assert!(Validator::new()
            .require("name", "Starter", "Plan name is required")
            .finish()
            .is_ok());
    }

    #[test]
    fn test_validation_errors_serialize() {
        let errors = ValidationErrors(vec![FieldError {
            field: "org_name",
            message: "Organization name is required".to_string(),
        }]);
        let json = serde_json::to_string(&errors).unwrap();
        assert_eq!(
            json,
            r#"[{"field":"org_name","message":"Organization name is required"}]"#
        );
    }

    #[test]
    fn test_not_found_display() {
        let err = KnocxError::not_found("Company", "b2c1");
        assert_eq!(err.to_string(), "Company not found: b2c1");
    }
}
