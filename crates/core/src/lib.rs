//! Knocx Admin Console — shared core: error taxonomy, typed validation
//! results, configuration, and types used across the console crates.

pub mod config;
pub mod error;
pub mod types;

pub use config::ConsoleConfig;
pub use error::{FieldError, KnocxError, KnocxResult, ValidationErrors, Validator};
pub use types::Language;
