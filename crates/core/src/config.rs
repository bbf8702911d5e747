use serde::Deserialize;

use crate::types::Language;

/// Root console configuration. Loaded from environment variables with the
/// prefix `KNOCX__`; every field falls back to a default so the console
/// runs with no configuration at all.
#[derive(Debug, Clone, Deserialize)]
pub struct ConsoleConfig {
    /// Display name attached to every session the gate creates.
    #[serde(default = "default_operator_name")]
    pub operator_name: String,
    /// Session lifetime in hours.
    #[serde(default = "default_session_hours")]
    pub session_hours: i64,
    /// Whether managers seed their demo datasets on startup.
    #[serde(default = "default_seed_demo_data")]
    pub seed_demo_data: bool,
    #[serde(default)]
    pub branding: BrandingConfig,
    #[serde(default)]
    pub support: SupportConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BrandingConfig {
    #[serde(default = "default_language")]
    pub default_language: Language,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SupportConfig {
    /// Priority given to tickets created without an explicit one.
    #[serde(default = "default_priority")]
    pub default_priority: String,
}

fn default_operator_name() -> String {
    "Knocx Admin".to_string()
}
fn default_session_hours() -> i64 {
    8
}
fn default_seed_demo_data() -> bool {
    true
}
fn default_language() -> Language {
    Language::En
}
fn default_priority() -> String {
    "Medium".to_string()
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            operator_name: default_operator_name(),
            session_hours: default_session_hours(),
            seed_demo_data: default_seed_demo_data(),
            branding: BrandingConfig::default(),
            support: SupportConfig::default(),
        }
    }
}

impl Default for BrandingConfig {
    fn default() -> Self {
        Self {
            default_language: default_language(),
        }
    }
}

impl Default for SupportConfig {
    fn default() -> Self {
        Self {
            default_priority: default_priority(),
        }
    }
}

impl ConsoleConfig {
    /// Load configuration from `KNOCX__`-prefixed environment variables.
    pub fn load() -> Result<Self, config::ConfigError> {
        let builder = config::Config::builder().add_source(
            config::Environment::with_prefix("KNOCX")
                .separator("__")
                .try_parsing(true),
        );

        let config = builder.build()?;
        config.try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cfg = ConsoleConfig::default();
        assert_eq!(cfg.operator_name, "Knocx Admin");
        assert_eq!(cfg.session_hours, 8);
        assert!(cfg.seed_demo_data);
        assert_eq!(cfg.branding.default_language, Language::En);
        assert_eq!(cfg.support.default_priority, "Medium");
    }
}
