use serde::{Deserialize, Serialize};

/// Display language offered by the organization and branding forms.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Language {
    #[default]
    En,
    Es,
    Ur,
    Ar,
    Fr,
}

impl Language {
    pub const ALL: &'static [Language] = &[
        Self::En,
        Self::Es,
        Self::Ur,
        Self::Ar,
        Self::Fr,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::En => "en",
            Self::Es => "es",
            Self::Ur => "ur",
            Self::Ar => "ar",
            Self::Fr => "fr",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::En => "English",
            Self::Es => "Spanish",
            Self::Ur => "Urdu",
            Self::Ar => "Arabic",
            Self::Fr => "French",
        }
    }

    /// Parse a language code; unknown codes fall back to English.
    pub fn parse(code: &str) -> Self {
        match code.trim().to_lowercase().as_str() {
            "es" => Self::Es,
            "ur" => Self::Ur,
            "ar" => Self::Ar,
            "fr" => Self::Fr,
            _ => Self::En,
        }
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_known_and_unknown() {
        assert_eq!(Language::parse("es"), Language::Es);
        assert_eq!(Language::parse(" FR "), Language::Fr);
        assert_eq!(Language::parse("de"), Language::En);
        assert_eq!(Language::parse(""), Language::En);
    }

    #[test]
    fn test_labels_cover_all() {
        assert_eq!(Language::ALL.len(), 5);
        for l in Language::ALL {
            assert!(!l.label().is_empty());
            assert_eq!(l.as_str().len(), 2);
        }
    }
}
