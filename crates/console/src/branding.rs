//! Branding & localization panel. Edits accumulate against a draft brand
//! kit; nothing counts as saved until `save` runs, and the dirty flag tells
//! the caller whether unsaved edits exist.

use std::path::Path;

use base64::Engine;
use serde::{Deserialize, Serialize};
use tracing::info;

use knocx_core::{ConsoleConfig, KnocxResult, Language, Validator};

/// Companies offered by the branding company picker.
pub const BRANDING_COMPANIES: &[&str] = &[
    "Your Company",
    "Zones Pvt Ltd",
    "Albertio Solutions",
    "NextGen Electric",
];

/// The saved brand settings for the console.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BrandKit {
    pub company: String,
    /// Logo as a `data:` URI, if one has been loaded.
    pub logo: Option<String>,
    pub language: Language,
}

/// Draft-and-save editor for the brand kit.
pub struct BrandingStudio {
    draft: BrandKit,
    dirty: bool,
}

impl BrandingStudio {
    pub fn new(config: &ConsoleConfig) -> Self {
        Self {
            draft: BrandKit {
                company: "Your Company".to_string(),
                logo: None,
                language: config.branding.default_language,
            },
            dirty: false,
        }
    }

    pub fn draft(&self) -> &BrandKit {
        &self.draft
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn set_company(&mut self, company: &str) {
        self.draft.company = company.to_string();
        self.dirty = true;
    }

    pub fn set_language(&mut self, language: Language) {
        self.draft.language = language;
        self.dirty = true;
    }

    /// Read a logo file and store it as a base64 `data:` URI. The mime type
    /// comes from the file extension; unknown extensions are served as
    /// `application/octet-stream`.
    pub fn load_logo_file(&mut self, path: &Path) -> KnocxResult<()> {
        let bytes = std::fs::read(path)?;
        let mime = match path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_lowercase())
            .as_deref()
        {
            Some("png") => "image/png",
            Some("jpg") | Some("jpeg") => "image/jpeg",
            Some("gif") => "image/gif",
            Some("svg") => "image/svg+xml",
            Some("webp") => "image/webp",
            _ => "application/octet-stream",
        };
        let encoded = base64::engine::general_purpose::STANDARD.encode(&bytes);
        self.draft.logo = Some(format!("data:{mime};base64,{encoded}"));
        self.dirty = true;
        info!(path = %path.display(), mime, "Logo loaded");
        Ok(())
    }

    /// Persist the draft. Requires a non-blank company name and clears the
    /// dirty flag.
    pub fn save(&mut self) -> KnocxResult<BrandKit> {
        Validator::new()
            .require("company", &self.draft.company, "Company name is required")
            .finish_as_error()?;

        self.dirty = false;
        info!(
            company = %self.draft.company,
            language = %self.draft.language,
            "Branding saved"
        );
        Ok(self.draft.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write as _;

    fn studio() -> BrandingStudio {
        BrandingStudio::new(&ConsoleConfig::default())
    }

    #[test]
    fn test_starts_clean_with_defaults() {
        let studio = studio();
        assert!(!studio.is_dirty());
        assert_eq!(studio.draft().company, "Your Company");
        assert_eq!(studio.draft().language, Language::En);
        assert!(studio.draft().logo.is_none());
    }

    #[test]
    fn test_edits_mark_dirty_and_save_clears() {
        let mut studio = studio();
        studio.set_company("Zones Pvt Ltd");
        studio.set_language(Language::Ur);
        assert!(studio.is_dirty());

        let kit = studio.save().unwrap();
        assert!(!studio.is_dirty());
        assert_eq!(kit.company, "Zones Pvt Ltd");
        assert_eq!(kit.language, Language::Ur);
    }

    #[test]
    fn test_save_requires_company_and_stays_dirty() {
        let mut studio = studio();
        studio.set_company("   ");
        assert!(studio.save().is_err());
        assert!(studio.is_dirty());
    }

    #[test]
    fn test_logo_becomes_data_uri() {
        let dir = std::env::temp_dir().join("knocx-branding-test");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("logo.png");
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(&[0x89, b'P', b'N', b'G']).unwrap();

        let mut studio = studio();
        studio.load_logo_file(&path).unwrap();
        let logo = studio.draft().logo.clone().unwrap();
        assert!(logo.starts_with("data:image/png;base64,"));
        assert!(studio.is_dirty());
    }

    #[test]
    fn test_missing_logo_file() {
        let mut studio = studio();
        let err = studio
            .load_logo_file(Path::new("/nonexistent/logo.png"))
            .unwrap_err();
        assert!(matches!(err, knocx_core::KnocxError::Io(_)));
        assert!(!studio.is_dirty());
    }
}
