//! Organizations panel — company records with full CRUD.
//!
//! Companies are held in memory only; deleting one never cascades into the
//! licensing or access-control data that mentions it by name or id.

use chrono::{DateTime, Utc};
use dashmap::DashMap;
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use knocx_core::{KnocxError, KnocxResult, Language, Validator};

/// Timezones offered by the company form.
pub const TIMEZONES: &[&str] = &[
    "America/Anchorage (GMT-9)",
    "America/Los_Angeles (GMT-8)",
    "America/New_York (GMT-5)",
    "Atlantic/Azores (GMT-1)",
    "Europe/London (GMT+1)",
    "Asia/Dubai (GMT+4)",
    "Asia/Karachi (GMT+5)",
    "Asia/Hong_Kong (GMT+8)",
    "Australia/Sydney (GMT+10)",
    "Pacific/Auckland (GMT+12)",
];

/// A customer organization managed by the console.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Company {
    pub id: Uuid,
    pub org_name: String,
    pub user_name: String,
    pub website: String,
    pub contact: String,
    pub email: String,
    pub timezone: String,
    pub language: Language,
    /// Logo URL or embedded `data:` URI; empty when none was provided.
    pub logo: String,
    pub two_factor_enabled: bool,
    pub created_at: DateTime<Utc>,
}

/// The submitted company form. Org name, user name, and email are required;
/// everything else may be blank. No uniqueness constraints apply.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CompanyForm {
    pub org_name: String,
    pub user_name: String,
    pub website: String,
    pub contact: String,
    pub email: String,
    pub timezone: String,
    pub language: Language,
    pub logo: String,
    pub two_factor_enabled: bool,
}

impl CompanyForm {
    fn validate(&self) -> KnocxResult<()> {
        Validator::new()
            .require("org_name", &self.org_name, "Organization name is required")
            .require("user_name", &self.user_name, "User name is required")
            .require("email", &self.email, "Email is required")
            .finish_as_error()
    }
}

/// In-memory company store backing the organizations panel.
pub struct CompanyDirectory {
    companies: DashMap<Uuid, Company>,
}

impl Default for CompanyDirectory {
    fn default() -> Self {
        Self::new()
    }
}

impl CompanyDirectory {
    pub fn new() -> Self {
        Self {
            companies: DashMap::new(),
        }
    }

    /// Create a company from a validated form.
    pub fn create(&self, form: CompanyForm) -> KnocxResult<Company> {
        form.validate()?;
        let company = Company {
            id: Uuid::new_v4(),
            org_name: form.org_name,
            user_name: form.user_name,
            website: form.website,
            contact: form.contact,
            email: form.email,
            timezone: form.timezone,
            language: form.language,
            logo: form.logo,
            two_factor_enabled: form.two_factor_enabled,
            created_at: Utc::now(),
        };
        info!(company_id = %company.id, org = %company.org_name, "Company created");
        self.companies.insert(company.id, company.clone());
        Ok(company)
    }

    /// Overwrite an existing company's fields with a validated form.
    pub fn update(&self, id: Uuid, form: CompanyForm) -> KnocxResult<Company> {
        form.validate()?;
        let mut entry = self
            .companies
            .get_mut(&id)
            .ok_or_else(|| KnocxError::not_found("Company", id))?;
        let company = entry.value_mut();
        company.org_name = form.org_name;
        company.user_name = form.user_name;
        company.website = form.website;
        company.contact = form.contact;
        company.email = form.email;
        company.timezone = form.timezone;
        company.language = form.language;
        company.logo = form.logo;
        company.two_factor_enabled = form.two_factor_enabled;
        info!(company_id = %id, "Company updated");
        Ok(company.clone())
    }

    /// Remove a company. Returns `true` when it existed. Dependent records
    /// elsewhere (users, assignments, subscriptions) are left untouched.
    pub fn delete(&self, id: Uuid) -> bool {
        let removed = self.companies.remove(&id).is_some();
        if removed {
            info!(company_id = %id, "Company deleted");
        }
        removed
    }

    pub fn get(&self, id: Uuid) -> Option<Company> {
        self.companies.get(&id).map(|e| e.value().clone())
    }

    /// All companies, oldest first.
    pub fn list(&self) -> Vec<Company> {
        let mut companies: Vec<_> = self.companies.iter().map(|e| e.value().clone()).collect();
        companies.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        companies
    }

    pub fn len(&self) -> usize {
        self.companies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.companies.is_empty()
    }

    /// Seed the two demo companies.
    pub fn seed_demo_companies(&self) {
        let _ = self.create(CompanyForm {
            org_name: "Zones Pvt Ltd".into(),
            user_name: "Ali".into(),
            website: "https://zones.pvt.com".into(),
            contact: "0300-1234567".into(),
            email: "info@zones.com".into(),
            timezone: "Asia/Karachi (GMT+5)".into(),
            language: Language::En,
            logo: String::new(),
            two_factor_enabled: true,
        });
        let _ = self.create(CompanyForm {
            org_name: "Albertio Solutions".into(),
            user_name: "Sara".into(),
            website: "https://albertio.com".into(),
            contact: "0311-7654321".into(),
            email: "contact@albertio.com".into(),
            timezone: "Europe/London (GMT+1)".into(),
            language: Language::Es,
            logo: String::new(),
            two_factor_enabled: false,
        });
        info!("Demo companies seeded");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_form() -> CompanyForm {
        CompanyForm {
            org_name: "TechNova".into(),
            user_name: "Rita".into(),
            email: "rita@technova.io".into(),
            ..Default::default()
        }
    }

    #[test]
    fn test_create_and_list() {
        let dir = CompanyDirectory::new();
        dir.seed_demo_companies();
        let companies = dir.list();
        assert_eq!(companies.len(), 2);
        assert_eq!(companies[0].org_name, "Zones Pvt Ltd");
        assert!(companies[0].two_factor_enabled);
        assert_eq!(companies[1].language, Language::Es);
    }

    #[test]
    fn test_required_fields() {
        let dir = CompanyDirectory::new();
        let mut form = valid_form();
        form.org_name = String::new();
        form.email = "   ".into();

        let err = dir.create(form).unwrap_err();
        match err {
            KnocxError::Validation(errors) => {
                let fields: Vec<_> = errors.fields().collect();
                assert_eq!(fields, vec!["org_name", "email"]);
            }
            other => panic!("expected validation error, got {other}"),
        }
        assert!(dir.is_empty());
    }

    #[test]
    fn test_no_uniqueness_constraint() {
        // Two companies may share a name and an email.
        let dir = CompanyDirectory::new();
        dir.create(valid_form()).unwrap();
        dir.create(valid_form()).unwrap();
        assert_eq!(dir.len(), 2);
    }

    #[test]
    fn test_update() {
        let dir = CompanyDirectory::new();
        let company = dir.create(valid_form()).unwrap();

        let mut form = valid_form();
        form.website = "https://technova.example".into();
        form.two_factor_enabled = true;
        let updated = dir.update(company.id, form).unwrap();
        assert_eq!(updated.website, "https://technova.example");
        assert!(updated.two_factor_enabled);
        // Creation time survives the edit.
        assert_eq!(updated.created_at, company.created_at);
    }

    #[test]
    fn test_update_unknown_company() {
        let dir = CompanyDirectory::new();
        let err = dir.update(Uuid::new_v4(), valid_form()).unwrap_err();
        assert!(matches!(err, KnocxError::NotFound { entity: "Company", .. }));
    }

    #[test]
    fn test_delete() {
        let dir = CompanyDirectory::new();
        let company = dir.create(valid_form()).unwrap();
        assert!(dir.delete(company.id));
        assert!(!dir.delete(company.id));
        assert!(dir.get(company.id).is_none());
    }
}
