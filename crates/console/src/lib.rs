//! Knocx Admin Console — the panel layer: login gate, sidebar navigation,
//! and the aggregate that wires every domain desk together.

pub mod branding;
pub mod panel;
pub mod reporting;
pub mod session;

pub use branding::{BrandKit, BrandingStudio, BRANDING_COMPANIES};
pub use panel::{overview_rows, OverviewRow, Panel, PanelHost};
pub use reporting::{Activity, Metric, ReportingSnapshot, UsagePoint};
pub use session::{AdminSession, SessionGate};

use knocx_core::ConsoleConfig;
use knocx_licensing::LicensingDesk;
use knocx_orgs::CompanyDirectory;
use knocx_rbac::AccessControl;
use knocx_support::TicketDesk;
use tracing::info;

/// Everything behind the login gate: one desk per panel plus the branding
/// editor. Reporting is a static snapshot and is fetched on demand.
pub struct AdminConsole {
    pub gate: SessionGate,
    pub companies: CompanyDirectory,
    pub licensing: LicensingDesk,
    pub access: AccessControl,
    pub tickets: TicketDesk,
    pub branding: BrandingStudio,
}

impl AdminConsole {
    /// Build the console. Demo datasets are seeded unless configuration
    /// turns them off; RBAC reference data (companies and users for the
    /// pickers) is always present.
    pub fn new(config: &ConsoleConfig) -> Self {
        let console = Self {
            gate: SessionGate::new(config),
            companies: CompanyDirectory::new(),
            licensing: LicensingDesk::new(),
            access: AccessControl::new(),
            tickets: TicketDesk::new(),
            branding: BrandingStudio::new(config),
        };
        console.access.seed_reference_data();
        if config.seed_demo_data {
            console.companies.seed_demo_companies();
            console.licensing.seed_demo_data();
            console.access.seed_demo_data();
            console.tickets.seed_demo_tickets();
            info!("Demo datasets seeded");
        }
        console
    }

    pub fn reporting(&self) -> ReportingSnapshot {
        ReportingSnapshot::demo()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seeded_console() {
        let console = AdminConsole::new(&ConsoleConfig::default());
        assert_eq!(console.companies.len(), 2);
        assert_eq!(console.licensing.plans().len(), 3);
        assert_eq!(console.licensing.subscriptions().len(), 2);
        assert_eq!(console.access.list_roles().len(), 3);
        assert_eq!(console.tickets.list_tickets().len(), 2);
        assert!(!console.branding.is_dirty());
    }

    #[test]
    fn test_company_delete_leaves_subscriptions_stale() {
        let console = AdminConsole::new(&ConsoleConfig::default());
        let zones = console
            .companies
            .list()
            .into_iter()
            .find(|c| c.org_name == "Zones Pvt Ltd")
            .unwrap();

        assert!(console.companies.delete(zones.id));
        // The licensing list still names the deleted organization.
        let subs = console.licensing.subscriptions();
        assert!(subs.iter().any(|s| s.org_name == "Zones Pvt Ltd"));
    }

    #[test]
    fn test_unseeded_console_keeps_reference_data() {
        let config = ConsoleConfig {
            seed_demo_data: false,
            ..ConsoleConfig::default()
        };
        let console = AdminConsole::new(&config);
        assert!(console.companies.is_empty());
        assert!(console.licensing.subscriptions().is_empty());
        assert!(console.tickets.list_tickets().is_empty());
        // Pickers still need companies and users to offer.
        assert!(!console.access.companies().is_empty());
        assert!(!console.access.users().is_empty());
        assert!(console.access.list_roles().is_empty());
    }
}
