//! Sidebar navigation and the overview table.

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::session::AdminSession;

/// The seven sidebar panels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Panel {
    Overview,
    Organizations,
    Licensing,
    Roles,
    Branding,
    Reporting,
    Support,
}

impl Panel {
    pub const ALL: [Panel; 7] = [
        Panel::Overview,
        Panel::Organizations,
        Panel::Licensing,
        Panel::Roles,
        Panel::Branding,
        Panel::Reporting,
        Panel::Support,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Overview => "overview",
            Self::Organizations => "organizations",
            Self::Licensing => "licensing",
            Self::Roles => "roles",
            Self::Branding => "branding",
            Self::Reporting => "reporting",
            Self::Support => "support",
        }
    }

    /// Sidebar label.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Overview => "Overview",
            Self::Organizations => "Organizations",
            Self::Licensing => "Licensing & Subscriptions",
            Self::Roles => "Roles & Permissions",
            Self::Branding => "Branding & Localization",
            Self::Reporting => "Reporting & Analytics",
            Self::Support => "Support",
        }
    }

    /// Parse a panel key; unknown keys land on the overview.
    pub fn parse(key: &str) -> Self {
        Self::ALL
            .into_iter()
            .find(|p| p.as_str() == key.trim().to_lowercase())
            .unwrap_or(Self::Overview)
    }
}

impl std::fmt::Display for Panel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One row of the overview's organizations table.
#[derive(Debug, Clone, Serialize)]
pub struct OverviewRow {
    pub organization: &'static str,
    pub plan: &'static str,
    pub users: u32,
    pub payment: &'static str,
    pub renewal: &'static str,
}

/// Static overview table contents.
pub fn overview_rows() -> Vec<OverviewRow> {
    vec![
        OverviewRow {
            organization: "Alpha Industries",
            plan: "Enterprise",
            users: 25,
            payment: "Paid",
            renewal: "2025-12-31",
        },
        OverviewRow {
            organization: "Beta Solutions",
            plan: "Professional",
            users: 10,
            payment: "Unpaid",
            renewal: "2025-09-30",
        },
        OverviewRow {
            organization: "Gamma Corp",
            plan: "Basic",
            users: 5,
            payment: "Paid",
            renewal: "2025-11-15",
        },
    ]
}

/// Navigation state for a signed-in operator: which panel is showing and
/// whether the sidebar is collapsed. Dropping the session signs out.
pub struct PanelHost {
    session: Option<AdminSession>,
    selected: Panel,
    collapsed: bool,
}

impl PanelHost {
    pub fn new(session: AdminSession) -> Self {
        Self {
            session: Some(session),
            selected: Panel::Overview,
            collapsed: false,
        }
    }

    pub fn session(&self) -> Option<&AdminSession> {
        self.session.as_ref()
    }

    pub fn selected(&self) -> Panel {
        self.selected
    }

    pub fn select(&mut self, panel: Panel) {
        if self.selected != panel {
            info!(panel = %panel, "Panel selected");
        }
        self.selected = panel;
    }

    pub fn is_collapsed(&self) -> bool {
        self.collapsed
    }

    pub fn toggle_sidebar(&mut self) {
        self.collapsed = !self.collapsed;
    }

    /// Clear the session and return to the overview.
    pub fn sign_out(&mut self) {
        if let Some(session) = self.session.take() {
            info!(email = %session.email, "Operator signed out");
        }
        self.selected = Panel::Overview;
    }
}
