//! Licensing panel — subscriptions and plans.
//!
//! Both lists are add-only. A subscription copies the plan *name* at
//! creation time; plans and subscriptions are not referentially linked, so
//! later plan changes never touch existing subscriptions.

use chrono::Utc;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use knocx_core::{KnocxResult, Validator};

/// A purchasable plan. Description only; no entitlements are modeled.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Plan {
    pub id: Uuid,
    pub name: String,
    pub description: String,
}

/// One organization's subscription to a plan.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Subscription {
    pub id: Uuid,
    pub org_name: String,
    /// Plan name as it read when the subscription was created.
    pub plan: String,
    pub seats: u32,
    /// Creation day rendered `YYYY-MM-DD`.
    pub created: String,
}

/// In-memory store for the licensing panel. Lists keep insertion order.
pub struct LicensingDesk {
    subscriptions: RwLock<Vec<Subscription>>,
    plans: RwLock<Vec<Plan>>,
}

impl Default for LicensingDesk {
    fn default() -> Self {
        Self::new()
    }
}

impl LicensingDesk {
    pub fn new() -> Self {
        Self {
            subscriptions: RwLock::new(Vec::new()),
            plans: RwLock::new(Vec::new()),
        }
    }

    /// Add a subscription. Requires a non-blank org name and plan; seats
    /// must be at least 1 (no upper bound applies).
    pub fn add_subscription(
        &self,
        org_name: &str,
        plan: &str,
        seats: u32,
    ) -> KnocxResult<Subscription> {
        Validator::new()
            .require("org_name", org_name, "Organization name is required")
            .require("plan", plan, "Please select a plan")
            .check("seats", seats >= 1, "Seats must be at least 1")
            .finish_as_error()?;

        let subscription = Subscription {
            id: Uuid::new_v4(),
            org_name: org_name.to_string(),
            plan: plan.to_string(),
            seats,
            created: Utc::now().format("%Y-%m-%d").to_string(),
        };
        info!(
            subscription_id = %subscription.id,
            org = %subscription.org_name,
            plan = %subscription.plan,
            seats,
            "Subscription added"
        );
        self.subscriptions.write().push(subscription.clone());
        Ok(subscription)
    }

    /// Create a plan. A blank description becomes "No description".
    pub fn add_plan(&self, name: &str, description: &str) -> KnocxResult<Plan> {
        Validator::new()
            .require("name", name, "Plan name is required")
            .finish_as_error()?;

        let description = if description.trim().is_empty() {
            "No description".to_string()
        } else {
            description.to_string()
        };
        let plan = Plan {
            id: Uuid::new_v4(),
            name: name.to_string(),
            description,
        };
        info!(plan_id = %plan.id, name = %plan.name, "Plan created");
        self.plans.write().push(plan.clone());
        Ok(plan)
    }

    pub fn subscriptions(&self) -> Vec<Subscription> {
        self.subscriptions.read().clone()
    }

    pub fn plans(&self) -> Vec<Plan> {
        self.plans.read().clone()
    }

    /// Unique org names across subscriptions, in first-seen order. Feeds
    /// the "select existing company" picker.
    pub fn existing_companies(&self) -> Vec<String> {
        let mut seen = Vec::new();
        for sub in self.subscriptions.read().iter() {
            if !seen.contains(&sub.org_name) {
                seen.push(sub.org_name.clone());
            }
        }
        seen
    }

    /// Seed the demo plans and subscriptions.
    pub fn seed_demo_data(&self) {
        let _ = self.add_plan("Starter", "Basic access for small teams");
        let _ = self.add_plan("Pro", "Advanced features for growing teams");
        let _ = self.add_plan("Enterprise", "Full suite with premium support");

        let _ = self.add_subscription("Zones Pvt Ltd", "Starter", 5);
        let _ = self.add_subscription("Albertio Solutions", "Enterprise", 25);
        info!("Demo licensing data seeded");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use knocx_core::KnocxError;

    #[test]
    fn test_add_subscription() {
        let desk = LicensingDesk::new();
        desk.seed_demo_data();
        let before = desk.subscriptions().len();

        let sub = desk.add_subscription("Acme", "Starter", 5).unwrap();
        assert_eq!(desk.subscriptions().len(), before + 1);
        assert_eq!(sub.org_name, "Acme");
        assert_eq!(sub.plan, "Starter");
        assert_eq!(sub.seats, 5);
        assert_eq!(sub.created, Utc::now().format("%Y-%m-%d").to_string());
    }

    #[test]
    fn test_subscription_requires_org_and_plan() {
        let desk = LicensingDesk::new();
        assert!(desk.add_subscription("", "Starter", 1).is_err());
        assert!(desk.add_subscription("Acme", "  ", 1).is_err());
        assert!(desk.add_subscription("Acme", "Starter", 0).is_err());
        assert!(desk.subscriptions().is_empty());
    }

    #[test]
    fn test_plan_description_default() {
        let desk = LicensingDesk::new();
        let plan = desk.add_plan("Basic", "").unwrap();
        assert_eq!(plan.description, "No description");

        let err = desk.add_plan("   ", "whatever").unwrap_err();
        assert!(matches!(err, KnocxError::Validation(_)));
        assert_eq!(desk.plans().len(), 1);
    }

    #[test]
    fn test_plan_changes_do_not_touch_subscriptions() {
        // The plan name is copied by value at creation; adding another plan
        // with the same name (or never deleting one) leaves subscriptions
        // exactly as they were written.
        let desk = LicensingDesk::new();
        desk.add_plan("Starter", "v1").unwrap();
        desk.add_subscription("Acme", "Starter", 3).unwrap();
        desk.add_plan("Starter", "v2 with new description").unwrap();

        let subs = desk.subscriptions();
        assert_eq!(subs.len(), 1);
        assert_eq!(subs[0].plan, "Starter");
    }

    #[test]
    fn test_existing_companies_unique_in_order() {
        let desk = LicensingDesk::new();
        desk.add_subscription("Zones Pvt Ltd", "Starter", 5).unwrap();
        desk.add_subscription("Albertio Solutions", "Pro", 2).unwrap();
        desk.add_subscription("Zones Pvt Ltd", "Enterprise", 50).unwrap();

        assert_eq!(
            desk.existing_companies(),
            vec!["Zones Pvt Ltd".to_string(), "Albertio Solutions".to_string()]
        );
    }

    #[test]
    fn test_no_seat_upper_bound() {
        let desk = LicensingDesk::new();
        let sub = desk.add_subscription("Acme", "Pro", u32::MAX).unwrap();
        assert_eq!(sub.seats, u32::MAX);
    }
}
