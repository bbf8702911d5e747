//! Roles & Permissions panel — companies and users as reference data,
//! roles with free-text permission labels, and user-role assignments.
//!
//! Assignments live in a positional list: the panel edits and deletes them
//! by index, and nothing in the collection itself enforces one assignment
//! per user. Deleting a role leaves any assignment that references it
//! dangling; [`AccessControl::resolve`] surfaces that as an absent name.

use chrono::{DateTime, Utc};
use dashmap::DashMap;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use knocx_core::{KnocxError, KnocxResult, Validator};

/// Reference company for the assignment picker.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Company {
    pub id: Uuid,
    pub name: String,
}

/// Reference user; belongs to exactly one company.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub company_id: Uuid,
}

/// A named role. Permissions are free-text capability labels — there is no
/// canonical catalog, so duplicates and misspellings count as distinct.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Role {
    pub id: Uuid,
    pub name: String,
    pub permissions: Vec<String>,
    pub created_at: DateTime<Utc>,
}

/// A link between one user and one role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Assignment {
    pub user_id: Uuid,
    pub role_id: Uuid,
}

/// An assignment resolved for display. Dangling references come back as
/// `None` rather than being repaired or dropped.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssignmentRow {
    pub company: Option<String>,
    pub user: Option<String>,
    pub role: Option<String>,
    pub permissions: Vec<String>,
}

/// Split a comma-separated permission string into labels: tokens are
/// trimmed, empty ones dropped, order preserved, duplicates kept.
pub fn parse_permissions(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}

/// In-memory store for roles, assignments, and their reference data.
pub struct AccessControl {
    companies: RwLock<Vec<Company>>,
    users: RwLock<Vec<User>>,
    roles: DashMap<Uuid, Role>,
    assignments: RwLock<Vec<Assignment>>,
}

impl Default for AccessControl {
    fn default() -> Self {
        Self::new()
    }
}

impl AccessControl {
    pub fn new() -> Self {
        Self {
            companies: RwLock::new(Vec::new()),
            users: RwLock::new(Vec::new()),
            roles: DashMap::new(),
            assignments: RwLock::new(Vec::new()),
        }
    }

    // -- reference data ------------------------------------------------

    pub fn add_company(&self, name: &str) -> Company {
        let company = Company {
            id: Uuid::new_v4(),
            name: name.to_string(),
        };
        self.companies.write().push(company.clone());
        company
    }

    pub fn add_user(&self, name: &str, company_id: Uuid) -> User {
        let user = User {
            id: Uuid::new_v4(),
            name: name.to_string(),
            company_id,
        };
        self.users.write().push(user.clone());
        user
    }

    pub fn companies(&self) -> Vec<Company> {
        self.companies.read().clone()
    }

    pub fn users(&self) -> Vec<User> {
        self.users.read().clone()
    }

    pub fn users_for_company(&self, company_id: Uuid) -> Vec<User> {
        self.users
            .read()
            .iter()
            .filter(|u| u.company_id == company_id)
            .cloned()
            .collect()
    }

    /// Users of a company that hold no assignment yet — the add-flow picker.
    /// Only this filter keeps users to a single role; the assignment list
    /// itself accepts whatever is written into it.
    pub fn unassigned_users(&self, company_id: Uuid) -> Vec<User> {
        let assigned: Vec<Uuid> = self.assignments.read().iter().map(|a| a.user_id).collect();
        self.users_for_company(company_id)
            .into_iter()
            .filter(|u| !assigned.contains(&u.id))
            .collect()
    }

    // -- roles -----------------------------------------------------------

    /// Create a role from the submitted form. The permission string is
    /// comma-split via [`parse_permissions`].
    pub fn create_role(&self, name: &str, permissions_input: &str) -> KnocxResult<Role> {
        Validator::new()
            .require("name", name, "Role name is required")
            .finish_as_error()?;

        let role = Role {
            id: Uuid::new_v4(),
            name: name.to_string(),
            permissions: parse_permissions(permissions_input),
            created_at: Utc::now(),
        };
        info!(role_id = %role.id, role_name = %role.name, "Role created");
        self.roles.insert(role.id, role.clone());
        Ok(role)
    }

    /// Replace a role's name and permission list.
    pub fn update_role(
        &self,
        id: Uuid,
        name: &str,
        permissions_input: &str,
    ) -> KnocxResult<Role> {
        Validator::new()
            .require("name", name, "Role name is required")
            .finish_as_error()?;

        let mut entry = self
            .roles
            .get_mut(&id)
            .ok_or_else(|| KnocxError::not_found("Role", id))?;
        let role = entry.value_mut();
        role.name = name.to_string();
        role.permissions = parse_permissions(permissions_input);
        info!(role_id = %id, "Role updated");
        Ok(role.clone())
    }

    /// Remove a role. Assignments referencing it are left dangling.
    pub fn delete_role(&self, id: Uuid) -> bool {
        let removed = self.roles.remove(&id).is_some();
        if removed {
            info!(role_id = %id, "Role deleted");
        }
        removed
    }

    pub fn get_role(&self, id: Uuid) -> Option<Role> {
        self.roles.get(&id).map(|e| e.value().clone())
    }

    /// All roles, oldest first.
    pub fn list_roles(&self) -> Vec<Role> {
        let mut roles: Vec<_> = self.roles.iter().map(|e| e.value().clone()).collect();
        roles.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        roles
    }

    // -- assignments -------------------------------------------------------

    /// Append a new assignment. An identical `(user, role)` pair already in
    /// the list is rejected.
    pub fn add_assignment(&self, user_id: Uuid, role_id: Uuid) -> KnocxResult<Assignment> {
        let assignment = Assignment { user_id, role_id };
        let mut assignments = self.assignments.write();
        if assignments.contains(&assignment) {
            return Err(KnocxError::DuplicateAssignment { user_id, role_id });
        }
        assignments.push(assignment);
        info!(user_id = %user_id, role_id = %role_id, "Assignment added");
        Ok(assignment)
    }

    /// Overwrite the assignment at `index` in place. Edits skip the
    /// duplicate-pair check that guards [`add_assignment`](Self::add_assignment),
    /// so an edit can introduce the very duplicate an add would reject.
    pub fn update_assignment(
        &self,
        index: usize,
        user_id: Uuid,
        role_id: Uuid,
    ) -> KnocxResult<Assignment> {
        let mut assignments = self.assignments.write();
        let slot = assignments
            .get_mut(index)
            .ok_or_else(|| KnocxError::not_found("Assignment", index))?;
        *slot = Assignment { user_id, role_id };
        info!(index, user_id = %user_id, role_id = %role_id, "Assignment updated");
        Ok(*slot)
    }

    /// Remove the assignment at `index`.
    pub fn remove_assignment(&self, index: usize) -> KnocxResult<Assignment> {
        let mut assignments = self.assignments.write();
        if index >= assignments.len() {
            return Err(KnocxError::not_found("Assignment", index));
        }
        let removed = assignments.remove(index);
        info!(index, user_id = %removed.user_id, "Assignment removed");
        Ok(removed)
    }

    pub fn assignments(&self) -> Vec<Assignment> {
        self.assignments.read().clone()
    }

    /// Resolve an assignment's ids for display.
    pub fn resolve(&self, assignment: &Assignment) -> AssignmentRow {
        let user = self
            .users
            .read()
            .iter()
            .find(|u| u.id == assignment.user_id)
            .cloned();
        let company = user.as_ref().and_then(|u| {
            self.companies
                .read()
                .iter()
                .find(|c| c.id == u.company_id)
                .map(|c| c.name.clone())
        });
        let role = self.get_role(assignment.role_id);

        AssignmentRow {
            company,
            user: user.map(|u| u.name),
            permissions: role.as_ref().map(|r| r.permissions.clone()).unwrap_or_default(),
            role: role.map(|r| r.name),
        }
    }

    // -- seeding -----------------------------------------------------------

    /// Seed the static companies and users the picker offers.
    pub fn seed_reference_data(&self) {
        let zones = self.add_company("Zones Pvt Ltd");
        let albertio = self.add_company("Albertio Solutions");
        let technova = self.add_company("TechNova");

        self.add_user("Uncle Champ Doe", zones.id);
        self.add_user("Sarah Smith", zones.id);
        self.add_user("Mike Albert", albertio.id);
        self.add_user("Rita Nova", technova.id);
        info!("Reference companies and users seeded");
    }

    /// Seed the three demo roles and two demo assignments. Expects
    /// [`seed_reference_data`](Self::seed_reference_data) to have run first.
    pub fn seed_demo_data(&self) {
        let admin = self
            .create_role("Admin", "Asset Management, Service Desk, Monitoring, MOAR")
            .expect("role name is non-empty");
        self.create_role("Manager", "Asset Management, Service Desk")
            .expect("role name is non-empty");
        let viewer = self
            .create_role("Viewer", "Asset Management")
            .expect("role name is non-empty");

        let users = self.users();
        if let Some(champ) = users.iter().find(|u| u.name == "Uncle Champ Doe") {
            let _ = self.add_assignment(champ.id, admin.id);
        }
        if let Some(mike) = users.iter().find(|u| u.name == "Mike Albert") {
            let _ = self.add_assignment(mike.id, viewer.id);
        }
        info!("Demo roles and assignments seeded");
    }
}
