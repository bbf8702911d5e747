//! Support panel — tickets with an open/closed lifecycle and two
//! append-only audit trails (history and reviews).
//!
//! A closed ticket rejects reviews and reassignment until it is reopened;
//! toggling the status is always allowed and is itself recorded in history.

use chrono::{DateTime, Utc};
use dashmap::DashMap;
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use knocx_core::{KnocxError, KnocxResult, Validator};

/// Teams and staff offered by the reassignment picker.
pub const TEAMS: &[&str] = &[
    "John Doe – IT Support",
    "Jane Smith – Billing",
    "Alex Johnson – Security",
    "Sara Khan – Development",
    "Customer Success Team",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TicketStatus {
    Open,
    Closed,
}

impl TicketStatus {
    pub fn toggled(self) -> Self {
        match self {
            Self::Open => Self::Closed,
            Self::Closed => Self::Open,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::Closed => "closed",
        }
    }
}

impl std::fmt::Display for TicketStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TicketPriority {
    High,
    Medium,
    Low,
}

impl TicketPriority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::High => "High",
            Self::Medium => "Medium",
            Self::Low => "Low",
        }
    }

    /// Parse a priority label; unknown labels fall back to Medium.
    pub fn parse(label: &str) -> Self {
        match label.trim().to_lowercase().as_str() {
            "high" => Self::High,
            "low" => Self::Low,
            _ => Self::Medium,
        }
    }
}

impl std::fmt::Display for TicketPriority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One append-only history record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub at: DateTime<Utc>,
    pub action: String,
}

/// One reviewer comment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Review {
    pub at: DateTime<Utc>,
    pub text: String,
}

/// A support request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ticket {
    pub id: Uuid,
    pub subject: String,
    pub description: String,
    pub status: TicketStatus,
    pub priority: TicketPriority,
    pub assigned_to: String,
    pub company: String,
    pub department: String,
    pub created_at: DateTime<Utc>,
    pub history: Vec<HistoryEntry>,
    pub reviews: Vec<Review>,
}

/// In-memory ticket store backing the support panel.
pub struct TicketDesk {
    tickets: DashMap<Uuid, Ticket>,
}

impl Default for TicketDesk {
    fn default() -> Self {
        Self::new()
    }
}

impl TicketDesk {
    pub fn new() -> Self {
        Self {
            tickets: DashMap::new(),
        }
    }

    /// Open a new ticket. History starts with a "Ticket created" entry.
    #[allow(clippy::too_many_arguments)]
    pub fn create_ticket(
        &self,
        subject: &str,
        description: &str,
        priority: TicketPriority,
        assigned_to: &str,
        company: &str,
        department: &str,
    ) -> Ticket {
        let now = Utc::now();
        let ticket = Ticket {
            id: Uuid::new_v4(),
            subject: subject.to_string(),
            description: description.to_string(),
            status: TicketStatus::Open,
            priority,
            assigned_to: assigned_to.to_string(),
            company: company.to_string(),
            department: department.to_string(),
            created_at: now,
            history: vec![HistoryEntry {
                at: now,
                action: "Ticket created".to_string(),
            }],
            reviews: Vec::new(),
        };
        info!(ticket_id = %ticket.id, subject = %ticket.subject, "Ticket created");
        self.tickets.insert(ticket.id, ticket.clone());
        ticket
    }

    /// Flip a ticket between open and closed, recording the transition.
    pub fn toggle_status(&self, id: Uuid) -> KnocxResult<Ticket> {
        let mut entry = self
            .tickets
            .get_mut(&id)
            .ok_or_else(|| KnocxError::not_found("Ticket", id))?;
        let ticket = entry.value_mut();
        let action = match ticket.status {
            TicketStatus::Open => "Ticket closed",
            TicketStatus::Closed => "Ticket reopened",
        };
        ticket.status = ticket.status.toggled();
        ticket.history.push(HistoryEntry {
            at: Utc::now(),
            action: action.to_string(),
        });
        info!(ticket_id = %id, status = %ticket.status, "Ticket status toggled");
        Ok(ticket.clone())
    }

    /// Append a review. Rejected on closed tickets; neither the review list
    /// nor the history grows in that case.
    pub fn add_review(&self, id: Uuid, text: &str) -> KnocxResult<Ticket> {
        Validator::new()
            .require("review", text, "Review text is required")
            .finish_as_error()?;

        let mut entry = self
            .tickets
            .get_mut(&id)
            .ok_or_else(|| KnocxError::not_found("Ticket", id))?;
        let ticket = entry.value_mut();
        if ticket.status == TicketStatus::Closed {
            return Err(KnocxError::TicketClosed(id));
        }

        let now = Utc::now();
        ticket.reviews.push(Review {
            at: now,
            text: text.to_string(),
        });
        ticket.history.push(HistoryEntry {
            at: now,
            action: "New review added".to_string(),
        });
        info!(ticket_id = %id, "Review added");
        Ok(ticket.clone())
    }

    /// Hand a ticket to another team or person. Rejected on closed tickets.
    pub fn reassign(&self, id: Uuid, assignee: &str) -> KnocxResult<Ticket> {
        Validator::new()
            .require("assignee", assignee, "Please select a team or person")
            .finish_as_error()?;

        let mut entry = self
            .tickets
            .get_mut(&id)
            .ok_or_else(|| KnocxError::not_found("Ticket", id))?;
        let ticket = entry.value_mut();
        if ticket.status == TicketStatus::Closed {
            return Err(KnocxError::TicketClosed(id));
        }

        ticket.assigned_to = assignee.to_string();
        ticket.history.push(HistoryEntry {
            at: Utc::now(),
            action: format!("Assigned to {assignee}"),
        });
        info!(ticket_id = %id, assignee = %assignee, "Ticket reassigned");
        Ok(ticket.clone())
    }

    pub fn get_ticket(&self, id: Uuid) -> Option<Ticket> {
        self.tickets.get(&id).map(|e| e.value().clone())
    }

    /// All tickets, newest first.
    pub fn list_tickets(&self) -> Vec<Ticket> {
        let mut tickets: Vec<_> = self.tickets.iter().map(|e| e.value().clone()).collect();
        tickets.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        tickets
    }

    /// Seed the two demo tickets. The second one arrives already closed,
    /// with only its creation entry in the history.
    pub fn seed_demo_tickets(&self) {
        self.create_ticket(
            "Unable to access dashboard analytics page",
            "I'm unable to access the dashboard analytics page. It keeps \
             loading indefinitely. Tried multiple browsers and cleared cache.",
            TicketPriority::High,
            "John Doe – IT Support",
            "Acme Inc",
            "IT",
        );

        let now = Utc::now();
        let billing = Ticket {
            id: Uuid::new_v4(),
            subject: "Billing issue with last invoice".to_string(),
            description: "There's a discrepancy in the last invoice billed for \
                          our subscription. Please review and clarify."
                .to_string(),
            status: TicketStatus::Closed,
            priority: TicketPriority::Medium,
            assigned_to: "Jane Smith – Billing".to_string(),
            company: "Beta Corp".to_string(),
            department: "Finance".to_string(),
            created_at: now,
            history: vec![HistoryEntry {
                at: now,
                action: "Ticket created".to_string(),
            }],
            reviews: Vec::new(),
        };
        self.tickets.insert(billing.id, billing);
        info!("Demo tickets seeded");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn open_ticket(desk: &TicketDesk) -> Ticket {
        desk.create_ticket(
            "Login page unreachable",
            "The sign-in form times out.",
            TicketPriority::High,
            "John Doe – IT Support",
            "Acme Inc",
            "IT",
        )
    }

    #[test]
    fn test_create_starts_open_with_created_entry() {
        let desk = TicketDesk::new();
        let ticket = open_ticket(&desk);
        assert_eq!(ticket.status, TicketStatus::Open);
        assert_eq!(ticket.history.len(), 1);
        assert_eq!(ticket.history[0].action, "Ticket created");
        assert!(ticket.reviews.is_empty());
    }

    #[test]
    fn test_double_toggle_restores_status_and_logs_twice() {
        let desk = TicketDesk::new();
        let ticket = open_ticket(&desk);

        let closed = desk.toggle_status(ticket.id).unwrap();
        assert_eq!(closed.status, TicketStatus::Closed);
        let reopened = desk.toggle_status(ticket.id).unwrap();
        assert_eq!(reopened.status, TicketStatus::Open);

        assert_eq!(reopened.history.len(), 3);
        assert_eq!(reopened.history[1].action, "Ticket closed");
        assert_eq!(reopened.history[2].action, "Ticket reopened");
    }

    #[test]
    fn test_review_on_open_ticket() {
        let desk = TicketDesk::new();
        let ticket = open_ticket(&desk);

        let updated = desk.add_review(ticket.id, "Looks good").unwrap();
        assert_eq!(updated.reviews.len(), 1);
        assert_eq!(updated.reviews[0].text, "Looks good");
        assert_eq!(updated.history.len(), 2);
        assert_eq!(updated.history[1].action, "New review added");
    }

    #[test]
    fn test_review_on_closed_ticket_changes_nothing() {
        let desk = TicketDesk::new();
        let ticket = open_ticket(&desk);
        desk.toggle_status(ticket.id).unwrap();
        let before = desk.get_ticket(ticket.id).unwrap();

        let err = desk.add_review(ticket.id, "Looks good").unwrap_err();
        assert!(matches!(err, KnocxError::TicketClosed(_)));

        let after = desk.get_ticket(ticket.id).unwrap();
        assert_eq!(after.reviews.len(), before.reviews.len());
        assert_eq!(after.history.len(), before.history.len());
    }

    #[test]
    fn test_blank_review_rejected() {
        let desk = TicketDesk::new();
        let ticket = open_ticket(&desk);
        assert!(desk.add_review(ticket.id, "   ").is_err());
        assert_eq!(desk.get_ticket(ticket.id).unwrap().history.len(), 1);
    }

    #[test]
    fn test_reassign_logs_and_overwrites() {
        let desk = TicketDesk::new();
        let ticket = open_ticket(&desk);

        let updated = desk.reassign(ticket.id, "Sara Khan – Development").unwrap();
        assert_eq!(updated.assigned_to, "Sara Khan – Development");
        assert_eq!(
            updated.history.last().unwrap().action,
            "Assigned to Sara Khan – Development"
        );
    }

    #[test]
    fn test_reassign_blocked_when_closed() {
        let desk = TicketDesk::new();
        let ticket = open_ticket(&desk);
        desk.toggle_status(ticket.id).unwrap();

        let err = desk.reassign(ticket.id, "Customer Success Team").unwrap_err();
        assert!(matches!(err, KnocxError::TicketClosed(_)));
        let after = desk.get_ticket(ticket.id).unwrap();
        assert_eq!(after.assigned_to, "John Doe – IT Support");
    }

    #[test]
    fn test_seeded_tickets() {
        let desk = TicketDesk::new();
        desk.seed_demo_tickets();
        let tickets = desk.list_tickets();
        assert_eq!(tickets.len(), 2);

        let closed = tickets
            .iter()
            .find(|t| t.company == "Beta Corp")
            .unwrap();
        assert_eq!(closed.status, TicketStatus::Closed);
        assert_eq!(closed.priority, TicketPriority::Medium);
        // Seeded closed, not closed after the fact: the audit trail holds
        // only the creation entry.
        assert_eq!(closed.history.len(), 1);
        assert_eq!(closed.history[0].action, "Ticket created");
    }

    #[test]
    fn test_unknown_ticket() {
        let desk = TicketDesk::new();
        assert!(matches!(
            desk.toggle_status(Uuid::new_v4()).unwrap_err(),
            KnocxError::NotFound { entity: "Ticket", .. }
        ));
    }

    #[test]
    fn test_priority_parse() {
        assert_eq!(TicketPriority::parse("HIGH"), TicketPriority::High);
        assert_eq!(TicketPriority::parse("low "), TicketPriority::Low);
        assert_eq!(TicketPriority::parse("urgent"), TicketPriority::Medium);
    }
}
