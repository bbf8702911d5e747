//! Knocx Admin CLI — sign in to the console and work its panels:
//! organizations, licensing, roles and permissions, branding, reporting,
//! and support tickets. All data is in-memory and reseeded per run.

use anyhow::Result;
use clap::{Parser, Subcommand};
use knocx_console::{overview_rows, AdminConsole, ReportingSnapshot, BRANDING_COMPANIES};
use knocx_core::{ConsoleConfig, Language};
use knocx_support::{TicketPriority, TEAMS};
use uuid::Uuid;

/// Default log filter; tracing targets follow crate module paths, so each
/// workspace crate needs its own directive.
const DEFAULT_LOG_FILTER: &str = "knocx_admin=info,knocx_core=info,knocx_orgs=info,\
     knocx_licensing=info,knocx_rbac=info,knocx_support=info,knocx_console=info";

#[derive(Parser)]
#[command(name = "knocx-admin")]
#[command(about = "Knocx Admin Console")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Sign in and print the resulting session
    Login {
        /// Operator email
        #[arg(short, long)]
        email: String,

        /// Operator password
        #[arg(short, long)]
        password: String,
    },

    /// Show the overview table of organizations
    Overview,

    /// Organizations panel
    Orgs {
        #[command(subcommand)]
        action: OrgsAction,
    },

    /// Licensing & subscriptions panel
    Licensing {
        #[command(subcommand)]
        action: LicensingAction,
    },

    /// Roles & permissions panel
    Roles {
        #[command(subcommand)]
        action: RolesAction,
    },

    /// Branding & localization panel
    Branding {
        /// Company name to brand as
        #[arg(short, long)]
        company: Option<String>,

        /// Interface language: en, es, ur, ar, fr
        #[arg(short, long)]
        language: Option<String>,

        /// Path to a logo image file
        #[arg(long)]
        logo: Option<String>,
    },

    /// Reporting & analytics panel
    Reporting,

    /// Support panel
    Support {
        #[command(subcommand)]
        action: SupportAction,
    },
}

#[derive(Subcommand)]
enum OrgsAction {
    /// List all organizations
    List,

    /// Create an organization
    Add {
        /// Organization name
        #[arg(long)]
        org_name: String,

        /// Primary user name
        #[arg(long)]
        user_name: String,

        /// Contact email
        #[arg(long)]
        email: String,

        /// Website URL
        #[arg(long, default_value = "")]
        website: String,

        /// Contact number
        #[arg(long, default_value = "")]
        contact: String,

        /// Timezone label
        #[arg(long, default_value = "(UTC+00:00) UTC")]
        timezone: String,

        /// Language: en, es, ur, ar, fr
        #[arg(long, default_value = "en")]
        language: String,

        /// Enable two-factor authentication
        #[arg(long)]
        two_factor: bool,
    },

    /// Delete an organization by id
    Remove {
        /// Organization UUID
        id: String,
    },
}

#[derive(Subcommand)]
enum LicensingAction {
    /// List subscriptions
    Subscriptions,

    /// List plans
    Plans,

    /// Add a subscription
    Subscribe {
        /// Organization name
        #[arg(long)]
        org: String,

        /// Plan name
        #[arg(long)]
        plan: String,

        /// Seat count
        #[arg(long, default_value = "1")]
        seats: u32,
    },

    /// Create a plan
    AddPlan {
        /// Plan name
        #[arg(long)]
        name: String,

        /// Plan description
        #[arg(long, default_value = "")]
        description: String,
    },
}

#[derive(Subcommand)]
enum RolesAction {
    /// List roles
    List,

    /// Create a role
    Add {
        /// Role name
        #[arg(long)]
        name: String,

        /// Comma-separated permission labels
        #[arg(long, default_value = "")]
        permissions: String,
    },

    /// Delete a role by id
    Delete {
        /// Role UUID
        id: String,
    },

    /// List user-role assignments
    Assignments,

    /// Assign a role to a user (both by name)
    Assign {
        /// User name
        #[arg(long)]
        user: String,

        /// Role name
        #[arg(long)]
        role: String,
    },
}

#[derive(Subcommand)]
enum SupportAction {
    /// List tickets
    List,

    /// Create a ticket
    Create {
        /// Ticket subject
        #[arg(long)]
        subject: String,

        /// Problem description
        #[arg(long, default_value = "")]
        description: String,

        /// Priority: high, medium, low
        #[arg(long)]
        priority: Option<String>,

        /// Team or person to assign
        #[arg(long, default_value = "Customer Success Team")]
        assign: String,

        /// Reporting company
        #[arg(long, default_value = "")]
        company: String,

        /// Reporting department
        #[arg(long, default_value = "")]
        department: String,
    },

    /// Show one ticket with its full history and reviews
    Show {
        /// Ticket UUID
        id: String,
    },

    /// Toggle a ticket between open and closed
    Toggle {
        /// Ticket UUID
        id: String,
    },

    /// Add a review to an open ticket
    Review {
        /// Ticket UUID
        id: String,

        /// Review text
        text: String,
    },

    /// Reassign an open ticket
    Assign {
        /// Ticket UUID
        id: String,

        /// Team or person
        assignee: String,
    },

    /// List the teams offered by the reassignment picker
    Teams,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| DEFAULT_LOG_FILTER.into()),
        )
        .init();

    let config = match ConsoleConfig::load() {
        Ok(config) => config,
        Err(e) => {
            tracing::warn!(error = %e, "Configuration load failed, using defaults");
            ConsoleConfig::default()
        }
    };
    let console = AdminConsole::new(&config);

    let cli = Cli::parse();
    match cli.command {
        Commands::Login { email, password } => cmd_login(&console, &email, &password),
        Commands::Overview => cmd_overview(),
        Commands::Orgs { action } => cmd_orgs(&console, action),
        Commands::Licensing { action } => cmd_licensing(&console, action),
        Commands::Roles { action } => cmd_roles(&console, action),
        Commands::Branding {
            company,
            language,
            logo,
        } => cmd_branding(console, company, language, logo),
        Commands::Reporting => cmd_reporting(&console.reporting()),
        Commands::Support { action } => cmd_support(&console, &config, action),
    }
}

fn cmd_login(console: &AdminConsole, email: &str, password: &str) -> Result<()> {
    let session = console.gate.sign_in(email, password);
    println!("Signed in as {} <{}>", session.name, session.email);
    println!(
        "  Session valid until {}",
        session.expires_at.format("%Y-%m-%d %H:%M UTC")
    );
    Ok(())
}

fn cmd_overview() -> Result<()> {
    println!("=== Overview ===");
    println!();
    println!(
        "  {:<20} {:<14} {:>6} {:<8} Renewal",
        "Organization", "Plan", "Users", "Payment"
    );
    println!("  {}", "-".repeat(64));
    for row in overview_rows() {
        println!(
            "  {:<20} {:<14} {:>6} {:<8} {}",
            row.organization, row.plan, row.users, row.payment, row.renewal
        );
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Organizations
// ---------------------------------------------------------------------------

fn cmd_orgs(console: &AdminConsole, action: OrgsAction) -> Result<()> {
    match action {
        OrgsAction::List => {
            let companies = console.companies.list();
            println!("=== Organizations ({}) ===", companies.len());
            println!();
            println!(
                "  {:<38} {:<22} {:<16} {:<26} {:<4} 2FA",
                "ID", "Organization", "User", "Email", "Lang"
            );
            println!("  {}", "-".repeat(114));
            for c in &companies {
                println!(
                    "  {:<38} {:<22} {:<16} {:<26} {:<4} {}",
                    c.id,
                    c.org_name,
                    c.user_name,
                    c.email,
                    c.language.as_str(),
                    if c.two_factor_enabled { "on" } else { "off" },
                );
            }
        }
        OrgsAction::Add {
            org_name,
            user_name,
            email,
            website,
            contact,
            timezone,
            language,
            two_factor,
        } => {
            let form = knocx_orgs::CompanyForm {
                org_name,
                user_name,
                email,
                website,
                contact,
                timezone,
                language: Language::parse(&language),
                logo: String::new(),
                two_factor_enabled: two_factor,
            };
            let company = console.companies.create(form)?;
            println!("Organization created: {} ({})", company.org_name, company.id);
        }
        OrgsAction::Remove { id } => {
            let id = parse_uuid(&id)?;
            if console.companies.delete(id) {
                println!("Organization deleted: {id}");
            } else {
                eprintln!("Organization not found: {id}");
                std::process::exit(1);
            }
        }
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Licensing
// ---------------------------------------------------------------------------

fn cmd_licensing(console: &AdminConsole, action: LicensingAction) -> Result<()> {
    match action {
        LicensingAction::Subscriptions => {
            let subs = console.licensing.subscriptions();
            println!("=== Subscriptions ({}) ===", subs.len());
            println!();
            println!(
                "  {:<22} {:<14} {:>6} Created",
                "Organization", "Plan", "Seats"
            );
            println!("  {}", "-".repeat(58));
            for s in &subs {
                println!(
                    "  {:<22} {:<14} {:>6} {}",
                    s.org_name, s.plan, s.seats, s.created
                );
            }
        }
        LicensingAction::Plans => {
            let plans = console.licensing.plans();
            println!("=== Plans ({}) ===", plans.len());
            println!();
            for p in &plans {
                println!("  {:<14} {}", p.name, p.description);
            }
        }
        LicensingAction::Subscribe { org, plan, seats } => {
            let sub = console.licensing.add_subscription(&org, &plan, seats)?;
            println!(
                "Subscription added: {} on {} ({} seats, created {})",
                sub.org_name, sub.plan, sub.seats, sub.created
            );
        }
        LicensingAction::AddPlan { name, description } => {
            let plan = console.licensing.add_plan(&name, &description)?;
            println!("Plan created: {} ({})", plan.name, plan.description);
        }
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Roles & permissions
// ---------------------------------------------------------------------------

fn cmd_roles(console: &AdminConsole, action: RolesAction) -> Result<()> {
    match action {
        RolesAction::List => {
            let roles = console.access.list_roles();
            println!("=== Roles ({}) ===", roles.len());
            println!();
            for r in &roles {
                println!("  {:<38} {:<10} {}", r.id, r.name, r.permissions.join(", "));
            }
        }
        RolesAction::Add { name, permissions } => {
            let role = console.access.create_role(&name, &permissions)?;
            println!(
                "Role created: {} ({} permissions)",
                role.name,
                role.permissions.len()
            );
        }
        RolesAction::Delete { id } => {
            let id = parse_uuid(&id)?;
            if console.access.delete_role(id) {
                println!("Role deleted: {id}");
                println!("Note: assignments referencing this role are kept as-is.");
            } else {
                eprintln!("Role not found: {id}");
                std::process::exit(1);
            }
        }
        RolesAction::Assignments => {
            let assignments = console.access.assignments();
            println!("=== Assignments ({}) ===", assignments.len());
            println!();
            println!(
                "  {:<4} {:<20} {:<18} {:<10} Permissions",
                "#", "Company", "User", "Role"
            );
            println!("  {}", "-".repeat(80));
            for (i, a) in assignments.iter().enumerate() {
                let row = console.access.resolve(a);
                println!(
                    "  {:<4} {:<20} {:<18} {:<10} {}",
                    i,
                    row.company.as_deref().unwrap_or("-"),
                    row.user.as_deref().unwrap_or("-"),
                    row.role.as_deref().unwrap_or("-"),
                    row.permissions.join(", "),
                );
            }
        }
        RolesAction::Assign { user, role } => {
            let user = console
                .access
                .users()
                .into_iter()
                .find(|u| u.name == user)
                .ok_or_else(|| anyhow::anyhow!("unknown user: {user}"))?;
            let role = console
                .access
                .list_roles()
                .into_iter()
                .find(|r| r.name == role)
                .ok_or_else(|| anyhow::anyhow!("unknown role: {role}"))?;
            console.access.add_assignment(user.id, role.id)?;
            println!("Assigned {} to {}", role.name, user.name);
        }
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Branding
// ---------------------------------------------------------------------------

fn cmd_branding(
    mut console: AdminConsole,
    company: Option<String>,
    language: Option<String>,
    logo: Option<String>,
) -> Result<()> {
    let studio = &mut console.branding;
    if let Some(company) = company {
        studio.set_company(&company);
    }
    if let Some(language) = language {
        studio.set_language(Language::parse(&language));
    }
    if let Some(logo) = logo {
        studio.load_logo_file(std::path::Path::new(&logo))?;
    }

    if studio.is_dirty() {
        let kit = studio.save()?;
        println!("Branding saved:");
        println!("  Company:   {}", kit.company);
        println!("  Language:  {}", kit.language.label());
        println!(
            "  Logo:      {}",
            if kit.logo.is_some() { "set" } else { "none" }
        );
    } else {
        let kit = studio.draft();
        println!("Current branding:");
        println!("  Company:   {}", kit.company);
        println!("  Language:  {}", kit.language.label());
        println!();
        println!("  Available companies:");
        for c in BRANDING_COMPANIES {
            println!("    - {c}");
        }
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Reporting
// ---------------------------------------------------------------------------

fn cmd_reporting(snapshot: &ReportingSnapshot) -> Result<()> {
    println!("=== Reporting & Analytics ===");
    println!();
    for m in &snapshot.metrics {
        println!("  {:<22} {}", m.label, m.value);
    }

    println!();
    println!("  License Usage");
    let peak = snapshot.peak_usage().map(|p| p.licenses).unwrap_or(1);
    for point in &snapshot.usage {
        let bar = "#".repeat((point.licenses * 40 / peak.max(1)) as usize);
        println!("    {:<4} {:<42} {}", point.month, bar, point.licenses);
    }

    println!();
    println!("  Recent Activity");
    for a in &snapshot.activities {
        println!("    {:<12} {:<16} {}", a.date, a.organization, a.action);
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Support
// ---------------------------------------------------------------------------

fn cmd_support(console: &AdminConsole, config: &ConsoleConfig, action: SupportAction) -> Result<()> {
    match action {
        SupportAction::List => {
            let tickets = console.tickets.list_tickets();
            println!("=== Tickets ({}) ===", tickets.len());
            println!();
            for t in &tickets {
                println!("  {} [{}] {}", t.id, t.status, t.subject);
                println!(
                    "      {} | {} | {} | assigned to {}",
                    t.priority, t.company, t.department, t.assigned_to
                );
                for entry in &t.history {
                    println!(
                        "      {} {}",
                        entry.at.format("%Y-%m-%d %H:%M"),
                        entry.action
                    );
                }
                for review in &t.reviews {
                    println!(
                        "      review {} {}",
                        review.at.format("%Y-%m-%d %H:%M"),
                        review.text
                    );
                }
                println!();
            }
        }
        SupportAction::Create {
            subject,
            description,
            priority,
            assign,
            company,
            department,
        } => {
            let priority = TicketPriority::parse(
                priority
                    .as_deref()
                    .unwrap_or(&config.support.default_priority),
            );
            let ticket = console.tickets.create_ticket(
                &subject,
                &description,
                priority,
                &assign,
                &company,
                &department,
            );
            println!("Ticket created: {} ({})", ticket.subject, ticket.id);
        }
        SupportAction::Show { id } => {
            let id = parse_uuid(&id)?;
            let ticket = console
                .tickets
                .get_ticket(id)
                .ok_or_else(|| anyhow::anyhow!("ticket not found: {id}"))?;
            println!("=== Ticket: {} ===", ticket.subject);
            println!();
            println!("  ID:           {}", ticket.id);
            println!("  Status:       {}", ticket.status);
            println!("  Priority:     {}", ticket.priority);
            println!("  Company:      {}", ticket.company);
            println!("  Department:   {}", ticket.department);
            println!("  Assigned to:  {}", ticket.assigned_to);
            println!(
                "  Created:      {}",
                ticket.created_at.format("%Y-%m-%d %H:%M UTC")
            );
            println!();
            println!("  {}", ticket.description);
            println!();
            println!("  History:");
            for entry in &ticket.history {
                println!("    {} {}", entry.at.format("%Y-%m-%d %H:%M"), entry.action);
            }
            if !ticket.reviews.is_empty() {
                println!();
                println!("  Reviews:");
                for review in &ticket.reviews {
                    println!("    {} {}", review.at.format("%Y-%m-%d %H:%M"), review.text);
                }
            }
        }
        SupportAction::Toggle { id } => {
            let ticket = console.tickets.toggle_status(parse_uuid(&id)?)?;
            println!("Ticket {} is now {}", ticket.id, ticket.status);
        }
        SupportAction::Review { id, text } => {
            let ticket = console.tickets.add_review(parse_uuid(&id)?, &text)?;
            println!(
                "Review added to {} ({} reviews)",
                ticket.id,
                ticket.reviews.len()
            );
        }
        SupportAction::Assign { id, assignee } => {
            let ticket = console.tickets.reassign(parse_uuid(&id)?, &assignee)?;
            println!("Ticket {} assigned to {}", ticket.id, ticket.assigned_to);
        }
        SupportAction::Teams => {
            println!("Teams:");
            for team in TEAMS {
                println!("  - {team}");
            }
        }
    }
    Ok(())
}

fn parse_uuid(s: &str) -> Result<Uuid> {
    Uuid::parse_str(s).map_err(|_| anyhow::anyhow!("invalid UUID: {s}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_log_filter_covers_every_crate() {
        for target in [
            "knocx_admin",
            "knocx_core",
            "knocx_orgs",
            "knocx_licensing",
            "knocx_rbac",
            "knocx_support",
            "knocx_console",
        ] {
            assert!(
                DEFAULT_LOG_FILTER.contains(&format!("{target}=info")),
                "missing directive for {target}"
            );
        }
        assert!(tracing_subscriber::EnvFilter::try_new(DEFAULT_LOG_FILTER).is_ok());
    }
}
