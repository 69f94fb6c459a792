//! Dashboard shell: role-specific navigation and overview content.

use serde::Serialize;

use super::session::{Role, User};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NavItem {
    pub label: &'static str,
    pub href: &'static str,
    pub active: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NavGroup {
    pub label: &'static str,
    pub items: Vec<NavItem>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Sidebar {
    pub groups: Vec<NavGroup>,
    pub footer: Vec<NavItem>,
    /// Endpoint the footer's Logout button posts to.
    pub logout_action: &'static str,
}

pub const LOGOUT_ACTION: &str = "/api/auth/logout";

const COMMON: &[(&str, &str)] = &[("Dashboard", "/dashboard")];

const CITIZEN_FEATURES: &[(&str, &str)] = &[
    ("Raise Grievance", "/dashboard/grievance"),
    ("Guardian Tracking", "/dashboard/guardian-tracking"),
    ("Emergency Access", "/dashboard/emergency"),
    ("Waste Pickup ETA", "/dashboard/waste-pickup"),
    ("Track Complaints", "/dashboard/complaint-status"),
    ("Issues Heatmap", "/dashboard/heatmap"),
    ("Voice Complaint", "/dashboard/voice-complaint"),
    ("Area Projects", "/dashboard/projects"),
];

const OFFICER_TOOLS: &[(&str, &str)] = &[
    ("Task Assignment", "/dashboard/task-assignment"),
    ("Route Planning", "/dashboard/route-planning"),
    ("Proof of Completion", "/dashboard/proof-upload"),
    ("SLA Timer", "/dashboard/sla-timer"),
];

const ADMIN_PANEL: &[(&str, &str)] = &[
    ("Ward Performance", "/dashboard/performance"),
    ("User Management", "/dashboard/users"),
    ("Budget Dashboard", "/dashboard/budget"),
    ("Infrastructure", "/dashboard/infrastructure"),
];

const FOOTER: &[(&str, &str)] = &[
    ("Profile", "/dashboard/profile"),
    ("Notifications", "/dashboard/notifications"),
    ("Settings", "/dashboard/settings"),
];

fn items(entries: &[(&'static str, &'static str)], current: &str) -> Vec<NavItem> {
    entries
        .iter()
        .map(|&(label, href)| NavItem { label, href, active: href == current })
        .collect()
}

fn group(label: &'static str, entries: &[(&'static str, &'static str)], current: &str) -> NavGroup {
    NavGroup { label, items: items(entries, current) }
}

/// Sidebar for `role`, with the entry for `current_path` marked active.
#[must_use]
pub fn sidebar(role: Role, current_path: &str) -> Sidebar {
    let mut groups = vec![group("Navigation", COMMON, current_path)];
    match role {
        Role::Citizen => groups.push(group("Citizen Features", CITIZEN_FEATURES, current_path)),
        Role::Officer => groups.push(group("Officer Tools", OFFICER_TOOLS, current_path)),
        Role::Admin => {
            groups.push(group("Officer Tools", OFFICER_TOOLS, current_path));
            groups.push(group("Admin Panel", ADMIN_PANEL, current_path));
        }
    }
    Sidebar { groups, footer: items(FOOTER, current_path), logout_action: LOGOUT_ACTION }
}

// =============================================================================
// OVERVIEW
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatCard {
    pub title: &'static str,
    pub value: &'static str,
    pub detail: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TaskDue {
    pub title: &'static str,
    pub due: &'static str,
    pub priority: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuickAction {
    pub label: &'static str,
    pub href: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Overview {
    pub greeting: String,
    pub role: Role,
    pub cards: Vec<StatCard>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub quick_actions: Vec<QuickAction>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tasks_due: Vec<TaskDue>,
}

const fn card(title: &'static str, value: &'static str, detail: &'static str) -> StatCard {
    StatCard { title, value, detail }
}

/// Landing content of `/dashboard` for the logged-in user.
#[must_use]
pub fn overview(user: &User) -> Overview {
    let greeting = format!("Welcome back, {}", user.name);
    match user.role {
        Role::Citizen => Overview {
            greeting,
            role: user.role,
            cards: vec![
                card("My Complaints", "7", "5 resolved, 2 pending"),
                card("Next Waste Pickup", "Today, 5:30 PM", "Est. arrival in 4 hours"),
                card("Guardian Tracking", "Active", "School bus arriving in 15 mins"),
            ],
            quick_actions: vec![
                QuickAction { label: "Raise Grievance", href: "/dashboard/grievance" },
                QuickAction { label: "Emergency", href: "/dashboard/emergency" },
                QuickAction { label: "Waste Pickup", href: "/dashboard/waste-pickup" },
                QuickAction { label: "Track Guardian", href: "/dashboard/guardian-tracking" },
            ],
            tasks_due: Vec::new(),
        },
        Role::Officer => Overview {
            greeting,
            role: user.role,
            cards: vec![
                card("Assigned Tasks", "24", "8 due today"),
                card("Completed Today", "7", "17 remaining"),
                card("SLA Breaches", "2", "Requires immediate attention"),
                card("Critical Issues", "3", "Escalated from citizens"),
            ],
            quick_actions: Vec::new(),
            tasks_due: vec![
                TaskDue { title: "Pothole repair - Main Street", due: "Due in 2 hours", priority: "high" },
                TaskDue { title: "Streetlight outage - Park Avenue", due: "Due in 4 hours", priority: "medium" },
                TaskDue { title: "Garbage overflow - Market Square", due: "Due in 6 hours", priority: "low" },
            ],
        },
        Role::Admin => Overview {
            greeting,
            role: user.role,
            cards: vec![
                card("Total Complaints", "1,248", "+12% from last month"),
                card("Resolved", "842", "67.5% resolution rate"),
                card("Active Officers", "42", "8 in high-priority areas"),
                card("Citizen Satisfaction", "78%", "+5% from previous month"),
            ],
            quick_actions: Vec::new(),
            tasks_due: Vec::new(),
        },
    }
}

#[cfg(test)]
#[path = "dashboard_test.rs"]
mod tests;
