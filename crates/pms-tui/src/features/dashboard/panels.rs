//! Role-specific dashboard panels.
//!
//! Every role maps to exactly one panel. Roles the console does not know get
//! the access-denied panel, which is a normal display state.

use pms_core::session::Role;

use crate::view::{PanelNote, PanelView, Tone};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelKind {
    Administration,
    Operations,
    GuestServices,
    Unrecognized,
}

impl PanelKind {
    pub fn for_role(role: &Role) -> Self {
        match role {
            Role::Admin => PanelKind::Administration,
            Role::Manager => PanelKind::Operations,
            Role::Receptionist | Role::Housekeeping => PanelKind::GuestServices,
            Role::Unrecognized(_) => PanelKind::Unrecognized,
        }
    }

    fn build(self, role: &Role) -> PanelView {
        match self {
            PanelKind::Administration => administration(),
            PanelKind::Operations => operations(),
            PanelKind::GuestServices => guest_services(role),
            PanelKind::Unrecognized => unrecognized(role),
        }
    }
}

/// Builds the panel shown to `role`.
pub fn panel_for(role: &Role) -> PanelView {
    PanelKind::for_role(role).build(role)
}

fn administration() -> PanelView {
    PanelView {
        kind: PanelKind::Administration,
        heading: "System Administration Dashboard".into(),
        body: "Welcome, Admin. You have full access to User Management, Pricing, and System \
               Configuration."
            .into(),
        note: Some(PanelNote {
            title: "Admin View: Placeholder".into(),
            detail: "Staff CRUD, Room Types, and Services interfaces will be built here.".into(),
        }),
        tone: Tone::Admin,
    }
}

fn operations() -> PanelView {
    PanelView {
        kind: PanelKind::Operations,
        heading: "Financial & Operational Oversight".into(),
        body: "Welcome, Manager. Access is granted for Billing, Payments, and Room Audits.".into(),
        note: Some(PanelNote {
            title: "Manager View: Placeholder".into(),
            detail: "Financial audit and status monitoring tools will be displayed here.".into(),
        }),
        tone: Tone::Manager,
    }
}

fn guest_services(role: &Role) -> PanelView {
    PanelView {
        kind: PanelKind::GuestServices,
        heading: "Guests & Reservations Console".into(),
        body: format!(
            "Welcome, {role}. Your primary functions are guest check-in/out and new bookings."
        ),
        note: Some(PanelNote {
            title: "Receptionist View: Placeholder".into(),
            detail: "The functional Guest List and Reservation Form will be built here.".into(),
        }),
        tone: Tone::Guest,
    }
}

fn unrecognized(role: &Role) -> PanelView {
    PanelView {
        kind: PanelKind::Unrecognized,
        heading: "Access Denied".into(),
        body: format!(
            "Your role ({role}) is not recognized or authorized to view this dashboard."
        ),
        note: None,
        tone: Tone::Warning,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn housekeeping_shares_guest_console_with_own_name() {
        let panel = panel_for(&Role::Housekeeping);

        assert_eq!(panel.kind, PanelKind::GuestServices);
        assert!(panel.body.starts_with("Welcome, Housekeeping."));
    }

    #[test]
    fn admin_panel_has_placeholder_note() {
        let panel = panel_for(&Role::Admin);

        assert_eq!(panel.heading, "System Administration Dashboard");
        assert_eq!(
            panel.note.map(|note| note.title),
            Some("Admin View: Placeholder".to_string())
        );
    }

    #[test]
    fn role_names_are_case_sensitive() {
        let role = Role::from("manager");

        assert_eq!(PanelKind::for_role(&role), PanelKind::Unrecognized);
        assert!(panel_for(&role).body.contains("(manager)"));
    }
}
