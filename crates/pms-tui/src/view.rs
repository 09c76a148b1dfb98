//! Pure view descriptions.
//!
//! `render_app` turns the session and the login form into a
//! [`ViewDescription`]. Nothing here draws; a [`crate::surface::Surface`]
//! commits a description to a display.

use pms_core::session::{Session, StaffIdentity};

use crate::features::dashboard::{PanelKind, panel_for};
use crate::features::login::{LoginField, LoginState, LoginStatus};

pub const APP_TITLE: &str = "Hotel PMS";
pub const LOGIN_TITLE: &str = "Welcome to Hotel PMS";
pub const LOGIN_SUBTITLE: &str = "Sign in with your staff credentials.";
pub const SUBMIT_LABEL: &str = "Sign In";
pub const AUTHENTICATING_LABEL: &str = "Authenticating...";
pub const TEST_USERS_HINT: &str =
    "Test users created: sysadmin, manager, reception, housekeeping";
pub const LOGOUT_LABEL: &str = "Logout";

/// Visual emphasis; surfaces map it to colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Neutral,
    Error,
    Admin,
    Manager,
    Guest,
    Warning,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewDescription {
    Login(LoginView),
    Dashboard(DashboardView),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusLine {
    pub text: String,
    pub tone: Tone,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginView {
    pub title: &'static str,
    pub subtitle: &'static str,
    pub username: String,
    /// One mask character per password character.
    pub password_mask: String,
    pub focus: LoginField,
    pub status: Option<StatusLine>,
    pub submit_label: &'static str,
    pub submit_enabled: bool,
    pub hint: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderView {
    pub title: &'static str,
    pub username: String,
    pub role: String,
    pub logout_label: &'static str,
}

impl HeaderView {
    pub fn logged_in_as(&self) -> String {
        format!("Logged in as: {} ({})", self.username, self.role)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PanelNote {
    pub title: String,
    pub detail: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PanelView {
    pub kind: PanelKind,
    pub heading: String,
    pub body: String,
    pub note: Option<PanelNote>,
    pub tone: Tone,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardView {
    pub header: HeaderView,
    pub panel: PanelView,
}

/// Chooses the view for the current session.
///
/// Anonymous sessions always get the login view; authenticated sessions
/// always get the dashboard.
pub fn render_app(session: &Session, login: &LoginState) -> ViewDescription {
    match session {
        Session::Anonymous => ViewDescription::Login(login_view(login)),
        Session::Authenticated(identity) => ViewDescription::Dashboard(dashboard_view(identity)),
    }
}

fn login_view(login: &LoginState) -> LoginView {
    let status = match &login.status {
        LoginStatus::Idle => None,
        LoginStatus::Authenticating => Some(StatusLine {
            text: AUTHENTICATING_LABEL.to_string(),
            tone: Tone::Neutral,
        }),
        LoginStatus::Failed(message) => Some(StatusLine {
            text: message.clone(),
            tone: Tone::Error,
        }),
    };

    LoginView {
        title: LOGIN_TITLE,
        subtitle: LOGIN_SUBTITLE,
        username: login.username.clone(),
        password_mask: "•".repeat(login.password.char_count()),
        focus: login.focus,
        status,
        submit_label: SUBMIT_LABEL,
        submit_enabled: login.submit_enabled(),
        hint: TEST_USERS_HINT,
    }
}

fn dashboard_view(identity: &StaffIdentity) -> DashboardView {
    DashboardView {
        header: HeaderView {
            title: APP_TITLE,
            username: identity.username.clone(),
            role: identity.role.to_string(),
            logout_label: LOGOUT_LABEL,
        },
        panel: panel_for(&identity.role),
    }
}
