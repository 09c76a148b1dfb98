//! Authenticated-user session model.
//!
//! A `Session` is either anonymous or carries a complete staff identity, so
//! identity fields can never outlive a logout. The serialized form is the
//! flat record the console has always persisted:
//!
//! ```text
//! { "isAuthenticated": true, "staffID": 7, "username": "manager", "role": "Manager" }
//! ```

mod store;

use std::fmt;

use serde::{Deserialize, Serialize};
pub use store::{SESSION_KEY, SessionStore};

/// Staff category controlling which dashboard panel is shown.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Role {
    Admin,
    Manager,
    Receptionist,
    Housekeeping,
    /// Any other value returned by the auth service, kept verbatim.
    Unrecognized(String),
}

impl Role {
    pub fn as_str(&self) -> &str {
        match self {
            Role::Admin => "Admin",
            Role::Manager => "Manager",
            Role::Receptionist => "Receptionist",
            Role::Housekeeping => "Housekeeping",
            Role::Unrecognized(raw) => raw,
        }
    }

    pub fn is_recognized(&self) -> bool {
        !matches!(self, Role::Unrecognized(_))
    }
}

impl From<&str> for Role {
    fn from(raw: &str) -> Self {
        match raw {
            "Admin" => Role::Admin,
            "Manager" => Role::Manager,
            "Receptionist" => Role::Receptionist,
            "Housekeeping" => Role::Housekeeping,
            other => Role::Unrecognized(other.to_string()),
        }
    }
}

impl From<String> for Role {
    fn from(raw: String) -> Self {
        match Role::from(raw.as_str()) {
            Role::Unrecognized(_) => Role::Unrecognized(raw),
            known => known,
        }
    }
}

impl From<Role> for String {
    fn from(role: Role) -> Self {
        match role {
            Role::Unrecognized(raw) => raw,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Opaque staff identifier as issued by the auth service.
///
/// Any JSON value is accepted; values that are neither an `i64` nor a string
/// are kept in `Other` and written back unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StaffId {
    Number(i64),
    Text(String),
    Other(serde_json::Value),
}

impl fmt::Display for StaffId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StaffId::Number(n) => write!(f, "{n}"),
            StaffId::Text(s) => f.write_str(s),
            StaffId::Other(value) => write!(f, "{value}"),
        }
    }
}

/// Identity of an authenticated staff member.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StaffIdentity {
    pub staff_id: Option<StaffId>,
    pub username: String,
    pub role: Role,
}

/// Current authentication status.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "SessionRecord", into = "SessionRecord")]
pub enum Session {
    #[default]
    Anonymous,
    Authenticated(StaffIdentity),
}

impl Session {
    /// Builds an authenticated session.
    ///
    /// Returns an anonymous session if `username` or `role` is empty, since
    /// an authenticated session without an identity cannot be displayed.
    pub fn authenticated(
        staff_id: Option<StaffId>,
        username: impl Into<String>,
        role: impl Into<Role>,
    ) -> Self {
        let username = username.into();
        let role = role.into();
        if username.is_empty() || role.as_str().is_empty() {
            return Session::Anonymous;
        }
        Session::Authenticated(StaffIdentity {
            staff_id,
            username,
            role,
        })
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(self, Session::Authenticated(_))
    }

    pub fn identity(&self) -> Option<&StaffIdentity> {
        match self {
            Session::Anonymous => None,
            Session::Authenticated(identity) => Some(identity),
        }
    }

    pub fn username(&self) -> Option<&str> {
        self.identity().map(|identity| identity.username.as_str())
    }

    pub fn role(&self) -> Option<&Role> {
        self.identity().map(|identity| &identity.role)
    }
}

/// Flat persisted form of a [`Session`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SessionRecord {
    #[serde(default)]
    is_authenticated: bool,
    #[serde(rename = "staffID", default, skip_serializing_if = "Option::is_none")]
    staff_id: Option<StaffId>,
    #[serde(default)]
    username: Option<String>,
    #[serde(default)]
    role: Option<String>,
}

impl From<SessionRecord> for Session {
    fn from(record: SessionRecord) -> Self {
        if !record.is_authenticated {
            return Session::Anonymous;
        }
        Session::authenticated(
            record.staff_id,
            record.username.unwrap_or_default(),
            record.role.unwrap_or_default(),
        )
    }
}

impl From<Session> for SessionRecord {
    fn from(session: Session) -> Self {
        match session {
            Session::Anonymous => SessionRecord::default(),
            Session::Authenticated(identity) => SessionRecord {
                is_authenticated: true,
                staff_id: identity.staff_id,
                username: Some(identity.username),
                role: Some(identity.role.into()),
            },
        }
    }
}
