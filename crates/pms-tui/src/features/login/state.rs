use std::fmt;

use crate::common::TaskState;

/// Focusable controls of the login form, in tab order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoginField {
    #[default]
    Username,
    Password,
    Submit,
}

impl LoginField {
    pub fn next(self) -> Self {
        match self {
            LoginField::Username => LoginField::Password,
            LoginField::Password => LoginField::Submit,
            LoginField::Submit => LoginField::Username,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            LoginField::Username => LoginField::Submit,
            LoginField::Password => LoginField::Username,
            LoginField::Submit => LoginField::Password,
        }
    }
}

/// Contents of the inline status region.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LoginStatus {
    #[default]
    Idle,
    Authenticating,
    Failed(String),
}

/// Password text that never shows up in `Debug` output or logs.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Password(String);

impl Password {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn expose(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn char_count(&self) -> usize {
        self.0.chars().count()
    }

    pub fn push(&mut self, c: char) {
        self.0.push(c);
    }

    pub fn pop(&mut self) {
        self.0.pop();
    }
}

impl fmt::Debug for Password {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Password(***)")
    }
}

/// Login form state.
#[derive(Debug, Clone, Default)]
pub struct LoginState {
    pub username: String,
    pub password: Password,
    pub focus: LoginField,
    pub status: LoginStatus,
    /// The outstanding login request, if any. Submit is disabled while set.
    pub request: TaskState,
}

impl LoginState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_submitting(&self) -> bool {
        self.request.is_running()
    }

    pub fn submit_enabled(&self) -> bool {
        !self.is_submitting()
    }

    pub(crate) fn push_char(&mut self, c: char) {
        match self.focus {
            LoginField::Username => self.username.push(c),
            LoginField::Password => self.password.push(c),
            LoginField::Submit => {}
        }
    }

    pub(crate) fn backspace(&mut self) {
        match self.focus {
            LoginField::Username => {
                self.username.pop();
            }
            LoginField::Password => self.password.pop(),
            LoginField::Submit => {}
        }
    }
}
