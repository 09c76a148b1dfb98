//! Login form reducer.
//!
//! Handles field editing, submission, and the login request result.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use pms_core::auth::{AuthError, CredentialField};
use pms_core::session::Session;

use super::{LoginField, LoginState, LoginStatus};
use crate::common::{TaskId, TaskSeq};
use crate::effects::UiEffect;

pub fn handle_key(login: &mut LoginState, task_seq: &mut TaskSeq, key: KeyEvent) -> Vec<UiEffect> {
    match key.code {
        KeyCode::Esc => vec![UiEffect::Quit],
        KeyCode::Tab | KeyCode::Down => {
            login.focus = login.focus.next();
            vec![]
        }
        KeyCode::BackTab | KeyCode::Up => {
            login.focus = login.focus.prev();
            vec![]
        }
        KeyCode::Enter => match login.focus {
            LoginField::Username => {
                login.focus = LoginField::Password;
                vec![]
            }
            LoginField::Password | LoginField::Submit => submit(login, task_seq),
        },
        KeyCode::Char(' ') if login.focus == LoginField::Submit => submit(login, task_seq),
        KeyCode::Char(c)
            if !key
                .modifiers
                .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) =>
        {
            login.push_char(c);
            vec![]
        }
        KeyCode::Backspace => {
            login.backspace();
            vec![]
        }
        _ => vec![],
    }
}

/// Submits the form.
///
/// Ignored while a request is outstanding. Empty fields are reported inline
/// and nothing is sent.
pub fn submit(login: &mut LoginState, task_seq: &mut TaskSeq) -> Vec<UiEffect> {
    if login.is_submitting() {
        return vec![];
    }

    let missing = if login.username.is_empty() {
        Some(CredentialField::Username)
    } else if login.password.is_empty() {
        Some(CredentialField::Password)
    } else {
        None
    };
    if let Some(field) = missing {
        login.status = LoginStatus::Failed(AuthError::MissingField(field).to_string());
        login.focus = match field {
            CredentialField::Username => LoginField::Username,
            CredentialField::Password => LoginField::Password,
        };
        return vec![];
    }

    let task = task_seq.next_id();
    login.request.start(task);
    login.status = LoginStatus::Authenticating;

    vec![UiEffect::SubmitLogin {
        task,
        username: login.username.clone(),
        password: login.password.clone(),
    }]
}

/// Applies the outcome of a login request.
///
/// On success the session is handed to the store; the form itself is reset
/// once the store reports the change. Failures are shown inline. Either way
/// the submit control is enabled again.
pub fn handle_login_result(
    login: &mut LoginState,
    task: TaskId,
    result: Result<Session, AuthError>,
) -> Vec<UiEffect> {
    if !login.request.finish_if_active(task) {
        tracing::debug!(?task, "dropping stale login result");
        return vec![];
    }

    match result {
        Ok(session) => {
            login.status = LoginStatus::Idle;
            vec![UiEffect::StoreSession { session }]
        }
        Err(err) => {
            login.status = LoginStatus::Failed(err.to_string());
            vec![]
        }
    }
}
