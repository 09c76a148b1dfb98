//! UI effect types.
//!
//! Effects are commands returned by the reducer that the runtime executes.
//! The reducer never touches the network or storage directly.

use pms_core::session::Session;

use crate::common::TaskId;
use crate::features::login::Password;

/// Effects returned by the reducer for the runtime to execute.
#[derive(Debug)]
pub enum UiEffect {
    /// Quit the application.
    Quit,

    /// Send a login request; the outcome comes back as `UiEvent::LoginCompleted`.
    SubmitLogin {
        task: TaskId,
        username: String,
        password: Password,
    },

    /// Persist a freshly authenticated session.
    StoreSession { session: Session },

    /// Forget the current session (logout).
    ClearSession,
}
