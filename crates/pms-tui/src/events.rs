//! UI event types.
//!
//! All external inputs (terminal input, async results, store changes) are
//! converted to `UiEvent` before being processed by the reducer.

use crossterm::event::Event as CrosstermEvent;
use pms_core::auth::AuthError;
use pms_core::session::Session;

use crate::common::TaskId;

#[derive(Debug)]
pub enum UiEvent {
    /// Raw terminal input.
    Terminal(CrosstermEvent),

    /// A login request finished.
    LoginCompleted {
        task: TaskId,
        result: Result<Session, AuthError>,
    },

    /// The session store changed; the view must follow it.
    SessionChanged { session: Session },
}
