//! Application state owned by the runtime and mutated only by the reducer.

use pms_core::session::Session;

use crate::common::TaskSeq;
use crate::features::login::LoginState;
use crate::view::{ViewDescription, render_app};

#[derive(Debug, Default)]
pub struct AppState {
    pub should_quit: bool,
    /// Mirror of the session store's current value.
    pub session: Session,
    pub login: LoginState,
    pub task_seq: TaskSeq,
}

impl AppState {
    pub fn new(session: Session) -> Self {
        Self {
            session,
            ..Self::default()
        }
    }

    pub fn view(&self) -> ViewDescription {
        render_app(&self.session, &self.login)
    }
}
