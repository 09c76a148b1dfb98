//! Login view: credential form and the login request lifecycle.

mod state;
mod update;

pub use state::{LoginField, LoginState, LoginStatus, Password};
pub use update::{handle_key, handle_login_result, submit};
