//! Interactive terminal console for Hotel PMS.

pub mod common;
pub mod effects;
pub mod events;
pub mod features;
pub mod render;
pub mod runtime;
pub mod state;
pub mod surface;
pub mod terminal;
pub mod update;
pub mod view;

use std::io::{IsTerminal, stdout};

use anyhow::Result;
pub use features::{dashboard, login};
use pms_core::auth::AuthClient;
use pms_core::config::Config;
use pms_core::session::SessionStore;
pub use runtime::TuiRuntime;
pub use surface::{PlainText, Surface, TerminalSurface};
pub use view::{ViewDescription, render_app};

/// Runs the interactive console until the user quits.
///
/// # Errors
/// Returns an error if stdout is not a terminal, the auth client cannot be
/// built from `config`, or the terminal fails.
pub async fn run_interactive(config: &Config, store: SessionStore) -> Result<()> {
    if !stdout().is_terminal() {
        anyhow::bail!(
            "The console requires a terminal.\n\
             Use `pms login` and `pms status` for non-interactive use."
        );
    }

    let client = AuthClient::from_config(config)?;
    let surface = TerminalSurface::enter()?;
    let mut runtime = TuiRuntime::new(surface, store, client);
    runtime.run()
}
