//! Non-interactive session commands.

use std::io::stdout;

use anyhow::{Context, Result};
use pms_core::auth::AuthClient;
use pms_core::config::Config;
use pms_core::session::SessionStore;
use pms_core::storage::FileStorage;
use pms_tui::login::LoginState;
use pms_tui::{PlainText, Surface, render_app};

fn open_store() -> SessionStore {
    SessionStore::open(FileStorage::open_default())
}

pub async fn login(config: &Config, username: &str, password: &str) -> Result<()> {
    let client = AuthClient::from_config(config)?;

    // only the inline message is shown; the cause goes to the log
    let session = match client.login(username, password).await {
        Ok(session) => session,
        Err(err) => anyhow::bail!("{err}"),
    };

    let mut store = open_store();
    store
        .set(session)
        .context("Logged in, but the session could not be saved")?;

    if let Some(identity) = store.current().identity() {
        println!("Logged in as: {} ({})", identity.username, identity.role);
    }
    Ok(())
}

pub fn logout() -> Result<()> {
    let mut store = open_store();
    let was_authenticated = store.current().is_authenticated();
    store.clear()?;

    if was_authenticated {
        tracing::info!("logged out");
        println!("Logged out.");
    } else {
        println!("Not logged in.");
    }
    Ok(())
}

pub fn status() -> Result<()> {
    let store = open_store();
    let view = render_app(store.current(), &LoginState::new());
    PlainText::new(stdout().lock()).commit(&view)
}
