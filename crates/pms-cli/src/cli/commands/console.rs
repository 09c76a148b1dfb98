//! Interactive console.

use anyhow::Result;
use pms_core::config::Config;
use pms_core::session::SessionStore;
use pms_core::storage::FileStorage;

pub async fn run(config: &Config) -> Result<()> {
    let store = SessionStore::open(FileStorage::open_default());
    pms_tui::run_interactive(config, store).await
}
