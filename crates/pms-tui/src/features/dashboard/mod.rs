//! Dashboard view: header plus the panel for the signed-in role.

mod panels;
mod update;

pub use panels::{PanelKind, panel_for};
pub use update::handle_key;
