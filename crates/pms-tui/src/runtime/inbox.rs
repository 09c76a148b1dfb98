//! Inbox channel for async results.
//!
//! Spawned handlers send their `UiEvent` here; the runtime drains it every
//! loop iteration.

use tokio::sync::mpsc;

use crate::events::UiEvent;

pub type UiEventSender = mpsc::UnboundedSender<UiEvent>;
pub type UiEventReceiver = mpsc::UnboundedReceiver<UiEvent>;
