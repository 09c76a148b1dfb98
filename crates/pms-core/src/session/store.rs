use anyhow::{Context, Result};

use super::Session;
use crate::storage::SlotStorage;

/// Storage key holding the serialized session record.
pub const SESSION_KEY: &str = "hotel_user";

/// Owns the current session and mirrors it into durable storage.
///
/// The store never renders anything; callers re-render after `set`/`clear`.
pub struct SessionStore {
    storage: Box<dyn SlotStorage>,
    current: Session,
}

impl SessionStore {
    /// Creates a store with an anonymous session, without reading storage.
    pub fn new(storage: impl SlotStorage + 'static) -> Self {
        Self {
            storage: Box::new(storage),
            current: Session::Anonymous,
        }
    }

    /// Creates a store and restores any persisted session into memory.
    pub fn open(storage: impl SlotStorage + 'static) -> Self {
        let mut store = Self::new(storage);
        store.current = store.restore();
        store
    }

    /// Reads the persisted session.
    ///
    /// Missing, unreadable, or corrupt records yield an anonymous session.
    pub fn restore(&self) -> Session {
        let raw = match self.storage.get(SESSION_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Session::Anonymous,
            Err(err) => {
                tracing::warn!("ignoring unreadable session storage: {err:#}");
                return Session::Anonymous;
            }
        };

        match serde_json::from_str::<Session>(&raw) {
            Ok(session) => {
                if let Some(identity) = session.identity() {
                    tracing::debug!(
                        username = %identity.username,
                        role = %identity.role,
                        "restored session"
                    );
                }
                session
            }
            Err(err) => {
                tracing::warn!("ignoring corrupt session record: {err}");
                Session::Anonymous
            }
        }
    }

    pub fn current(&self) -> &Session {
        &self.current
    }

    /// Replaces the current session and persists it.
    ///
    /// An anonymous session is handled as [`SessionStore::clear`]. The
    /// in-memory value is updated even if the write fails.
    ///
    /// # Errors
    /// Returns an error if the session cannot be written to storage.
    pub fn set(&mut self, session: Session) -> Result<()> {
        if !session.is_authenticated() {
            return self.clear();
        }

        let raw = serde_json::to_string(&session).context("Failed to serialize session")?;
        self.current = session;
        self.storage
            .set(SESSION_KEY, &raw)
            .context("Failed to persist session")
    }

    /// Resets to an anonymous session and removes the persisted record.
    ///
    /// # Errors
    /// Returns an error if the record cannot be removed from storage.
    pub fn clear(&mut self) -> Result<()> {
        self.current = Session::Anonymous;
        self.storage
            .remove(SESSION_KEY)
            .context("Failed to remove persisted session")
    }
}
