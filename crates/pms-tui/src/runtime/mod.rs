//! TUI runtime: runs the event loop and executes effects.
//!
//! All side effects happen here. The reducer stays pure and returns effects;
//! async results come back through the inbox and go through the reducer like
//! any other event.
//!
//! Structure:
//! - `mod.rs`: event loop and effect dispatch
//! - `inbox.rs`: inbox channel types
//! - `handlers.rs`: async effect handlers

mod handlers;
mod inbox;

use std::future::Future;
use std::time::Duration;

use anyhow::Result;
use crossterm::event;
use inbox::{UiEventReceiver, UiEventSender};
use pms_core::auth::AuthClient;
use pms_core::session::SessionStore;
use tokio::sync::mpsc;

use crate::effects::UiEffect;
use crate::events::UiEvent;
use crate::state::AppState;
use crate::surface::Surface;
use crate::update;

/// Poll interval while a login request is outstanding.
pub const BUSY_POLL_DURATION: Duration = Duration::from_millis(50);

/// Poll interval when nothing is in flight.
pub const IDLE_POLL_DURATION: Duration = Duration::from_millis(250);

/// Owns the state, the session store and the display surface.
pub struct TuiRuntime<S: Surface> {
    surface: S,
    state: AppState,
    store: SessionStore,
    client: AuthClient,
    inbox_tx: UiEventSender,
    inbox_rx: UiEventReceiver,
}

impl<S: Surface> TuiRuntime<S> {
    /// Creates a runtime showing the store's current session.
    pub fn new(surface: S, store: SessionStore, client: AuthClient) -> Self {
        let state = AppState::new(store.current().clone());
        let (inbox_tx, inbox_rx) = mpsc::unbounded_channel();
        Self {
            surface,
            state,
            store,
            client,
            inbox_tx,
            inbox_rx,
        }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn store(&self) -> &SessionStore {
        &self.store
    }

    /// Runs the event loop until the user quits.
    ///
    /// Must be called from within a tokio runtime; login requests are spawned
    /// onto it.
    ///
    /// # Errors
    /// Returns an error if terminal input cannot be read or a frame cannot be
    /// committed.
    pub fn run(&mut self) -> Result<()> {
        let mut dirty = true;

        while !self.state.should_quit {
            let events = self.collect_events()?;
            if !events.is_empty() {
                dirty = true;
            }
            for event in events {
                self.dispatch(event);
            }

            if dirty && !self.state.should_quit {
                self.draw()?;
                dirty = false;
            }
        }

        Ok(())
    }

    /// Commits the current view to the surface.
    ///
    /// # Errors
    /// Returns an error if the surface cannot be written.
    pub fn draw(&mut self) -> Result<()> {
        let view = self.state.view();
        self.surface.commit(&view)
    }

    fn collect_events(&mut self) -> Result<Vec<UiEvent>> {
        let mut events = Vec::new();

        while let Ok(ev) = self.inbox_rx.try_recv() {
            events.push(ev);
        }

        let poll_duration = if self.state.login.is_submitting() {
            BUSY_POLL_DURATION
        } else {
            IDLE_POLL_DURATION
        };
        if event::poll(poll_duration)? {
            events.push(UiEvent::Terminal(event::read()?));
            while event::poll(Duration::ZERO)? {
                events.push(UiEvent::Terminal(event::read()?));
            }
        }

        Ok(events)
    }

    /// Feeds one event through the reducer and executes the resulting effects.
    pub fn dispatch(&mut self, event: UiEvent) {
        let effects = update::update(&mut self.state, event);
        for effect in effects {
            self.execute_effect(effect);
        }
    }

    /// Waits for the next async result.
    pub async fn recv_inbox(&mut self) -> Option<UiEvent> {
        self.inbox_rx.recv().await
    }

    fn spawn_effect<F, Fut>(&self, f: F)
    where
        F: FnOnce() -> Fut + Send + 'static,
        Fut: Future<Output = UiEvent> + Send + 'static,
    {
        let tx = self.inbox_tx.clone();
        tokio::spawn(async move {
            let _ = tx.send(f().await);
        });
    }

    fn execute_effect(&mut self, effect: UiEffect) {
        match effect {
            UiEffect::Quit => {
                self.state.should_quit = true;
            }
            UiEffect::SubmitLogin {
                task,
                username,
                password,
            } => {
                let client = self.client.clone();
                self.spawn_effect(move || handlers::login(client, task, username, password));
            }
            UiEffect::StoreSession { session } => {
                if let Err(err) = self.store.set(session) {
                    tracing::error!("failed to persist session: {err:#}");
                }
                self.session_changed();
            }
            UiEffect::ClearSession => {
                if let Err(err) = self.store.clear() {
                    tracing::error!("failed to clear session: {err:#}");
                }
                tracing::info!("logged out");
                self.session_changed();
            }
        }
    }

    fn session_changed(&mut self) {
        let session = self.store.current().clone();
        self.dispatch(UiEvent::SessionChanged { session });
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use crossterm::event::{Event, KeyCode, KeyEvent, KeyModifiers};
    use pms_core::auth::UNREACHABLE_MESSAGE;
    use pms_core::session::{SESSION_KEY, Session, StaffId};
    use pms_core::storage::{MemoryStorage, SlotStorage};
    use serde_json::json;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;
    use crate::features::dashboard::PanelKind;
    use crate::features::login::LoginStatus;
    use crate::view::ViewDescription;

    #[derive(Clone, Default)]
    struct RecordingSurface {
        frames: Arc<Mutex<Vec<ViewDescription>>>,
    }

    impl RecordingSurface {
        fn last(&self) -> Option<ViewDescription> {
            self.frames.lock().unwrap().last().cloned()
        }
    }

    impl Surface for RecordingSurface {
        fn commit(&mut self, view: &ViewDescription) -> Result<()> {
            self.frames.lock().unwrap().push(view.clone());
            Ok(())
        }
    }

    fn can_bind_localhost() -> bool {
        std::net::TcpListener::bind("127.0.0.1:0").is_ok()
    }

    fn build_runtime(
        storage: &MemoryStorage,
        base_url: &str,
    ) -> (TuiRuntime<RecordingSurface>, RecordingSurface) {
        let surface = RecordingSurface::default();
        let store = SessionStore::open(storage.clone());
        let client = AuthClient::new(base_url, None).unwrap();
        (TuiRuntime::new(surface.clone(), store, client), surface)
    }

    fn press(runtime: &mut TuiRuntime<RecordingSurface>, code: KeyCode) {
        runtime.dispatch(UiEvent::Terminal(Event::Key(KeyEvent::new(
            code,
            KeyModifiers::NONE,
        ))));
    }

    fn type_text(runtime: &mut TuiRuntime<RecordingSurface>, text: &str) {
        for c in text.chars() {
            press(runtime, KeyCode::Char(c));
        }
    }

    async fn submit_and_wait(runtime: &mut TuiRuntime<RecordingSurface>, user: &str, pw: &str) {
        type_text(runtime, user);
        press(runtime, KeyCode::Enter);
        type_text(runtime, pw);
        press(runtime, KeyCode::Enter);
        assert!(runtime.state().login.is_submitting());

        let event = tokio::time::timeout(Duration::from_secs(10), runtime.recv_inbox())
            .await
            .expect("login result in time")
            .expect("inbox open");
        runtime.dispatch(event);
    }

    fn stored_manager(storage: &mut MemoryStorage, role: &str) {
        let session = Session::authenticated(Some(StaffId::Number(7)), "manager", role);
        storage
            .set(SESSION_KEY, &serde_json::to_string(&session).unwrap())
            .unwrap();
    }

    #[tokio::test]
    async fn successful_login_shows_dashboard_and_persists() {
        if !can_bind_localhost() {
            eprintln!("Skipping: cannot bind localhost TCP port in this environment.");
            return;
        }
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/login"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "message": "Login successful!",
                "staffID": 7,
                "username": "manager",
                "role": "Manager",
            })))
            .expect(1)
            .mount(&server)
            .await;

        let storage = MemoryStorage::new();
        let (mut runtime, surface) = build_runtime(&storage, &format!("{}/api", server.uri()));
        submit_and_wait(&mut runtime, "manager", "securepwd123").await;
        runtime.draw().unwrap();

        let Some(ViewDescription::Dashboard(view)) = surface.last() else {
            panic!("expected dashboard");
        };
        assert_eq!(view.header.logged_in_as(), "Logged in as: manager (Manager)");
        assert_eq!(view.panel.kind, PanelKind::Operations);
        assert!(storage.contains(SESSION_KEY));
        assert!(runtime.store().current().is_authenticated());
    }

    #[tokio::test]
    async fn rejected_login_stays_anonymous() {
        if !can_bind_localhost() {
            eprintln!("Skipping: cannot bind localhost TCP port in this environment.");
            return;
        }
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/login"))
            .respond_with(
                ResponseTemplate::new(401).set_body_json(json!({ "error": "Invalid credentials" })),
            )
            .mount(&server)
            .await;

        let storage = MemoryStorage::new();
        let (mut runtime, _surface) = build_runtime(&storage, &format!("{}/api", server.uri()));
        submit_and_wait(&mut runtime, "manager", "wrong").await;

        assert_eq!(
            runtime.state().login.status,
            LoginStatus::Failed("Invalid credentials".into())
        );
        assert!(runtime.state().login.submit_enabled());
        assert!(!runtime.store().current().is_authenticated());
        assert!(!storage.contains(SESSION_KEY));
    }

    #[tokio::test]
    async fn unreachable_service_shows_network_message() {
        let port = {
            let Ok(listener) = std::net::TcpListener::bind("127.0.0.1:0") else {
                eprintln!("Skipping: cannot bind localhost TCP port in this environment.");
                return;
            };
            listener.local_addr().unwrap().port()
        };

        let storage = MemoryStorage::new();
        let (mut runtime, _surface) = build_runtime(&storage, &format!("http://127.0.0.1:{port}/api"));
        submit_and_wait(&mut runtime, "manager", "securepwd123").await;

        assert_eq!(
            runtime.state().login.status,
            LoginStatus::Failed(UNREACHABLE_MESSAGE.into())
        );
        assert!(runtime.state().login.submit_enabled());
        assert!(!storage.contains(SESSION_KEY));
    }

    #[tokio::test]
    async fn restored_unknown_role_renders_fallback_panel() {
        let mut storage = MemoryStorage::new();
        stored_manager(&mut storage, "Concierge");

        let (mut runtime, surface) = build_runtime(&storage, "http://127.0.0.1:9/api");
        runtime.draw().unwrap();

        let Some(ViewDescription::Dashboard(view)) = surface.last() else {
            panic!("expected dashboard");
        };
        assert_eq!(view.panel.kind, PanelKind::Unrecognized);
        assert!(view.panel.body.contains("Concierge"));
    }

    #[tokio::test]
    async fn logout_removes_record_and_returns_to_login() {
        for role in ["Admin", "Manager", "Receptionist", "Housekeeping", "Concierge"] {
            let mut storage = MemoryStorage::new();
            stored_manager(&mut storage, role);

            let (mut runtime, surface) = build_runtime(&storage, "http://127.0.0.1:9/api");
            press(&mut runtime, KeyCode::Char('l'));
            runtime.draw().unwrap();

            assert!(!storage.contains(SESSION_KEY), "role {role}");
            assert!(!runtime.store().current().is_authenticated());
            assert!(
                matches!(surface.last(), Some(ViewDescription::Login(_))),
                "role {role}"
            );
        }
    }
}
