//! TUI reducer.
//!
//! All state mutations happen here. The runtime calls `update(app, event)`
//! and executes the returned effects.

use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::effects::UiEffect;
use crate::events::UiEvent;
use crate::features::{dashboard, login};
use crate::features::login::LoginState;
use crate::state::AppState;

pub fn update(app: &mut AppState, event: UiEvent) -> Vec<UiEffect> {
    match event {
        UiEvent::Terminal(Event::Key(key)) => handle_key(app, key),
        UiEvent::Terminal(_) => vec![],
        UiEvent::LoginCompleted { task, result } => {
            login::handle_login_result(&mut app.login, task, result)
        }
        UiEvent::SessionChanged { session } => {
            app.session = session;
            app.login = LoginState::new();
            vec![]
        }
    }
}

fn handle_key(app: &mut AppState, key: KeyEvent) -> Vec<UiEffect> {
    if key.kind != KeyEventKind::Press {
        return vec![];
    }

    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        app.should_quit = true;
        return vec![UiEffect::Quit];
    }

    let effects = if app.session.is_authenticated() {
        dashboard::handle_key(key)
    } else {
        login::handle_key(&mut app.login, &mut app.task_seq, key)
    };

    if effects.iter().any(|effect| matches!(effect, UiEffect::Quit)) {
        app.should_quit = true;
    }
    effects
}
