use crossterm::event::{KeyCode, KeyEvent};

use crate::effects::UiEffect;

/// Dashboard key handling: `l` logs out, `q`/`Esc` quits.
pub fn handle_key(key: KeyEvent) -> Vec<UiEffect> {
    match key.code {
        KeyCode::Char('l' | 'L') => vec![UiEffect::ClearSession],
        KeyCode::Char('q' | 'Q') | KeyCode::Esc => vec![UiEffect::Quit],
        _ => vec![],
    }
}

#[cfg(test)]
mod tests {
    use crossterm::event::KeyModifiers;

    use super::*;

    #[test]
    fn l_logs_out_and_q_quits() {
        let key = |c| KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE);

        assert!(matches!(
            handle_key(key('l')).as_slice(),
            [UiEffect::ClearSession]
        ));
        assert!(matches!(handle_key(key('q')).as_slice(), [UiEffect::Quit]));
        assert!(handle_key(key('x')).is_empty());
    }
}
