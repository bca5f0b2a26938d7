use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// What a key press asks the app to do
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum KeyAction {
    Quit,
    Restart,
    /// The input field's full contents after the key is applied
    Edit(String),
    Ignore,
}

/// Map a key press onto the input field holding `current`.
///
/// Quit and restart always work. Editing keys are dropped while the input
/// surface is disabled.
pub fn map_key(key: KeyEvent, current: &str, input_enabled: bool) -> KeyAction {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

    match key.code {
        KeyCode::Esc => KeyAction::Quit,
        KeyCode::Char('c') if ctrl => KeyAction::Quit,
        KeyCode::Char('r') if ctrl => KeyAction::Restart,
        _ if !input_enabled => KeyAction::Ignore,
        KeyCode::Char(_) if ctrl => KeyAction::Ignore,
        KeyCode::Char(c) => {
            let mut value = current.to_string();
            value.push(c);
            KeyAction::Edit(value)
        }
        KeyCode::Enter => {
            let mut value = current.to_string();
            value.push('\n');
            KeyAction::Edit(value)
        }
        KeyCode::Backspace => {
            let mut value = current.to_string();
            if value.pop().is_none() {
                return KeyAction::Ignore;
            }
            KeyAction::Edit(value)
        }
        _ => KeyAction::Ignore,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn ctrl(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
    }

    #[test]
    fn test_char_appends() {
        assert_eq!(
            map_key(key(KeyCode::Char('t')), "ca", true),
            KeyAction::Edit("cat".into())
        );
    }

    #[test]
    fn test_shifted_char_appends() {
        let shifted = KeyEvent::new(KeyCode::Char('L'), KeyModifiers::SHIFT);
        assert_eq!(map_key(shifted, "", true), KeyAction::Edit("L".into()));
    }

    #[test]
    fn test_enter_appends_newline() {
        assert_eq!(
            map_key(key(KeyCode::Enter), "hello", true),
            KeyAction::Edit("hello\n".into())
        );
    }

    #[test]
    fn test_backspace_removes_last_char() {
        assert_eq!(
            map_key(key(KeyCode::Backspace), "it’", true),
            KeyAction::Edit("it".into())
        );
        assert_eq!(map_key(key(KeyCode::Backspace), "", true), KeyAction::Ignore);
    }

    #[test]
    fn test_quit_keys() {
        assert_eq!(map_key(key(KeyCode::Esc), "", true), KeyAction::Quit);
        assert_eq!(map_key(ctrl('c'), "", true), KeyAction::Quit);
        assert_eq!(map_key(key(KeyCode::Esc), "", false), KeyAction::Quit);
    }

    #[test]
    fn test_restart_works_when_disabled() {
        assert_eq!(map_key(ctrl('r'), "abc", true), KeyAction::Restart);
        assert_eq!(map_key(ctrl('r'), "abc", false), KeyAction::Restart);
    }

    #[test]
    fn test_disabled_input_ignores_edits() {
        assert_eq!(map_key(key(KeyCode::Char('a')), "", false), KeyAction::Ignore);
        assert_eq!(map_key(key(KeyCode::Enter), "x", false), KeyAction::Ignore);
        assert_eq!(map_key(key(KeyCode::Backspace), "x", false), KeyAction::Ignore);
    }

    #[test]
    fn test_other_keys_ignored() {
        assert_eq!(map_key(key(KeyCode::Left), "x", true), KeyAction::Ignore);
        assert_eq!(map_key(ctrl('x'), "x", true), KeyAction::Ignore);
    }
}
