//! Form key handling.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::FormState;

/// What a key press asks the reducer to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormAction {
    None,
    Submit,
    Back,
    /// Ctrl+L: show the login form.
    ShowLogin,
    /// Ctrl+R: show the register form.
    ShowRegister,
}

/// Applies a key to the form. Edits are ignored while submitting.
pub fn handle_form_key(form: &mut FormState, key: KeyEvent) -> FormAction {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

    match key.code {
        KeyCode::Esc => FormAction::Back,
        KeyCode::Char('l') if ctrl => FormAction::ShowLogin,
        KeyCode::Char('r') if ctrl => FormAction::ShowRegister,
        KeyCode::Tab | KeyCode::Down => {
            form.focus_next();
            FormAction::None
        }
        KeyCode::BackTab | KeyCode::Up => {
            form.focus_prev();
            FormAction::None
        }
        KeyCode::Enter => {
            if form.submitting {
                FormAction::None
            } else if form.submit_focused() || form.focus + 1 == form.fields.len() {
                FormAction::Submit
            } else {
                form.focus_next();
                FormAction::None
            }
        }
        KeyCode::Backspace if !form.submitting => {
            if let Some(field) = form.focused_field_mut() {
                field.value.pop();
            }
            FormAction::None
        }
        KeyCode::Char(c) if !ctrl && !form.submitting => {
            if let Some(field) = form.focused_field_mut() {
                field.value.push(c);
            }
            FormAction::None
        }
        _ => FormAction::None,
    }
}

/// Inserts pasted text into the focused field (first line only).
pub fn handle_form_paste(form: &mut FormState, text: &str) {
    if form.submitting {
        return;
    }
    let line = text.lines().next().unwrap_or("");
    if let Some(field) = form.focused_field_mut() {
        field.value.push_str(line);
    }
}
