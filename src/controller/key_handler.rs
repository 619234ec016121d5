use crate::controller::command_types::{Action, FormAction};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

pub struct KeyHandler;

impl KeyHandler {
    /// Map a key in browse mode, tracking a pending `g` for `gg`
    pub fn parse_browse_key_with_state(
        key_event: &KeyEvent,
        pending_key: &mut Option<char>,
    ) -> Option<Action> {
        let key = key_event.code;

        if let Some(pending) = pending_key.take() {
            return match (pending, key) {
                ('g', KeyCode::Char('g')) => Some(Action::MoveTop),
                _ => None, // Invalid sequence, drop it
            };
        }

        if key == KeyCode::Char('g') && key_event.modifiers.is_empty() {
            *pending_key = Some('g');
            return None;
        }

        Self::parse_browse_key(key, key_event.modifiers)
    }

    fn parse_browse_key(key: KeyCode, modifiers: KeyModifiers) -> Option<Action> {
        match key {
            KeyCode::Char('a') if modifiers.contains(KeyModifiers::CONTROL) => {
                Some(Action::SetForAll)
            }

            // Cursor movement
            KeyCode::Char('j') | KeyCode::Down => Some(Action::MoveDown),
            KeyCode::Char('k') | KeyCode::Up => Some(Action::MoveUp),
            KeyCode::Char('G') | KeyCode::End => Some(Action::MoveBottom),
            KeyCode::Home => Some(Action::MoveTop),
            KeyCode::Char('h') | KeyCode::Left => Some(Action::FocusEnabled),
            KeyCode::Char('l') | KeyCode::Right => Some(Action::FocusDisabled),
            KeyCode::Tab => Some(Action::FocusOther),

            // Entries
            KeyCode::Enter => Some(Action::SelectEntry),
            KeyCode::Char(' ') | KeyCode::Char('m') => Some(Action::ToggleEntry),
            KeyCode::Char('<') => Some(Action::EnableAll),
            KeyCode::Char('>') => Some(Action::DisableAll),
            KeyCode::Char('K') => Some(Action::ShiftUp),
            KeyCode::Char('J') => Some(Action::ShiftDown),
            KeyCode::Char('x') => Some(Action::ClearSelection),
            KeyCode::Char('A') => Some(Action::SetForAll),

            // Output
            KeyCode::Char('w') => Some(Action::Export),
            KeyCode::Char('y') => Some(Action::YankExport),

            // Modes
            KeyCode::Char('i') | KeyCode::Char('e') => Some(Action::EditForm),
            KeyCode::Char(':') => Some(Action::EnterCommandMode),
            KeyCode::Char('/') => Some(Action::EnterFilterMode),
            KeyCode::Char('?') | KeyCode::F(1) => Some(Action::ToggleHelp),
            _ => None,
        }
    }

    pub fn parse_form_key(key_event: &KeyEvent) -> Option<FormAction> {
        let modifiers = key_event.modifiers;
        match key_event.code {
            KeyCode::Char('x') if modifiers.contains(KeyModifiers::CONTROL) => {
                Some(FormAction::ClearSelection)
            }
            KeyCode::Char('a') if modifiers.contains(KeyModifiers::CONTROL) => {
                Some(FormAction::SetForAll)
            }
            KeyCode::Down | KeyCode::Tab => Some(FormAction::NextField),
            KeyCode::Up | KeyCode::BackTab => Some(FormAction::PrevField),
            KeyCode::Right => Some(FormAction::Increase),
            KeyCode::Left => Some(FormAction::Decrease),
            KeyCode::Backspace => Some(FormAction::Backspace),
            KeyCode::Enter => Some(FormAction::Commit),
            KeyCode::Esc => Some(FormAction::Leave),
            KeyCode::Char(c) if !modifiers.contains(KeyModifiers::CONTROL) => {
                Some(FormAction::Input(c))
            }
            _ => None,
        }
    }
}
