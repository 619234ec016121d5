use crate::controller::shared_state::{ModeController, ModeTransition, SharedEditorState};
use crate::controller::command_types::Mode;
use crossterm::event::{KeyCode, KeyEvent};
use regex::Regex;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FilterError {
    #[error("Invalid pattern: {0}")]
    InvalidPattern(#[from] regex::Error),
}

/// Narrows both pool listings to entries matching a pattern.
/// Case insensitive, like a vim search.
#[derive(Debug, Clone, Default)]
pub struct EntryFilter {
    pattern: String,
    regex: Option<Regex>,
}

impl EntryFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_pattern(&mut self, pattern: &str) -> Result<(), FilterError> {
        if pattern.is_empty() {
            self.clear();
            return Ok(());
        }
        let regex = Regex::new(&format!("(?i){pattern}"))?;
        self.pattern = pattern.to_string();
        self.regex = Some(regex);
        Ok(())
    }

    pub fn clear(&mut self) {
        self.pattern.clear();
        self.regex = None;
    }

    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    pub fn is_active(&self) -> bool {
        self.regex.is_some()
    }

    pub fn matches(&self, name: &str) -> bool {
        self.regex.as_ref().is_none_or(|re| re.is_match(name))
    }
}

/// Live filter input started with `/`
pub struct FilterController {
    pub input: String,
}

impl FilterController {
    pub fn new() -> Self {
        Self {
            input: String::new(),
        }
    }

    pub fn get_input(&self) -> &str {
        &self.input
    }

    fn refresh(&self, shared: &mut SharedEditorState) {
        match shared.filter.set_pattern(&self.input) {
            Ok(()) => {
                shared.status_message.clear();
                shared.clamp_cursor();
            }
            // Keep the last good pattern while the user is mid-typing
            Err(e) => shared.status_message = e.to_string(),
        }
    }
}

impl ModeController for FilterController {
    fn handle_key(&mut self, key_event: KeyEvent, shared: &mut SharedEditorState) -> ModeTransition {
        match key_event.code {
            KeyCode::Char(c) => {
                self.input.push(c);
                self.refresh(shared);
                ModeTransition::Stay
            }
            KeyCode::Backspace => {
                self.input.pop();
                self.refresh(shared);
                ModeTransition::Stay
            }
            KeyCode::Enter => {
                self.input.clear();
                if shared.filter.is_active() {
                    shared.status_message = format!("Filter: /{}", shared.filter.pattern());
                }
                ModeTransition::ToMode(Mode::Browse)
            }
            KeyCode::Esc => {
                self.input.clear();
                shared.filter.clear();
                shared.status_message = "Filter cleared".to_string();
                shared.clamp_cursor();
                ModeTransition::ToMode(Mode::Browse)
            }
            _ => ModeTransition::Stay,
        }
    }
}
