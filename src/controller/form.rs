use crate::controller::shared_state::{ModeController, ModeTransition, SharedEditorState};
use crate::controller::command_types::{FormAction, Mode};
use crate::controller::key_handler::KeyHandler;
use crate::model::record::coerce_frames;
use crate::model::Field;
use crossterm::event::KeyEvent;

/// Edits the form field by field. Every keystroke is written straight
/// through to the session so the selected entry always matches the form.
pub struct FormController {
    pub field_index: usize,
    pub input: String,
}

impl FormController {
    pub fn new() -> Self {
        Self {
            field_index: 0,
            input: String::new(),
        }
    }

    pub fn current_field(&self) -> Field {
        Field::ALL[self.field_index]
    }

    /// Reload the input text from the form, e.g. after switching fields
    pub fn sync_input(&mut self, shared: &SharedEditorState) {
        self.input = shared.session.form().field_value(self.current_field());
    }

    fn step_field(&mut self, delta: isize, shared: &SharedEditorState) {
        let len = Field::ALL.len() as isize;
        self.field_index = (self.field_index as isize + delta).rem_euclid(len) as usize;
        self.sync_input(shared);
    }

    fn nudge(&mut self, step: isize, shared: &mut SharedEditorState) {
        let field = self.current_field();
        if field.is_type() {
            shared.session.cycle_type(field, step);
        } else {
            let value = coerce_frames(&self.input).saturating_add(step as i64);
            shared.session.edit(field, &value.to_string());
        }
        self.sync_input(shared);
    }
}

impl ModeController for FormController {
    fn handle_key(&mut self, key_event: KeyEvent, shared: &mut SharedEditorState) -> ModeTransition {
        let Some(action) = KeyHandler::parse_form_key(&key_event) else {
            return ModeTransition::Stay;
        };

        let field = self.current_field();
        match action {
            FormAction::NextField | FormAction::Commit => self.step_field(1, shared),
            FormAction::PrevField => self.step_field(-1, shared),
            FormAction::Increase => self.nudge(1, shared),
            FormAction::Decrease => self.nudge(-1, shared),
            FormAction::Input(c) => {
                if field.is_type() {
                    shared.status_message = "Use ←/→ to choose a type".to_string();
                } else if c.is_ascii_digit() || c == '-' {
                    self.input.push(c);
                    shared.session.edit(field, &self.input);
                }
            }
            FormAction::Backspace => {
                if field.is_numeric() {
                    self.input.pop();
                    shared.session.edit(field, &self.input);
                }
            }
            FormAction::ClearSelection => {
                shared.session.clear_selection();
                shared.status_message = "Selection cleared".to_string();
            }
            FormAction::SetForAll => {
                let count = shared.session.set_for_all();
                shared.status_message = format!("Form applied to {count} enabled entries");
            }
            FormAction::Leave => {
                return ModeTransition::ToMode(Mode::Browse);
            }
        }

        ModeTransition::Stay
    }
}
