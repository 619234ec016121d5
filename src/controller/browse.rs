use crate::controller::shared_state::{ModeController, ModeTransition, SharedEditorState};
use crate::controller::command_types::{Action, Mode};
use crate::controller::key_handler::KeyHandler;
use crate::model::Pool;
use crossterm::event::KeyEvent;

pub struct BrowseController {
    pub pending_key: Option<char>,
}

impl BrowseController {
    pub fn new() -> Self {
        Self { pending_key: None }
    }
}

impl ModeController for BrowseController {
    fn handle_key(&mut self, key_event: KeyEvent, shared: &mut SharedEditorState) -> ModeTransition {
        // Any key dismisses the help screen
        if shared.show_help {
            shared.show_help = false;
            return ModeTransition::Stay;
        }

        let Some(action) = KeyHandler::parse_browse_key_with_state(&key_event, &mut self.pending_key)
        else {
            return ModeTransition::Stay;
        };

        match action {
            Action::EditForm => return ModeTransition::ToMode(Mode::Form),
            Action::EnterCommandMode => return ModeTransition::ToMode(Mode::Command),
            Action::EnterFilterMode => return ModeTransition::ToMode(Mode::Filter),
            _ => {}
        }

        self.execute_action(action, shared)
    }
}

impl BrowseController {
    fn execute_action(&mut self, action: Action, shared: &mut SharedEditorState) -> ModeTransition {
        match action {
            Action::MoveUp => shared.move_cursor(-1),
            Action::MoveDown => shared.move_cursor(1),
            Action::MoveTop => shared.move_cursor_top(),
            Action::MoveBottom => shared.move_cursor_bottom(),
            Action::FocusEnabled => shared.focus(Pool::Enabled),
            Action::FocusDisabled => shared.focus(Pool::Disabled),
            Action::FocusOther => shared.focus(shared.cursor.focus.other()),

            Action::SelectEntry => {
                if let Some(name) = shared.current_entry() {
                    return match shared.session.select(&name) {
                        Ok(()) => {
                            shared.status_message = format!("Editing {name}");
                            ModeTransition::ToMode(Mode::Form)
                        }
                        Err(e) => {
                            shared.status_message = format!("Error: {e}");
                            ModeTransition::Stay
                        }
                    };
                }
            }
            Action::ToggleEntry => {
                if let Some(name) = shared.current_entry() {
                    match shared.session.toggle(&name) {
                        Ok(_) => {
                            let pool = if shared.session.pools().is_enabled(&name) {
                                Pool::Enabled
                            } else {
                                Pool::Disabled
                            };
                            shared.status_message = format!("{name} moved to {}", pool.title());
                            shared.clamp_cursor();
                        }
                        Err(e) => shared.status_message = format!("Error: {e}"),
                    }
                }
            }
            Action::EnableAll => {
                shared.session.enable_all();
                shared.clamp_cursor();
                shared.status_message = "All entries enabled".to_string();
            }
            Action::DisableAll => {
                shared.session.disable_all();
                shared.clamp_cursor();
                shared.status_message = "All entries disabled".to_string();
            }
            Action::ShiftUp | Action::ShiftDown => {
                let delta = if action == Action::ShiftUp { -1 } else { 1 };
                if shared.cursor.focus == Pool::Enabled {
                    if let Some(name) = shared.current_entry() {
                        if shared.session.shift(&name, delta) {
                            shared.place_cursor_on(&name);
                        }
                    }
                } else {
                    shared.status_message = "Only enabled entries can be reordered".to_string();
                }
            }
            Action::ClearSelection => {
                shared.session.clear_selection();
                shared.status_message = "Selection cleared".to_string();
            }
            Action::SetForAll => {
                let count = shared.session.set_for_all();
                shared.status_message = format!("Form applied to {count} enabled entries");
            }
            Action::Export => shared.export_to(None),
            Action::YankExport => shared.yank_export(),
            Action::ToggleHelp => shared.show_help = true,
            Action::EditForm | Action::EnterCommandMode | Action::EnterFilterMode => {}
        }
        ModeTransition::Stay
    }
}
