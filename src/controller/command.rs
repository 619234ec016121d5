use crate::config::RcLoader;
use crate::config::rc::RC_FILE_NAME;
use crate::controller::shared_state::{ModeController, ModeTransition, SharedEditorState};
use crate::controller::command_types::Mode;
use crate::model::Field;
use crossterm::event::{KeyCode, KeyEvent};
use std::fs;
use std::path::Path;

pub struct CommandController {
    pub command_buffer: String,
}

impl CommandController {
    pub fn new() -> Self {
        Self {
            command_buffer: String::new(),
        }
    }

    pub fn get_command_buffer(&self) -> &str {
        &self.command_buffer
    }
}

impl ModeController for CommandController {
    fn handle_key(&mut self, key_event: KeyEvent, shared: &mut SharedEditorState) -> ModeTransition {
        match key_event.code {
            KeyCode::Char(c) => {
                self.command_buffer.push(c);
                ModeTransition::Stay
            }
            KeyCode::Backspace => {
                self.command_buffer.pop();
                ModeTransition::Stay
            }
            KeyCode::Enter => {
                let command_str = self.command_buffer.clone();
                let quit = self.execute_command(&command_str, shared);
                self.command_buffer.clear();

                if quit {
                    ModeTransition::Quit
                } else {
                    ModeTransition::ToMode(Mode::Browse)
                }
            }
            KeyCode::Esc => {
                self.command_buffer.clear();
                ModeTransition::ToMode(Mode::Browse)
            }
            _ => ModeTransition::Stay,
        }
    }
}

impl CommandController {
    /// Run one `:` command. Returns true when the editor should quit.
    pub fn execute_command(&mut self, command_str: &str, shared: &mut SharedEditorState) -> bool {
        let trimmed = command_str.trim();
        if trimmed.is_empty() {
            return false;
        }

        let (name, arg) = match trimmed.split_once(char::is_whitespace) {
            Some((name, rest)) => (name, rest.trim()),
            None => (trimmed, ""),
        };

        if let Some(result) = self.execute_file_command(name, arg, shared) {
            return result;
        }

        if let Some(result) = self.execute_entry_command(name, arg, shared) {
            return result;
        }

        if let Some(result) = self.execute_form_command(name, arg, shared) {
            return result;
        }

        shared.status_message = format!("Not an editor command: {trimmed}");
        false
    }

    fn execute_file_command(
        &mut self,
        name: &str,
        arg: &str,
        shared: &mut SharedEditorState,
    ) -> Option<bool> {
        match name {
            "q" | "quit" => Some(true),
            "w" | "write" | "export" => {
                shared.export_to(non_empty(arg));
                Some(false)
            }
            "wq" | "x" => {
                shared.export_to(non_empty(arg));
                // Stay open if the write failed so the work is not lost
                Some(!shared.status_message.starts_with("Error"))
            }
            "e" | "edit" | "import" => {
                if arg.is_empty() {
                    shared.status_message = "Error: No file name".to_string();
                } else {
                    shared.import_from(Path::new(arg));
                }
                Some(false)
            }
            "yank" | "y" => {
                shared.yank_export();
                Some(false)
            }
            "mkrc" => {
                let path = non_empty(arg).unwrap_or(RC_FILE_NAME);
                if Path::new(path).exists() {
                    shared.status_message = format!("Error: \"{path}\" exists");
                } else {
                    match fs::write(path, RcLoader::generate_sample_rc()) {
                        Ok(()) => shared.status_message = format!("\"{path}\" written"),
                        Err(e) => shared.status_message = format!("Error: Could not write {path}: {e}"),
                    }
                }
                Some(false)
            }
            _ => None,
        }
    }

    fn execute_entry_command(
        &mut self,
        name: &str,
        arg: &str,
        shared: &mut SharedEditorState,
    ) -> Option<bool> {
        match name {
            "enable" | "disable" | "select" => {
                if arg.is_empty() {
                    shared.status_message = format!("Error: :{name} needs an entry name");
                    return Some(false);
                }
                let result = match (name, arg) {
                    ("enable", "*") => {
                        shared.session.enable_all();
                        Ok(())
                    }
                    ("disable", "*") => {
                        shared.session.disable_all();
                        Ok(())
                    }
                    ("enable", entry) => shared.session.enable(entry).map(|_| ()),
                    ("disable", entry) => shared.session.disable(entry).map(|_| ()),
                    (_, entry) => shared.session.select(entry),
                };
                match result {
                    Ok(()) => {
                        shared.clamp_cursor();
                        shared.status_message = format!("{name} {arg}");
                    }
                    Err(e) => shared.status_message = format!("Error: {e}"),
                }
                Some(false)
            }
            "clear" => {
                shared.session.clear_selection();
                shared.status_message = "Selection cleared".to_string();
                Some(false)
            }
            _ => None,
        }
    }

    fn execute_form_command(
        &mut self,
        name: &str,
        arg: &str,
        shared: &mut SharedEditorState,
    ) -> Option<bool> {
        match name {
            "set" => {
                let Some((field_name, value)) = arg.split_once(char::is_whitespace) else {
                    shared.status_message = "Usage: :set <field> <value>".to_string();
                    return Some(false);
                };
                match Field::from_name(field_name) {
                    Some(field) => {
                        let value = value.trim();
                        if field.is_type() && !shared.session.catalog().has_type(value) {
                            shared.status_message = format!(
                                "Error: Unknown type: {value} (one of {})",
                                shared.session.catalog().types().join(", ")
                            );
                        } else {
                            shared.session.edit(field, value);
                            shared.status_message = format!("{field} = {value}");
                        }
                    }
                    None => shared.status_message = format!("Error: Unknown field: {field_name}"),
                }
                Some(false)
            }
            "setall" => {
                let count = shared.session.set_for_all();
                shared.status_message = format!("Form applied to {count} enabled entries");
                Some(false)
            }
            "help" | "h" => {
                shared.show_help = true;
                Some(false)
            }
            _ => None,
        }
    }
}

fn non_empty(arg: &str) -> Option<&str> {
    if arg.is_empty() { None } else { Some(arg) }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controller::shared_state::tests::create_test_shared_state;

    #[test]
    fn test_quit_commands() {
        let mut shared = create_test_shared_state();
        let mut controller = CommandController::new();
        assert!(controller.execute_command("q", &mut shared));
        assert!(!controller.execute_command("", &mut shared));
        assert!(!controller.execute_command("bogus", &mut shared));
        assert_eq!(shared.status_message, "Not an editor command: bogus");
    }

    #[test]
    fn test_entry_commands() {
        let mut shared = create_test_shared_state();
        let mut controller = CommandController::new();

        controller.execute_command("enable fox", &mut shared);
        assert_eq!(shared.session.pools().enabled(), ["fox"]);
        assert_eq!(shared.session.selected(), Some("fox"));

        controller.execute_command("enable *", &mut shared);
        assert_eq!(shared.session.pools().enabled().len(), 4);

        controller.execute_command("disable waluigi", &mut shared);
        assert_eq!(shared.status_message, "Error: Unknown entry: waluigi");

        controller.execute_command("disable *", &mut shared);
        assert!(shared.session.pools().enabled().is_empty());
    }

    #[test]
    fn test_set_commands() {
        let mut shared = create_test_shared_state();
        let mut controller = CommandController::new();
        controller.execute_command("select link", &mut shared);
        controller.execute_command("set cooldown 40", &mut shared);
        controller.execute_command("set vfx arcade", &mut shared);
        controller.execute_command("set sfx nonsense", &mut shared);

        let record = shared.session.record("link").unwrap();
        assert_eq!(record.cooldown_frame, 40);
        assert_eq!(record.vfx_type, "arcade");
        assert_eq!(record.sfx_type, "dream_team");
        assert_eq!(
            shared.status_message,
            "Error: Unknown type: nonsense (one of dream_team, retro, arcade)"
        );
    }

    #[test]
    fn test_setall_command() {
        let mut shared = create_test_shared_state();
        let mut controller = CommandController::new();
        controller.execute_command("enable mario", &mut shared);
        controller.execute_command("enable ness", &mut shared);
        controller.execute_command("set combo 12", &mut shared);
        controller.execute_command("setall", &mut shared);
        assert_eq!(shared.session.record("mario").unwrap().combo_frame, 12);
        assert_eq!(shared.status_message, "Form applied to 2 enabled entries");
    }

    #[test]
    fn test_write_and_import() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("fx.toml");
        let path = path.to_str().unwrap();

        let mut shared = create_test_shared_state();
        let mut controller = CommandController::new();
        controller.execute_command("enable mario", &mut shared);
        assert!(controller.execute_command(&format!("wq {path}"), &mut shared));

        let mut other = create_test_shared_state();
        controller.execute_command(&format!("e {path}"), &mut other);
        assert_eq!(other.session.pools().enabled(), ["mario"]);

        controller.execute_command("e", &mut other);
        assert_eq!(other.status_message, "Error: No file name");
    }

    #[test]
    fn test_mkrc_refuses_to_overwrite() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rc");
        let path = path.to_str().unwrap();

        let mut shared = create_test_shared_state();
        let mut controller = CommandController::new();
        controller.execute_command(&format!("mkrc {path}"), &mut shared);
        assert!(Path::new(path).exists());
        controller.execute_command(&format!("mkrc {path}"), &mut shared);
        assert!(shared.status_message.ends_with("exists"));
    }
}
