use crate::controller::shared_state::{ModeController, ModeTransition, SharedEditorState};
use crate::controller::command_types::Mode;
use crate::controller::browse::BrowseController;
use crate::controller::form::FormController;
use crate::controller::command::CommandController;
use crate::controller::filter::FilterController;
use crate::controller::help::help_lines;
use crate::config::{RcConfig, RcLoader};
use crate::model::Session;
use crate::view::{RenderParams, SessionViewModel};
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use std::io::stdout;
use std::path::Path;

pub struct EditorController {
    shared_state: SharedEditorState,
    current_mode: Mode,

    // Mode-specific controllers
    browse_controller: BrowseController,
    form_controller: FormController,
    command_controller: CommandController,
    filter_controller: FilterController,

    help: Vec<String>,
}

impl EditorController {
    pub fn new(session: Session, config: &RcConfig) -> Self {
        let mut shared_state = SharedEditorState::new(session, config.output_path.clone());
        RcLoader::apply_config_to_shared_state(&mut shared_state, config);
        shared_state.status_message = "Press ? for help".to_string();

        Self {
            shared_state,
            current_mode: Mode::Browse,
            browse_controller: BrowseController::new(),
            form_controller: FormController::new(),
            command_controller: CommandController::new(),
            filter_controller: FilterController::new(),
            help: help_lines(),
        }
    }

    /// Import `path` before the UI starts; failures end up in the status line
    pub fn open_file(&mut self, path: &Path) {
        self.shared_state.import_from(path);
    }

    pub fn shared_state(&self) -> &SharedEditorState {
        &self.shared_state
    }

    pub fn mode(&self) -> Mode {
        self.current_mode
    }

    pub fn run(mut self) -> anyhow::Result<()> {
        enable_raw_mode()?;
        execute!(stdout(), EnterAlternateScreen)?;

        let result = self.run_loop();

        disable_raw_mode()?;
        execute!(stdout(), LeaveAlternateScreen)?;

        result
    }

    fn run_loop(&mut self) -> anyhow::Result<()> {
        loop {
            let output_path = self.shared_state.output_path.display().to_string();
            let input = self.input_for_mode().to_string();
            let params = RenderParams {
                mode: &self.current_mode,
                command_buffer: &input,
                status_message: &self.shared_state.status_message,
                output_path: &output_path,
                focused_field: Some(self.form_controller.field_index),
                field_input: &self.form_controller.input,
                help: self.shared_state.show_help.then_some(self.help.as_slice()),
            };

            // Borrow fields separately so the view can be mutated while reading the session
            let view_model = SessionViewModel::new(
                &self.shared_state.session,
                &self.shared_state.cursor,
                &self.shared_state.filter,
            );
            self.shared_state.view.render(&view_model, &params)?;

            if let Event::Key(key_event) = event::read()? {
                // Ignore key release events reported by some terminals
                if key_event.kind != KeyEventKind::Press {
                    continue;
                }
                if self.handle_key(key_event) {
                    break;
                }
            }
        }

        tracing::info!("editor closed");
        Ok(())
    }

    /// Route one key to the current mode. Returns true to quit.
    pub fn handle_key(&mut self, key_event: KeyEvent) -> bool {
        if key_event.code == KeyCode::Char('l') && key_event.modifiers.contains(KeyModifiers::CONTROL) {
            self.shared_state.view.force_redraw();
            return false;
        }

        let transition = match self.current_mode {
            Mode::Browse => self.browse_controller.handle_key(key_event, &mut self.shared_state),
            Mode::Form => self.form_controller.handle_key(key_event, &mut self.shared_state),
            Mode::Command => self.command_controller.handle_key(key_event, &mut self.shared_state),
            Mode::Filter => self.filter_controller.handle_key(key_event, &mut self.shared_state),
        };

        match transition {
            ModeTransition::Stay => false,
            ModeTransition::ToMode(new_mode) => {
                self.transition_to_mode(new_mode);
                false
            }
            ModeTransition::Quit => true,
        }
    }

    fn transition_to_mode(&mut self, new_mode: Mode) {
        match new_mode {
            Mode::Form => {
                self.form_controller.sync_input(&self.shared_state);
            }
            Mode::Command => {
                self.command_controller.command_buffer.clear();
            }
            Mode::Filter => {
                self.filter_controller.input = self.shared_state.filter.pattern().to_string();
            }
            Mode::Browse => {}
        }

        self.current_mode = new_mode;
    }

    fn input_for_mode(&self) -> &str {
        match self.current_mode {
            Mode::Command => self.command_controller.get_command_buffer(),
            Mode::Filter => self.filter_controller.get_input(),
            _ => "",
        }
    }
}
