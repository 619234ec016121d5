/// Controller subsystem - Handles all user input and command execution
///
/// This module contains all the mode-specific controllers and command processors,
/// providing a clean separation between user interaction logic and data/view layers.

pub mod editor;
pub mod browse;
pub mod form;
pub mod command;
pub mod filter;
pub mod shared_state;
pub mod help;
pub mod command_types;
pub mod key_handler;

// Re-export public interface
pub use editor::EditorController;
pub use shared_state::SharedEditorState;
pub use command_types::Mode;
