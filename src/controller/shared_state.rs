use crate::controller::filter::EntryFilter;
use crate::model::{Pool, Session};
use crate::view::View;
use arboard::Clipboard;
use crossterm::event::KeyEvent;
use std::path::{Path, PathBuf};

/// Cursor row in each pool; the focused pool is the one keys act on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PoolCursor {
    pub focus: Pool,
    enabled: usize,
    disabled: usize,
}

impl PoolCursor {
    pub fn new() -> Self {
        Self {
            focus: Pool::Enabled,
            enabled: 0,
            disabled: 0,
        }
    }

    pub fn index(&self, pool: Pool) -> usize {
        match pool {
            Pool::Enabled => self.enabled,
            Pool::Disabled => self.disabled,
        }
    }

    pub fn set_index(&mut self, pool: Pool, index: usize) {
        match pool {
            Pool::Enabled => self.enabled = index,
            Pool::Disabled => self.disabled = index,
        }
    }
}

/// Shared state that all mode controllers need access to
pub struct SharedEditorState {
    pub session: Session,
    pub view: View,
    pub cursor: PoolCursor,
    pub filter: EntryFilter,
    pub status_message: String,
    pub output_path: PathBuf,
    pub wrap_cursor: bool,
    pub show_help: bool,
}

/// Result of handling a key event in a mode controller
#[derive(Debug, PartialEq)]
pub enum ModeTransition {
    Stay,
    ToMode(crate::controller::command_types::Mode),
    Quit,
}

/// Trait that all mode controllers must implement
pub trait ModeController {
    fn handle_key(&mut self, key_event: KeyEvent, shared: &mut SharedEditorState) -> ModeTransition;
}

pub fn visible_entries(session: &Session, filter: &EntryFilter, pool: Pool) -> Vec<String> {
    session
        .pools()
        .list(pool, session.catalog())
        .into_iter()
        .filter(|name| filter.matches(name))
        .map(str::to_string)
        .collect()
}

impl SharedEditorState {
    pub fn new(session: Session, output_path: PathBuf) -> Self {
        Self {
            session,
            view: View::new(),
            cursor: PoolCursor::new(),
            filter: EntryFilter::new(),
            status_message: String::new(),
            output_path,
            wrap_cursor: true,
            show_help: false,
        }
    }

    /// Entries of `pool` that pass the current filter
    pub fn visible_entries(&self, pool: Pool) -> Vec<String> {
        visible_entries(&self.session, &self.filter, pool)
    }

    /// Entry under the cursor in the focused pool
    pub fn current_entry(&self) -> Option<String> {
        let focus = self.cursor.focus;
        self.visible_entries(focus)
            .into_iter()
            .nth(self.cursor.index(focus))
    }

    pub fn focus(&mut self, pool: Pool) {
        self.cursor.focus = pool;
        self.clamp_cursor();
    }

    pub fn move_cursor(&mut self, delta: isize) {
        let focus = self.cursor.focus;
        let len = self.visible_entries(focus).len() as isize;
        if len == 0 {
            return;
        }
        let target = self.cursor.index(focus) as isize + delta;
        let target = if self.wrap_cursor {
            target.rem_euclid(len)
        } else {
            target.clamp(0, len - 1)
        };
        self.cursor.set_index(focus, target as usize);
    }

    pub fn move_cursor_top(&mut self) {
        self.cursor.set_index(self.cursor.focus, 0);
    }

    pub fn move_cursor_bottom(&mut self) {
        let focus = self.cursor.focus;
        let len = self.visible_entries(focus).len();
        self.cursor.set_index(focus, len.saturating_sub(1));
    }

    /// Keep both cursors inside their (possibly shrunk) lists
    pub fn clamp_cursor(&mut self) {
        for pool in [Pool::Enabled, Pool::Disabled] {
            let len = self.visible_entries(pool).len();
            let index = self.cursor.index(pool).min(len.saturating_sub(1));
            self.cursor.set_index(pool, index);
        }
    }

    /// Put the cursor on `name` in the focused pool if it is visible there
    pub fn place_cursor_on(&mut self, name: &str) {
        let focus = self.cursor.focus;
        if let Some(pos) = self.visible_entries(focus).iter().position(|e| e == name) {
            self.cursor.set_index(focus, pos);
        }
    }

    /// Write the export file, to `path` or the configured output
    pub fn export_to(&mut self, path: Option<&str>) {
        let path = path
            .map(PathBuf::from)
            .unwrap_or_else(|| self.output_path.clone());
        match self.session.export_file(&path) {
            Ok(bytes) => {
                self.status_message = format!(
                    "\"{}\" {} entries, {bytes}B written",
                    path.display(),
                    self.session.pools().enabled().len()
                );
            }
            Err(e) => {
                tracing::error!("export to {} failed: {e}", path.display());
                self.status_message = format!("Error: Could not write {}: {e}", path.display());
            }
        }
    }

    /// Replace the session from a file; on failure the session is untouched
    pub fn import_from(&mut self, path: &Path) {
        match self.session.import_file(path) {
            Ok(count) => {
                self.cursor = PoolCursor::new();
                self.clamp_cursor();
                self.status_message = format!("\"{}\" {count} entries imported", path.display());
            }
            Err(e) => {
                tracing::error!("{e}");
                self.status_message = format!("Error: {e}");
            }
        }
    }

    pub fn yank_export(&mut self) {
        let text = self.session.export_text();
        match Clipboard::new().and_then(|mut c| c.set_text(text.clone())) {
            Ok(()) => self.status_message = format!("{} bytes copied to clipboard", text.len()),
            Err(e) => self.status_message = format!("Error: Could not access clipboard: {e}"),
        }
    }
}
