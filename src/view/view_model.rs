//! View Model - Abstracts editor state for the view layer
//! This ensures the view has no direct dependencies on the session internals

use crate::controller::filter::EntryFilter;
use crate::controller::shared_state::{PoolCursor, visible_entries};
use crate::model::{Field, Pool, Session};

#[derive(Debug, Clone, PartialEq)]
pub struct FormRow {
    pub label: String,
    pub value: String,
}

/// The ViewModel trait provides everything the view needs to render
pub trait ViewModel {
    /// Visible entries of a pool, after filtering
    fn pool_entries(&self, pool: Pool) -> Vec<String>;

    /// Focused pool and cursor row within it
    fn cursor(&self) -> (Pool, usize);

    fn selected(&self) -> Option<String>;

    /// One row per form field, in form order
    fn form_rows(&self) -> Vec<FormRow>;

    /// The export text as it would be written now
    fn preview_lines(&self) -> Vec<String>;

    fn filter_pattern(&self) -> Option<String>;
}

/// Concrete implementation that adapts the session to ViewModel.
/// Borrows only what it reads so the view itself stays free to mutate.
pub struct SessionViewModel<'a> {
    session: &'a Session,
    cursor: &'a PoolCursor,
    filter: &'a EntryFilter,
}

impl<'a> SessionViewModel<'a> {
    pub fn new(session: &'a Session, cursor: &'a PoolCursor, filter: &'a EntryFilter) -> Self {
        Self {
            session,
            cursor,
            filter,
        }
    }
}

impl<'a> ViewModel for SessionViewModel<'a> {
    fn pool_entries(&self, pool: Pool) -> Vec<String> {
        visible_entries(self.session, self.filter, pool)
    }

    fn cursor(&self) -> (Pool, usize) {
        (self.cursor.focus, self.cursor.index(self.cursor.focus))
    }

    fn selected(&self) -> Option<String> {
        self.session.selected().map(str::to_string)
    }

    fn form_rows(&self) -> Vec<FormRow> {
        let form = self.session.form();
        Field::ALL
            .iter()
            .map(|field| FormRow {
                label: match field {
                    Field::Hit(_) => format!("Hits {}", field.label()),
                    _ => field.label().to_string(),
                },
                value: form.field_value(*field),
            })
            .collect()
    }

    fn preview_lines(&self) -> Vec<String> {
        self.session
            .export_text()
            .lines()
            .map(str::to_string)
            .collect()
    }

    fn filter_pattern(&self) -> Option<String> {
        self.filter
            .is_active()
            .then(|| self.filter.pattern().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controller::shared_state::tests::create_test_shared_state;
    use crate::controller::SharedEditorState;

    fn view_model(shared: &SharedEditorState) -> SessionViewModel<'_> {
        SessionViewModel::new(&shared.session, &shared.cursor, &shared.filter)
    }

    #[test]
    fn test_form_rows_follow_form() {
        let mut shared = create_test_shared_state();
        shared.session.select("link").unwrap();
        shared.session.edit(Field::Hit(2), "8");

        let view_model = view_model(&shared);
        let rows = view_model.form_rows();
        assert_eq!(rows.len(), Field::ALL.len());
        assert_eq!(rows[0].label, "VFX type");
        assert_eq!(rows[0].value, "dream_team");
        assert_eq!(rows[6].label, "Hits GREAT");
        assert_eq!(rows[6].value, "8");
        assert_eq!(view_model.selected().as_deref(), Some("link"));
    }

    #[test]
    fn test_preview_matches_export() {
        let mut shared = create_test_shared_state();
        shared.session.enable("fox").unwrap();
        let view_model = view_model(&shared);
        let preview = view_model.preview_lines();
        assert_eq!(preview[0], "[[fox]]");
        assert_eq!(preview.len(), 6);
        assert_eq!(view_model.filter_pattern(), None);
    }
}
