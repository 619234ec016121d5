use super::catalog::Catalog;
use super::pools::Pools;
use super::record::{ComboRecord, Field, apply_edit};
use super::ConfigMap;
use crate::codec::{self, ImportError, ImportedConfig};
use std::fs;
use std::io;
use std::path::Path;
use thiserror::Error;
use tracing::{debug, info, warn};

#[derive(Debug, Error, PartialEq)]
pub enum SessionError {
    #[error("Unknown entry: {0}")]
    UnknownEntry(String),
}

/// Everything the editor is working on: which entries are enabled, the
/// settings of every entry touched so far, and the form bound to the selected
/// entry (if any).
pub struct Session {
    catalog: Catalog,
    pools: Pools,
    configs: ConfigMap,
    selected: Option<String>,
    form: ComboRecord,
}

impl Session {
    pub fn new(catalog: Catalog) -> Self {
        Self {
            catalog,
            pools: Pools::new(),
            configs: ConfigMap::new(),
            selected: None,
            form: ComboRecord::default(),
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn pools(&self) -> &Pools {
        &self.pools
    }

    pub fn record(&self, name: &str) -> Option<&ComboRecord> {
        self.configs.get(name)
    }

    pub fn selected(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    pub fn form(&self) -> &ComboRecord {
        &self.form
    }

    /// Bind the form to `name`, creating its default record on first use.
    /// Re-selecting the current entry keeps the form as it is.
    pub fn select(&mut self, name: &str) -> Result<(), SessionError> {
        self.check_known(name)?;

        let record = self.configs.entry(name.to_string()).or_default().clone();
        if self.selected.as_deref() != Some(name) {
            debug!("selected {name}");
            self.selected = Some(name.to_string());
            self.form = record;
        }
        Ok(())
    }

    pub fn clear_selection(&mut self) {
        self.selected = None;
    }

    /// Edit one form field; the change is written to the selected entry only
    pub fn edit(&mut self, field: Field, value: &str) {
        self.form = apply_edit(&self.form, field, value);
        self.write_back();
    }

    /// Step a type field through the catalog's type list
    pub fn cycle_type(&mut self, field: Field, step: isize) {
        let current = match field {
            Field::VfxType => &self.form.vfx_type,
            Field::SfxType => &self.form.sfx_type,
            _ => return,
        };
        let next = self.catalog.cycle_type(current, step).to_string();
        self.edit(field, &next);
    }

    /// Copy the form onto every enabled entry. Returns how many were set.
    pub fn set_for_all(&mut self) -> usize {
        for name in self.pools.enabled() {
            self.configs.insert(name.clone(), self.form.clone());
        }
        info!("applied form to {} enabled entries", self.pools.enabled().len());
        self.pools.enabled().len()
    }

    /// Move an entry to the enabled pool and select it
    pub fn enable(&mut self, name: &str) -> Result<bool, SessionError> {
        self.check_known(name)?;
        let moved = self.pools.enable(name);
        self.select(name)?;
        Ok(moved)
    }

    /// Move an entry to the disabled pool and select it. Its record is kept.
    pub fn disable(&mut self, name: &str) -> Result<bool, SessionError> {
        self.check_known(name)?;
        let moved = self.pools.disable(name);
        self.select(name)?;
        Ok(moved)
    }

    pub fn toggle(&mut self, name: &str) -> Result<bool, SessionError> {
        if self.pools.is_enabled(name) {
            self.disable(name)
        } else {
            self.enable(name)
        }
    }

    pub fn enable_all(&mut self) {
        self.pools.enable_all(&self.catalog);
        self.selected = None;
    }

    pub fn disable_all(&mut self) {
        self.pools.disable_all();
        self.selected = None;
    }

    pub fn shift(&mut self, name: &str, delta: isize) -> bool {
        self.pools.shift(name, delta)
    }

    pub fn export_text(&self) -> String {
        codec::serialize(&self.configs, self.pools.enabled())
    }

    /// Write the export to `path`, returning the number of bytes written
    pub fn export_file(&self, path: &Path) -> io::Result<usize> {
        let text = self.export_text();
        fs::write(path, &text)?;
        info!(
            "exported {} entries to {}",
            self.pools.enabled().len(),
            path.display()
        );
        Ok(text.len())
    }

    /// Parse `text` and replace the session's state with it.
    /// On error nothing changes.
    pub fn import_text(&mut self, text: &str) -> Result<usize, ImportError> {
        let imported = codec::deserialize(text)?;
        Ok(self.apply_import(imported))
    }

    pub fn import_file(&mut self, path: &Path) -> Result<usize, ImportError> {
        let imported = codec::deserialize_file(path)?;
        let count = self.apply_import(imported);
        info!("imported {count} entries from {}", path.display());
        Ok(count)
    }

    /// Replace the map and the enabled set wholesale and clear the selection
    pub fn apply_import(&mut self, imported: ImportedConfig) -> usize {
        for name in &imported.order {
            if self.catalog.add_entry(name) {
                warn!("{name} is not in the catalog, adding it");
            }
        }
        let count = imported.order.len();
        self.configs = imported.records;
        self.pools.replace(imported.order);
        self.selected = None;
        count
    }

    fn write_back(&mut self) {
        if let Some(name) = &self.selected {
            self.configs.insert(name.clone(), self.form.clone());
        }
    }

    fn check_known(&self, name: &str) -> Result<(), SessionError> {
        if self.catalog.contains(name) {
            Ok(())
        } else {
            Err(SessionError::UnknownEntry(name.to_string()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session() -> Session {
        let catalog = Catalog::new(
            vec!["mario".into(), "link".into(), "fox".into()],
            vec!["dream_team".into(), "retro".into()],
        )
        .unwrap();
        Session::new(catalog)
    }

    #[test]
    fn test_select_creates_default_record() {
        let mut session = session();
        assert!(session.record("mario").is_none());
        session.select("mario").unwrap();
        assert_eq!(session.selected(), Some("mario"));
        assert_eq!(session.record("mario"), Some(&ComboRecord::default()));
        assert_eq!(session.form(), &ComboRecord::default());
    }

    #[test]
    fn test_select_unknown_entry() {
        let mut session = session();
        assert_eq!(
            session.select("waluigi"),
            Err(SessionError::UnknownEntry("waluigi".to_string()))
        );
        assert_eq!(session.selected(), None);
    }

    #[test]
    fn test_edit_writes_to_selected_only() {
        let mut session = session();
        session.select("mario").unwrap();
        session.select("link").unwrap();
        session.edit(Field::ComboFrame, "50");
        assert_eq!(session.record("link").unwrap().combo_frame, 50);
        assert_eq!(session.record("mario").unwrap().combo_frame, 75);

        // Switching loads the other entry's record into the form
        session.select("mario").unwrap();
        assert_eq!(session.form().combo_frame, 75);
    }

    #[test]
    fn test_edit_without_selection_is_detached() {
        let mut session = session();
        session.select("mario").unwrap();
        session.clear_selection();
        session.edit(Field::VfxType, "retro");
        assert_eq!(session.form().vfx_type, "retro");
        assert_eq!(session.record("mario").unwrap().vfx_type, "dream_team");
    }

    #[test]
    fn test_reselect_keeps_form() {
        let mut session = session();
        session.select("fox").unwrap();
        session.edit(Field::Hit(0), "1");
        session.select("fox").unwrap();
        assert_eq!(session.form().combo_hits, "1,3,4,5");
    }

    #[test]
    fn test_cycle_type() {
        let mut session = session();
        session.select("fox").unwrap();
        session.cycle_type(Field::SfxType, 1);
        assert_eq!(session.record("fox").unwrap().sfx_type, "retro");
        session.cycle_type(Field::ComboFrame, 1);
        assert_eq!(session.form().combo_frame, 75);
    }

    #[test]
    fn test_set_for_all_touches_enabled_only() {
        let mut session = session();
        session.enable("mario").unwrap();
        session.enable("link").unwrap();
        session.clear_selection();
        session.edit(Field::CooldownFrame, "99");
        assert_eq!(session.set_for_all(), 2);
        assert_eq!(session.record("mario").unwrap().cooldown_frame, 99);
        assert_eq!(session.record("link").unwrap().cooldown_frame, 99);
        assert!(session.record("fox").is_none());
    }

    #[test]
    fn test_disable_keeps_record_out_of_export() {
        let mut session = session();
        session.enable("fox").unwrap();
        session.edit(Field::ComboFrame, "33");
        assert!(session.export_text().contains("[[fox]]"));

        session.disable("fox").unwrap();
        assert!(!session.export_text().contains("[[fox]]"));
        assert_eq!(session.record("fox").unwrap().combo_frame, 33);

        session.enable("fox").unwrap();
        assert!(session.export_text().contains("combo_frame = 33"));
    }

    #[test]
    fn test_toggle_and_bulk_moves_clear_selection() {
        let mut session = session();
        assert_eq!(session.toggle("link"), Ok(true));
        assert!(session.pools().is_enabled("link"));
        assert_eq!(session.selected(), Some("link"));

        session.enable_all();
        assert_eq!(session.selected(), None);
        assert_eq!(session.pools().enabled().len(), 3);

        session.disable_all();
        assert!(session.pools().enabled().is_empty());
    }

    #[test]
    fn test_export_defaults_missing_records() {
        let mut session = session();
        session.enable_all();
        let text = session.export_text();
        assert_eq!(text.matches("combo_frame = 75").count(), 3);
    }

    #[test]
    fn test_import_replaces_state() {
        let mut session = session();
        session.enable("mario").unwrap();
        session.edit(Field::ComboFrame, "1");

        let count = session
            .import_text("[[link]]\ncombo_frame = 20\n[fox]\ncombo_hits = [7]\n")
            .unwrap();
        assert_eq!(count, 2);
        assert_eq!(session.pools().enabled(), ["link", "fox"]);
        assert!(session.record("mario").is_none());
        assert_eq!(session.record("fox").unwrap().combo_hits, "7");
        assert_eq!(session.selected(), None);
    }

    #[test]
    fn test_failed_import_leaves_state() {
        let mut session = session();
        session.enable("mario").unwrap();
        session.edit(Field::ComboFrame, "1");

        let err = session.import_text("[[link]\n").unwrap_err();
        assert!(err.to_string().contains("Failed to parse TOML"));
        assert_eq!(session.pools().enabled(), ["mario"]);
        assert_eq!(session.record("mario").unwrap().combo_frame, 1);
        assert_eq!(session.selected(), Some("mario"));
    }

    #[test]
    fn test_invalid_entry_import_leaves_state() {
        let mut session = session();
        session.enable("mario").unwrap();
        session.edit(Field::ComboFrame, "1");

        // A valid entry ahead of the bad one must not be applied either
        let err = session
            .import_text("[[custom]]\ncombo_frame = 3\n[mario]\ncombo_frame = \"fast\"\n")
            .unwrap_err();
        assert!(matches!(err, ImportError::InvalidEntry { ref key, .. } if key == "mario"));
        assert_eq!(session.pools().enabled(), ["mario"]);
        assert_eq!(session.record("mario").unwrap().combo_frame, 1);
        assert!(session.record("custom").is_none());
        assert!(!session.catalog().contains("custom"));
        assert_eq!(session.selected(), Some("mario"));
    }

    #[test]
    fn test_import_adds_unknown_entries_to_catalog() {
        let mut session = session();
        session.import_text("[[custom]]\n").unwrap();
        assert!(session.catalog().contains("custom"));
        assert!(session.pools().is_enabled("custom"));
        assert!(session.pools().disabled(session.catalog()).iter().all(|e| *e != "custom"));
    }

    #[test]
    fn test_export_import_round_trip() {
        let mut session = session();
        session.enable("link").unwrap();
        session.edit(Field::Hit(0), "8");
        session.edit(Field::VfxType, "retro");
        session.enable("mario").unwrap();
        session.edit(Field::ComboFrame, "-3");

        let text = session.export_text();
        let mut restored = self::session();
        restored.import_text(&text).unwrap();

        assert_eq!(restored.pools().enabled(), session.pools().enabled());
        assert_eq!(restored.record("link").unwrap().combo_hits, "3,4,5,8");
        assert_eq!(restored.record("link").unwrap().vfx_type, "retro");
        assert_eq!(restored.record("mario").unwrap().combo_frame, 0);
    }

    #[test]
    fn test_export_and_import_files() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("combo_fx.toml");

        let mut session = session();
        session.enable("fox").unwrap();
        let bytes = session.export_file(&path).unwrap();
        assert_eq!(bytes, fs::read_to_string(&path).unwrap().len());

        let mut other = self::session();
        assert_eq!(other.import_file(&path).unwrap(), 1);
        assert_eq!(other.pools().enabled(), ["fox"]);
    }
}
