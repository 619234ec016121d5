/// Domain model - Entries, their combo settings and the editing session
///
/// Nothing in here knows about the terminal; the controller drives a
/// `Session` and the view reads from it.
pub mod catalog;
pub mod pools;
pub mod record;
pub mod session;

use std::collections::HashMap;

/// Entry name to its settings. Entries that were disabled keep their record.
pub type ConfigMap = HashMap<String, record::ComboRecord>;

// Re-export public interface
pub use catalog::{Catalog, CatalogError};
pub use pools::Pool;
pub use record::{ComboRecord, Field, apply_edit};
pub use session::Session;
