/// combo_fx.toml reading and writing
///
/// `serialize` renders the enabled entries, `deserialize` reads a file back
/// through an explicit schema, filling defaults field by field.
pub mod deserialize;
pub mod error;
pub mod serialize;

// Re-export public interface
pub use deserialize::{ImportedConfig, deserialize, deserialize_file};
pub use error::ImportError;
pub use serialize::serialize;
