use super::error::ImportError;
use crate::model::record::{
    DEFAULT_COMBO_FRAME, DEFAULT_COMBO_HITS, DEFAULT_COOLDOWN_FRAME, DEFAULT_TYPE, join_hits,
};
use crate::model::{ComboRecord, ConfigMap};
use serde::Deserialize;
use std::fs;
use std::path::Path;
use tracing::{debug, warn};

/// One record as it appears in the file. Every field is optional and
/// filled with the default when missing.
#[derive(Debug, Default, Deserialize)]
struct RawRecord {
    vfx_type: Option<String>,
    sfx_type: Option<String>,
    combo_frame: Option<i64>,
    cooldown_frame: Option<i64>,
    combo_hits: Option<Vec<i64>>,
}

impl RawRecord {
    fn into_record(self) -> ComboRecord {
        ComboRecord {
            vfx_type: non_empty_or_default(self.vfx_type),
            sfx_type: non_empty_or_default(self.sfx_type),
            combo_frame: self.combo_frame.unwrap_or(DEFAULT_COMBO_FRAME),
            cooldown_frame: self.cooldown_frame.unwrap_or(DEFAULT_COOLDOWN_FRAME),
            combo_hits: self
                .combo_hits
                .map(|hits| join_hits(&hits))
                .unwrap_or_else(|| DEFAULT_COMBO_HITS.to_string()),
        }
    }
}

fn non_empty_or_default(value: Option<String>) -> String {
    match value {
        Some(v) if !v.is_empty() => v,
        _ => DEFAULT_TYPE.to_string(),
    }
}

/// Parsed import: records plus the order their keys appeared in
#[derive(Debug, Default, Clone, PartialEq)]
pub struct ImportedConfig {
    pub order: Vec<String>,
    pub records: ConfigMap,
}

/// Parse a combo_fx.toml document.
///
/// Each top-level key holds either a table or an array of tables; for an
/// array only the first table is used. Fails without partial results.
pub fn deserialize(text: &str) -> Result<ImportedConfig, ImportError> {
    let document: toml::Table = toml::from_str(text)?;
    let mut imported = ImportedConfig::default();

    for (key, value) in document {
        let raw = match value {
            table @ toml::Value::Table(_) => Some(read_record(&key, table)?),
            toml::Value::Array(items) => {
                if items.len() > 1 {
                    warn!(
                        "{key}: keeping the first of {} records, the rest are ignored",
                        items.len()
                    );
                }
                match items.into_iter().next() {
                    Some(first @ toml::Value::Table(_)) => Some(read_record(&key, first)?),
                    Some(_) => return Err(ImportError::NotATable { key }),
                    None => {
                        warn!("{key}: empty array, entry skipped");
                        None
                    }
                }
            }
            _ => return Err(ImportError::NotATable { key }),
        };

        if let Some(raw) = raw {
            debug!("imported {key}");
            imported.order.push(key.clone());
            imported.records.insert(key, raw.into_record());
        }
    }

    Ok(imported)
}

pub fn deserialize_file(path: &Path) -> Result<ImportedConfig, ImportError> {
    let text = fs::read_to_string(path).map_err(|source| ImportError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    deserialize(&text)
}

fn read_record(key: &str, value: toml::Value) -> Result<RawRecord, ImportError> {
    value
        .try_into::<RawRecord>()
        .map_err(|source| ImportError::InvalidEntry {
            key: key.to_string(),
            source,
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::serialize;
    use crate::model::{Field, apply_edit};
    use std::io::Write;

    #[test]
    fn test_scalar_and_array_tables_match() {
        let text = r#"
            [mario]
            vfx_type = "retro"
            combo_frame = 40
            combo_hits = [3, 6]

            [[link]]
            vfx_type = "retro"
            combo_frame = 40
            combo_hits = [3, 6]
        "#;
        let imported = deserialize(text).unwrap();
        assert_eq!(imported.records["mario"], imported.records["link"]);
        assert_eq!(imported.records["mario"].combo_hits, "3,6");
        assert_eq!(imported.records["mario"].sfx_type, "dream_team");
        assert_eq!(imported.records["mario"].cooldown_frame, 16);
    }

    #[test]
    fn test_missing_fields_default() {
        let imported = deserialize("[fox]\n").unwrap();
        assert_eq!(imported.records["fox"], ComboRecord::default());
    }

    #[test]
    fn test_empty_type_string_defaults() {
        let imported = deserialize("[fox]\nvfx_type = \"\"\nsfx_type = \"arcade\"\n").unwrap();
        assert_eq!(imported.records["fox"].vfx_type, "dream_team");
        assert_eq!(imported.records["fox"].sfx_type, "arcade");
    }

    #[test]
    fn test_key_order_preserved() {
        let text = "[[zelda]]\n[[ness]]\n[[mario]]\n";
        let imported = deserialize(text).unwrap();
        assert_eq!(imported.order, vec!["zelda", "ness", "mario"]);
    }

    #[test]
    fn test_array_keeps_first_record() {
        let text = r#"
            [[ness]]
            combo_frame = 10

            [[ness]]
            combo_frame = 20
        "#;
        let imported = deserialize(text).unwrap();
        assert_eq!(imported.order, vec!["ness"]);
        assert_eq!(imported.records["ness"].combo_frame, 10);
    }

    #[test]
    fn test_empty_array_skipped() {
        let imported = deserialize("ness = []\n[mario]\n").unwrap();
        assert_eq!(imported.order, vec!["mario"]);
    }

    #[test]
    fn test_unknown_fields_ignored() {
        let imported = deserialize("[mario]\ncolor = \"red\"\ncombo_frame = 5\n").unwrap();
        assert_eq!(imported.records["mario"].combo_frame, 5);
    }

    #[test]
    fn test_malformed_text_is_parse_error() {
        let err = deserialize("[[mario]\nvfx_type = ").unwrap_err();
        assert!(matches!(err, ImportError::Parse(_)));
        assert!(err.to_string().starts_with("Failed to parse TOML: "));
    }

    #[test]
    fn test_scalar_top_level_rejected() {
        let err = deserialize("mario = 3\n").unwrap_err();
        assert!(matches!(err, ImportError::NotATable { ref key } if key == "mario"));

        let err = deserialize("mario = [1, 2]\n").unwrap_err();
        assert!(matches!(err, ImportError::NotATable { .. }));
    }

    #[test]
    fn test_wrong_field_type_names_entry() {
        let err = deserialize("[mario]\ncombo_frame = \"fast\"\n").unwrap_err();
        assert!(matches!(err, ImportError::InvalidEntry { ref key, .. } if key == "mario"));
        assert!(err.to_string().contains("mario"));
    }

    #[test]
    fn test_round_trip() {
        let mut map = ConfigMap::new();
        let record = apply_edit(&ComboRecord::default(), Field::VfxType, "retro");
        let record = apply_edit(&record, Field::Hit(0), "9");
        map.insert("mario".to_string(), record);
        map.insert(
            "link".to_string(),
            apply_edit(&ComboRecord::default(), Field::CooldownFrame, "30"),
        );
        let order = vec!["mario".to_string(), "link".to_string()];

        let imported = deserialize(&serialize(&map, &order)).unwrap();
        assert_eq!(imported.order, order);
        // hits come back sorted
        assert_eq!(imported.records["mario"].combo_hits, "3,4,5,9");
        assert_eq!(imported.records["mario"].vfx_type, "retro");
        assert_eq!(imported.records["link"], map["link"]);
    }

    #[test]
    fn test_deserialize_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "[[pikachu]]\ncombo_hits = [4,2]\n").unwrap();
        let imported = deserialize_file(file.path()).unwrap();
        assert_eq!(imported.records["pikachu"].combo_hits, "4,2");

        let err = deserialize_file(Path::new("/no/such/combo_fx.toml")).unwrap_err();
        assert!(matches!(err, ImportError::Io { .. }));
    }
}
