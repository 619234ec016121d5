use crate::model::{ComboRecord, ConfigMap};
use regex::Regex;
use std::sync::LazyLock;

static BARE_KEY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z0-9_-]+$").expect("bare key pattern is valid")
});

/// Render the export file for the entries in `order`.
///
/// Entries without a record get the default one. Blocks are separated by a
/// single blank line and appear in `order`.
pub fn serialize(map: &ConfigMap, order: &[String]) -> String {
    let fallback = ComboRecord::default();
    order
        .iter()
        .map(|name| render_block(name, map.get(name).unwrap_or(&fallback)))
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn render_block(name: &str, record: &ComboRecord) -> String {
    let hits = record
        .export_hits()
        .iter()
        .map(|n| n.to_string())
        .collect::<Vec<_>>()
        .join(",");

    format!(
        "[[{}]]\nvfx_type = {}\nsfx_type = {}\ncombo_frame = {}\ncooldown_frame = {}\ncombo_hits = [{}]\n",
        toml_key(name),
        toml_string(&record.vfx_type),
        toml_string(&record.sfx_type),
        record.export_combo_frame(),
        record.export_cooldown_frame(),
        hits
    )
}

fn toml_key(name: &str) -> String {
    if BARE_KEY.is_match(name) {
        name.to_string()
    } else {
        toml_string(name)
    }
}

fn toml_string(value: &str) -> String {
    toml::Value::String(value.to_string()).to_string()
}
