use std::fmt;

pub const DEFAULT_TYPE: &str = "dream_team";
pub const DEFAULT_COMBO_FRAME: i64 = 75;
pub const DEFAULT_COOLDOWN_FRAME: i64 = 16;
pub const DEFAULT_COMBO_HITS: &str = "2,3,4,5";

/// Number of hit threshold slots shown in the form
pub const HIT_SLOTS: usize = 4;
pub const HIT_SLOT_NAMES: [&str; HIT_SLOTS] = ["OK", "GOOD", "GREAT", "EXCELLENT"];

/// Tunable settings attached to one entry.
///
/// Frame counts stay signed while editing so whatever the user typed survives
/// until export, where negative values are clamped to zero. Hit thresholds are
/// kept as the comma separated text the user edits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComboRecord {
    pub vfx_type: String,
    pub sfx_type: String,
    pub combo_frame: i64,
    pub cooldown_frame: i64,
    pub combo_hits: String,
}

impl Default for ComboRecord {
    fn default() -> Self {
        Self {
            vfx_type: DEFAULT_TYPE.to_string(),
            sfx_type: DEFAULT_TYPE.to_string(),
            combo_frame: DEFAULT_COMBO_FRAME,
            cooldown_frame: DEFAULT_COOLDOWN_FRAME,
            combo_hits: DEFAULT_COMBO_HITS.to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    VfxType,
    SfxType,
    ComboFrame,
    CooldownFrame,
    Hit(usize),
}

impl Field {
    /// Form order, top to bottom
    pub const ALL: [Field; 4 + HIT_SLOTS] = [
        Field::VfxType,
        Field::SfxType,
        Field::ComboFrame,
        Field::CooldownFrame,
        Field::Hit(0),
        Field::Hit(1),
        Field::Hit(2),
        Field::Hit(3),
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Field::VfxType => "VFX type",
            Field::SfxType => "SFX type",
            Field::ComboFrame => "Combo frames",
            Field::CooldownFrame => "Cooldown frames",
            Field::Hit(slot) => HIT_SLOT_NAMES.get(*slot).copied().unwrap_or("HIT"),
        }
    }

    pub fn is_type(&self) -> bool {
        matches!(self, Field::VfxType | Field::SfxType)
    }

    pub fn is_numeric(&self) -> bool {
        !self.is_type()
    }

    /// Look up a field by the name used in `:set` style commands
    pub fn from_name(name: &str) -> Option<Field> {
        match name.to_ascii_lowercase().as_str() {
            "vfx" | "vfx_type" => Some(Field::VfxType),
            "sfx" | "sfx_type" => Some(Field::SfxType),
            "combo" | "combo_frame" => Some(Field::ComboFrame),
            "cooldown" | "cooldown_frame" => Some(Field::CooldownFrame),
            "ok" => Some(Field::Hit(0)),
            "good" => Some(Field::Hit(1)),
            "great" => Some(Field::Hit(2)),
            "excellent" => Some(Field::Hit(3)),
            _ => None,
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl ComboRecord {
    /// Text shown in the form for a field
    pub fn field_value(&self, field: Field) -> String {
        match field {
            Field::VfxType => self.vfx_type.clone(),
            Field::SfxType => self.sfx_type.clone(),
            Field::ComboFrame => self.combo_frame.to_string(),
            Field::CooldownFrame => self.cooldown_frame.to_string(),
            Field::Hit(slot) => self.hit_slot(slot).to_string(),
        }
    }

    /// The raw token at `slot` of the hits text, empty when absent
    pub fn hit_slot(&self, slot: usize) -> &str {
        self.combo_hits.split(',').nth(slot).map(str::trim).unwrap_or("")
    }

    pub fn export_combo_frame(&self) -> i64 {
        self.combo_frame.max(0)
    }

    pub fn export_cooldown_frame(&self) -> i64 {
        self.cooldown_frame.max(0)
    }

    pub fn export_hits(&self) -> Vec<i64> {
        parse_hits(&self.combo_hits)
    }
}

/// Return a copy of `record` with `field` set from the user's text.
///
/// Never fails: numbers that do not parse become 0.
pub fn apply_edit(record: &ComboRecord, field: Field, value: &str) -> ComboRecord {
    let mut updated = record.clone();
    let value = value.trim();

    match field {
        Field::VfxType => updated.vfx_type = value.to_string(),
        Field::SfxType => updated.sfx_type = value.to_string(),
        Field::ComboFrame => updated.combo_frame = coerce_frames(value),
        Field::CooldownFrame => updated.cooldown_frame = coerce_frames(value),
        Field::Hit(slot) => updated.combo_hits = replace_hit_slot(&record.combo_hits, slot, value),
    }

    updated
}

pub fn coerce_frames(value: &str) -> i64 {
    value.trim().parse::<i64>().unwrap_or(0)
}

/// Parse hit thresholds, keeping positive integers only, sorted ascending
pub fn parse_hits(text: &str) -> Vec<i64> {
    let mut hits: Vec<i64> = text
        .split(',')
        .filter_map(|token| token.trim().parse::<i64>().ok())
        .filter(|n| *n > 0)
        .collect();
    hits.sort_unstable();
    hits
}

pub fn join_hits(hits: &[i64]) -> String {
    hits.iter()
        .map(|n| n.to_string())
        .collect::<Vec<_>>()
        .join(",")
}

fn replace_hit_slot(text: &str, slot: usize, value: &str) -> String {
    let mut tokens: Vec<String> = text.split(',').map(|t| t.trim().to_string()).collect();
    if tokens.len() <= slot {
        tokens.resize(slot + 1, String::new());
    }
    tokens[slot] = value.to_string();
    tokens.join(",")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_record() {
        let record = ComboRecord::default();
        assert_eq!(record.vfx_type, "dream_team");
        assert_eq!(record.sfx_type, "dream_team");
        assert_eq!(record.combo_frame, 75);
        assert_eq!(record.cooldown_frame, 16);
        assert_eq!(record.combo_hits, "2,3,4,5");
    }

    #[test]
    fn test_parse_hits() {
        assert_eq!(parse_hits("2,3,4,5"), vec![2, 3, 4, 5]);
        assert_eq!(parse_hits("5,2,x,-1,3"), vec![2, 3, 5]);
        assert_eq!(parse_hits(" 4 , 0, 1 "), vec![1, 4]);
        assert!(parse_hits("").is_empty());
        assert!(parse_hits(",,,").is_empty());
    }

    #[test]
    fn test_negative_frames_clamp_on_export() {
        let record = apply_edit(&ComboRecord::default(), Field::ComboFrame, "-12");
        assert_eq!(record.combo_frame, -12);
        assert_eq!(record.export_combo_frame(), 0);

        let record = apply_edit(&record, Field::CooldownFrame, "-1");
        assert_eq!(record.export_cooldown_frame(), 0);
    }

    #[test]
    fn test_invalid_numbers_coerce_to_zero() {
        let record = apply_edit(&ComboRecord::default(), Field::ComboFrame, "abc");
        assert_eq!(record.combo_frame, 0);
        let record = apply_edit(&record, Field::CooldownFrame, "");
        assert_eq!(record.cooldown_frame, 0);
        let record = apply_edit(&record, Field::ComboFrame, " 90 ");
        assert_eq!(record.combo_frame, 90);
    }

    #[test]
    fn test_apply_edit_leaves_input_untouched() {
        let original = ComboRecord::default();
        let edited = apply_edit(&original, Field::VfxType, "smash");
        assert_eq!(original.vfx_type, "dream_team");
        assert_eq!(edited.vfx_type, "smash");
        assert_eq!(edited.sfx_type, "dream_team");
    }

    #[test]
    fn test_hit_slot_edit() {
        let record = apply_edit(&ComboRecord::default(), Field::Hit(1), "7");
        assert_eq!(record.combo_hits, "2,7,4,5");
        assert_eq!(record.hit_slot(1), "7");

        // Slots past the end are padded with empty tokens
        let short = ComboRecord {
            combo_hits: "3".to_string(),
            ..ComboRecord::default()
        };
        let record = apply_edit(&short, Field::Hit(3), "9");
        assert_eq!(record.combo_hits, "3,,,9");
        assert_eq!(record.hit_slot(1), "");
        assert_eq!(record.export_hits(), vec![3, 9]);
    }

    #[test]
    fn test_field_lookup() {
        assert_eq!(Field::from_name("VFX"), Some(Field::VfxType));
        assert_eq!(Field::from_name("cooldown_frame"), Some(Field::CooldownFrame));
        assert_eq!(Field::from_name("excellent"), Some(Field::Hit(3)));
        assert_eq!(Field::from_name("nope"), None);
        assert_eq!(Field::Hit(2).label(), "GREAT");
    }
}
