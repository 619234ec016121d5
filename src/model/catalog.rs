use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

const BUILTIN_ENTRIES: &[&str] = &[
    "mario", "donkey", "link", "samus", "samusd", "yoshi", "kirby", "fox", "pikachu", "luigi",
    "ness", "captain", "purin", "peach", "daisy", "koopa", "ice_climber", "sheik", "zelda",
    "mariod", "pichu", "falco", "marth", "lucina", "younglink", "ganon", "mewtwo", "roy", "chrom",
    "gamewatch", "metaknight", "pit", "pitb", "szerosuit", "wario", "snake", "ike",
    "pzenigame", "pfushigisou", "plizardon", "diddy", "lucas", "sonic", "dedede", "pikmin",
    "lucario", "robot", "toonlink", "wolf", "murabito", "rockman", "wiifit", "rosetta",
    "littlemac", "gekkouga", "palutena", "pacman", "reflet", "shulk", "koopajr", "duckhunt",
    "ryu", "ken", "cloud", "kamui", "bayonetta", "inkling", "ridley", "simon", "richter",
    "krool", "shizue", "gaogaen", "packun", "jack", "brave", "buddy", "dolly", "master",
    "tantan", "pickel", "edge", "eflame", "elight", "demon", "trail", "miifighter",
    "miiswordsman", "miigunner",
];

const BUILTIN_TYPES: &[&str] = &["dream_team", "classic", "arcade", "retro", "none"];

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("could not read catalog {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid catalog: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("catalog has no {0}")]
    Empty(&'static str),
}

#[derive(Debug, Deserialize)]
struct CatalogFile {
    entries: Vec<String>,
    types: Vec<String>,
}

/// The fixed set of entries that can be enabled, and the type names the
/// vfx/sfx fields choose from
#[derive(Debug, Clone, PartialEq)]
pub struct Catalog {
    entries: Vec<String>,
    types: Vec<String>,
}

impl Catalog {
    pub fn new(entries: Vec<String>, types: Vec<String>) -> Result<Self, CatalogError> {
        let entries = dedup_preserving_order(entries);
        let types = dedup_preserving_order(types);
        if entries.is_empty() {
            return Err(CatalogError::Empty("entries"));
        }
        if types.is_empty() {
            return Err(CatalogError::Empty("types"));
        }
        Ok(Self { entries, types })
    }

    pub fn builtin() -> Self {
        Self {
            entries: BUILTIN_ENTRIES.iter().map(|s| s.to_string()).collect(),
            types: BUILTIN_TYPES.iter().map(|s| s.to_string()).collect(),
        }
    }

    pub fn from_toml_str(content: &str) -> Result<Self, CatalogError> {
        let file: CatalogFile = toml::from_str(content)?;
        Self::new(file.entries, file.types)
    }

    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        let content = fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    pub fn types(&self) -> &[String] {
        &self.types
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.iter().any(|e| e == name)
    }

    pub fn has_type(&self, type_name: &str) -> bool {
        self.types.iter().any(|t| t == type_name)
    }

    /// Append an entry that only exists in an imported file.
    /// Returns false if it was already known.
    pub fn add_entry(&mut self, name: &str) -> bool {
        if self.contains(name) {
            return false;
        }
        self.entries.push(name.to_string());
        true
    }

    /// Step through the type list from `current`, wrapping at both ends.
    /// An unknown current type starts from the first type.
    pub fn cycle_type(&self, current: &str, step: isize) -> &str {
        let len = self.types.len() as isize;
        let next = match self.types.iter().position(|t| t == current) {
            Some(pos) => (pos as isize + step).rem_euclid(len),
            None => 0,
        };
        &self.types[next as usize]
    }
}

fn dedup_preserving_order(items: Vec<String>) -> Vec<String> {
    let mut seen = Vec::with_capacity(items.len());
    for item in items {
        let item = item.trim().to_string();
        if !item.is_empty() && !seen.contains(&item) {
            seen.push(item);
        }
    }
    seen
}
