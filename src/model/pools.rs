use super::catalog::Catalog;

/// Which side of the partition an entry sits on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pool {
    Enabled,
    Disabled,
}

impl Pool {
    pub fn other(self) -> Self {
        match self {
            Pool::Enabled => Pool::Disabled,
            Pool::Disabled => Pool::Enabled,
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Pool::Enabled => "Enabled",
            Pool::Disabled => "Disabled",
        }
    }
}

/// Ordered enabled set. The disabled set is always derived from the catalog,
/// so the two can never overlap or drift apart.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Pools {
    enabled: Vec<String>,
}

impl Pools {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn enabled(&self) -> &[String] {
        &self.enabled
    }

    /// Catalog entries not enabled, in catalog order
    pub fn disabled<'a>(&self, catalog: &'a Catalog) -> Vec<&'a str> {
        catalog
            .entries()
            .iter()
            .filter(|e| !self.is_enabled(e))
            .map(String::as_str)
            .collect()
    }

    pub fn list<'a>(&'a self, pool: Pool, catalog: &'a Catalog) -> Vec<&'a str> {
        match pool {
            Pool::Enabled => self.enabled.iter().map(String::as_str).collect(),
            Pool::Disabled => self.disabled(catalog),
        }
    }

    pub fn is_enabled(&self, name: &str) -> bool {
        self.enabled.iter().any(|e| e == name)
    }

    /// Append to the enabled set. Returns false if already enabled.
    pub fn enable(&mut self, name: &str) -> bool {
        if self.is_enabled(name) {
            return false;
        }
        self.enabled.push(name.to_string());
        true
    }

    /// Returns false if the entry was not enabled
    pub fn disable(&mut self, name: &str) -> bool {
        let before = self.enabled.len();
        self.enabled.retain(|e| e != name);
        self.enabled.len() != before
    }

    pub fn enable_all(&mut self, catalog: &Catalog) {
        self.enabled = catalog.entries().to_vec();
    }

    pub fn disable_all(&mut self) {
        self.enabled.clear();
    }

    /// Replace the enabled set, dropping duplicates
    pub fn replace(&mut self, names: impl IntoIterator<Item = String>) {
        self.enabled.clear();
        for name in names {
            self.enable(&name);
        }
    }

    /// Move an enabled entry one place earlier (negative) or later (positive)
    /// in export order. Returns false when it cannot move.
    pub fn shift(&mut self, name: &str, delta: isize) -> bool {
        let Some(pos) = self.enabled.iter().position(|e| e == name) else {
            return false;
        };
        let target = pos as isize + delta;
        if target < 0 || target >= self.enabled.len() as isize {
            return false;
        }
        let entry = self.enabled.remove(pos);
        self.enabled.insert(target as usize, entry);
        true
    }
}
