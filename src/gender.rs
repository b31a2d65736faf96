// ⚧ Gender Normalisation - Explicit mapping table applied at load time
//
// Source files disagree: some use "M"/"F", others "Male"/"Female".
// The loader maps every raw value through this table once, so the core
// only ever sees `Gender`.

use crate::record::Gender;
use std::collections::HashMap;

#[derive(Debug, Clone)]
pub struct GenderMap {
    /// Lowercased raw value -> canonical gender
    table: HashMap<String, Gender>,
}

impl GenderMap {
    /// Empty table; every value is unmapped
    pub fn empty() -> Self {
        GenderMap {
            table: HashMap::new(),
        }
    }

    pub fn with_alias(mut self, raw: &str, gender: Gender) -> Self {
        self.add_alias(raw, gender);
        self
    }

    pub fn add_alias(&mut self, raw: &str, gender: Gender) {
        self.table.insert(raw.trim().to_lowercase(), gender);
    }

    /// Look up a raw cell value; blank or unknown values yield None
    pub fn normalize(&self, raw: &str) -> Option<Gender> {
        let key = raw.trim().to_lowercase();
        if key.is_empty() {
            return None;
        }
        self.table.get(&key).copied()
    }

    pub fn alias_count(&self) -> usize {
        self.table.len()
    }
}

impl Default for GenderMap {
    fn default() -> Self {
        GenderMap::empty()
            .with_alias("M", Gender::Male)
            .with_alias("Male", Gender::Male)
            .with_alias("F", Gender::Female)
            .with_alias("Female", Gender::Female)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_both_encodings_map_to_same_gender() {
        let map = GenderMap::default();

        assert_eq!(map.normalize("M"), Some(Gender::Male));
        assert_eq!(map.normalize("male"), Some(Gender::Male));
        assert_eq!(map.normalize(" F "), Some(Gender::Female));
        assert_eq!(map.normalize("FEMALE"), Some(Gender::Female));
    }

    #[test]
    fn test_unknown_and_blank_are_none() {
        let map = GenderMap::default();

        assert_eq!(map.normalize(""), None);
        assert_eq!(map.normalize("X"), None);
    }

    #[test]
    fn test_custom_alias() {
        let map = GenderMap::default().with_alias("Homme", Gender::Male);
        assert_eq!(map.normalize("homme"), Some(Gender::Male));
        assert_eq!(map.alias_count(), 5);
    }
}
