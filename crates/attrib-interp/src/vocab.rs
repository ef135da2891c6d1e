//! Attribute vocabularies keyed by the client's `uiType`.
//!
//! A vocabulary has one column per key (e.g. shape, foreground colour,
//! background colour). Column index 0 is a blank sentinel; real attribute
//! values start at 1.

use indexmap::IndexMap;

/// Labels for one `uiType`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Vocabulary {
    name: String,
    keys: Vec<String>,
    labels: Vec<Vec<String>>,
}

impl Vocabulary {
    /// An empty vocabulary; add columns with [`with_key`](Self::with_key).
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            keys: Vec::new(),
            labels: Vec::new(),
        }
    }

    /// Append a key column.
    pub fn with_key<I, S>(mut self, key: impl Into<String>, labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.keys.push(key.into());
        self.labels.push(labels.into_iter().map(Into::into).collect());
        self
    }

    /// The `uiType` this vocabulary serves.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Number of key columns.
    pub fn key_count(&self) -> usize {
        self.keys.len()
    }

    /// Name of key column `key`.
    pub fn key_name(&self, key: usize) -> Option<&str> {
        self.keys.get(key).map(String::as_str)
    }

    /// Label for `value` in column `key`.
    pub fn label(&self, key: usize, value: u16) -> Option<&str> {
        self.labels
            .get(key)
            .and_then(|column| column.get(value as usize))
            .map(String::as_str)
    }

    /// `true` if the first `key_size` columns each hold at least
    /// `val_size` labels.
    pub fn covers(&self, key_size: u16, val_size: u16) -> bool {
        let key_size = key_size as usize;
        key_size <= self.labels.len()
            && self.labels[..key_size]
                .iter()
                .all(|column| column.len() >= val_size as usize)
    }

    /// Widest label among the values a layout can address.
    ///
    /// Values run from the sentinel at 0 up to `val_size` inclusive, since
    /// secrets are stored without the sentinel and shifted up by one.
    pub fn cell_width(&self, key_size: u16, val_size: u16) -> usize {
        self.labels
            .iter()
            .take(key_size as usize)
            .flat_map(|column| column.iter().take(val_size as usize + 1))
            .map(|label| label.chars().count())
            .max()
            .unwrap_or(0)
    }
}

/// The set of vocabularies a ControlReset can select from.
#[derive(Clone, Debug)]
pub struct VocabularyRegistry {
    tables: IndexMap<String, Vocabulary>,
}

impl VocabularyRegistry {
    /// A registry with no vocabularies.
    pub fn empty() -> Self {
        Self {
            tables: IndexMap::new(),
        }
    }

    /// The two vocabularies the capture client ships: `grid`
    /// (shape, foreground, background) and `grid-numeric` (numerals).
    pub fn builtin() -> Self {
        const SHAPES: [&str; 10] = [
            "", "diamond", "Hrect", "Vrect", "circle", "tri-up", "tri-dwn", "tri-Rt", "tri-Lt",
            "square",
        ];
        const COLOURS: [&str; 10] = [
            "", "red", "green", "blue", "yellow", "brown", "magenta", "cyan", "white", "orange",
        ];

        let mut registry = Self::empty();
        registry.register(
            Vocabulary::new("grid")
                .with_key("shape", SHAPES)
                .with_key("fg colour", COLOURS)
                .with_key("bg colour", COLOURS),
        );
        registry.register(
            Vocabulary::new("grid-numeric").with_key("Numeral", (0..100).map(|n| n.to_string())),
        );
        registry
    }

    /// Add or replace a vocabulary under its own name.
    pub fn register(&mut self, vocabulary: Vocabulary) {
        self.tables.insert(vocabulary.name().to_string(), vocabulary);
    }

    /// Look up a vocabulary by `uiType`.
    pub fn get(&self, ui_type: &str) -> Option<&Vocabulary> {
        self.tables.get(ui_type)
    }

    /// Registered names, in registration order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.tables.keys().map(String::as_str)
    }
}

impl Default for VocabularyRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_names_in_order() {
        let registry = VocabularyRegistry::builtin();
        let names: Vec<_> = registry.names().collect();
        assert_eq!(names, ["grid", "grid-numeric"]);
    }

    #[test]
    fn grid_labels() {
        let registry = VocabularyRegistry::builtin();
        let grid = registry.get("grid").unwrap();
        assert_eq!(grid.key_count(), 3);
        assert_eq!(grid.key_name(1), Some("fg colour"));
        assert_eq!(grid.label(0, 2), Some("Hrect"));
        assert_eq!(grid.label(1, 4), Some("yellow"));
        assert_eq!(grid.label(2, 6), Some("magenta"));
        assert_eq!(grid.label(0, 10), None);
        assert_eq!(grid.label(3, 0), None);
    }

    #[test]
    fn grid_cell_width_is_seven() {
        let registry = VocabularyRegistry::builtin();
        assert_eq!(registry.get("grid").unwrap().cell_width(3, 9), 7);
    }

    #[test]
    fn numeric_cell_width_grows_with_val_size() {
        let registry = VocabularyRegistry::builtin();
        let numeric = registry.get("grid-numeric").unwrap();
        // Values 0..=9 are single digits; valSize 10 can address "10".
        assert_eq!(numeric.cell_width(1, 9), 1);
        assert_eq!(numeric.cell_width(1, 10), 2);
    }

    #[test]
    fn coverage() {
        let registry = VocabularyRegistry::builtin();
        let grid = registry.get("grid").unwrap();
        assert!(grid.covers(3, 9));
        assert!(grid.covers(3, 10));
        assert!(!grid.covers(4, 9));
        assert!(!grid.covers(3, 11));
    }

    #[test]
    fn register_replaces_by_name() {
        let mut registry = VocabularyRegistry::builtin();
        registry.register(Vocabulary::new("grid").with_key("only", ["", "x"]));
        assert_eq!(registry.get("grid").unwrap().key_count(), 1);
        assert_eq!(registry.names().count(), 2);
    }
}
