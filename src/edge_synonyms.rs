//! # Edge Banding Synonyms
//!
//! Maps natural Spanish phrasings ("un lado largo", "cuatro lados",
//! "todos los lados") to the canonical [`EdgeBanding`] variants.
//!
//! The default table is embedded; callers may build their own and hand it to
//! the extractor to support new phrasings without touching the grammars.

use lazy_static::lazy_static;
use std::collections::HashMap;

use crate::measure_model::EdgeBanding;

lazy_static! {
    static ref DEFAULT_SYNONYMS: Vec<(&'static str, EdgeBanding)> = vec![
        // One long side
        ("1 lado largo", EdgeBanding::OneLongSide),
        ("un lado largo", EdgeBanding::OneLongSide),
        ("1 largo", EdgeBanding::OneLongSide),
        ("un largo", EdgeBanding::OneLongSide),
        ("uno largo", EdgeBanding::OneLongSide),
        ("1 lado", EdgeBanding::OneLongSide),
        ("un lado", EdgeBanding::OneLongSide),
        // One long, one short
        ("1 lado largo y 1 lado corto", EdgeBanding::OneLongOneShortSide),
        ("un lado largo y un lado corto", EdgeBanding::OneLongOneShortSide),
        ("1 largo 1 corto", EdgeBanding::OneLongOneShortSide),
        ("1 largo y 1 corto", EdgeBanding::OneLongOneShortSide),
        ("un largo un corto", EdgeBanding::OneLongOneShortSide),
        ("un largo y un corto", EdgeBanding::OneLongOneShortSide),
        // One long, two short
        ("1 lado largo y 2 lados cortos", EdgeBanding::OneLongTwoShortSides),
        ("un lado largo y dos lados cortos", EdgeBanding::OneLongTwoShortSides),
        ("1 largo 2 cortos", EdgeBanding::OneLongTwoShortSides),
        ("1 largo y 2 cortos", EdgeBanding::OneLongTwoShortSides),
        ("un largo dos cortos", EdgeBanding::OneLongTwoShortSides),
        ("un largo y dos cortos", EdgeBanding::OneLongTwoShortSides),
        // All four
        ("4 lados", EdgeBanding::AllFourSides),
        ("cuatro lados", EdgeBanding::AllFourSides),
        ("los 4 lados", EdgeBanding::AllFourSides),
        ("los cuatro lados", EdgeBanding::AllFourSides),
        ("todos los lados", EdgeBanding::AllFourSides),
        ("todo el perimetro", EdgeBanding::AllFourSides),
        ("todo el perímetro", EdgeBanding::AllFourSides),
        ("todo el contorno", EdgeBanding::AllFourSides),
        ("completo", EdgeBanding::AllFourSides),
    ];
}

/// Phrase to edge-banding lookup table
#[derive(Debug, Clone, PartialEq)]
pub struct SynonymTable {
    entries: HashMap<String, EdgeBanding>,
    /// Used when a phrase is absent or unrecognized
    fallback: EdgeBanding,
}

impl SynonymTable {
    /// Empty table falling back to `OneLongSide`
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
            fallback: EdgeBanding::OneLongSide,
        }
    }

    /// Add or replace a phrase; stored normalized
    pub fn insert(&mut self, phrase: &str, banding: EdgeBanding) {
        let key = normalize_phrase(phrase);
        if !key.is_empty() {
            self.entries.insert(key, banding);
        }
    }

    pub fn with_synonym(mut self, phrase: &str, banding: EdgeBanding) -> Self {
        self.insert(phrase, banding);
        self
    }

    pub fn with_fallback(mut self, fallback: EdgeBanding) -> Self {
        self.fallback = fallback;
        self
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Find the longest entry the phrase starts with, on a word boundary
    ///
    /// Trailing words after a recognized phrase are ignored, so
    /// "4 lados por favor" resolves like "4 lados".
    pub fn lookup(&self, phrase: &str) -> Option<EdgeBanding> {
        let normalized = normalize_phrase(phrase);
        if normalized.is_empty() {
            return None;
        }

        self.entries
            .iter()
            .filter(|(key, _)| {
                normalized == **key
                    || (normalized.starts_with(key.as_str())
                        && normalized[key.len()..].starts_with(' '))
            })
            .max_by_key(|(key, _)| key.len())
            .map(|(_, banding)| *banding)
    }

    /// Like [`lookup`](Self::lookup) but never fails
    pub fn resolve(&self, phrase: &str) -> EdgeBanding {
        self.lookup(phrase).unwrap_or(self.fallback)
    }
}

impl Default for SynonymTable {
    fn default() -> Self {
        let mut table = Self::new();
        for (phrase, banding) in DEFAULT_SYNONYMS.iter() {
            table.insert(phrase, *banding);
        }
        table
    }
}

/// Lowercase, turn punctuation into spaces, collapse whitespace
pub fn normalize_phrase(phrase: &str) -> String {
    phrase
        .to_lowercase()
        .chars()
        .map(|c| if c.is_alphanumeric() { c } else { ' ' })
        .collect::<String>()
        .split_whitespace()
        .collect::<Vec<&str>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_table_canonical_phrases() {
        let table = SynonymTable::default();
        assert_eq!(table.lookup("un lado largo"), Some(EdgeBanding::OneLongSide));
        assert_eq!(
            table.lookup("1 largo 1 corto"),
            Some(EdgeBanding::OneLongOneShortSide)
        );
        assert_eq!(
            table.lookup("un largo dos cortos"),
            Some(EdgeBanding::OneLongTwoShortSides)
        );
        assert_eq!(table.lookup("4 lados"), Some(EdgeBanding::AllFourSides));
    }

    #[test]
    fn test_all_four_sides_variants() {
        let table = SynonymTable::default();
        for phrase in ["los cuatro lados", "cuatro lados", "todos los lados", "Todo el perímetro"] {
            assert_eq!(table.resolve(phrase), EdgeBanding::AllFourSides, "{phrase}");
        }
    }

    #[test]
    fn test_normalization() {
        assert_eq!(normalize_phrase("  4   LADOS. "), "4 lados");
        assert_eq!(normalize_phrase("1-largo, 2-cortos"), "1 largo 2 cortos");
    }

    #[test]
    fn test_longest_prefix_wins() {
        let table = SynonymTable::default();
        assert_eq!(
            table.resolve("1 lado largo y 1 lado corto"),
            EdgeBanding::OneLongOneShortSide
        );
        assert_eq!(
            table.resolve("1 largo 2 cortos y nada mas"),
            EdgeBanding::OneLongTwoShortSides
        );
        assert_eq!(table.resolve("4 lados y"), EdgeBanding::AllFourSides);
    }

    #[test]
    fn test_prefix_requires_word_boundary() {
        let table = SynonymTable::default();
        // "4 ladoss" must not match "4 lados"
        assert_eq!(table.lookup("4 ladoss"), None);
    }

    #[test]
    fn test_unrecognized_falls_back() {
        let table = SynonymTable::default();
        assert_eq!(table.lookup("con mucho cariño"), None);
        assert_eq!(table.resolve("con mucho cariño"), EdgeBanding::OneLongSide);
        assert_eq!(table.resolve(""), EdgeBanding::OneLongSide);
    }

    #[test]
    fn test_replaceable_table() {
        let table = SynonymTable::new()
            .with_synonym("perimetral", EdgeBanding::AllFourSides)
            .with_fallback(EdgeBanding::OneLongOneShortSide);

        assert_eq!(table.len(), 1);
        assert_eq!(table.resolve("Perimetral"), EdgeBanding::AllFourSides);
        assert_eq!(table.resolve("4 lados"), EdgeBanding::OneLongOneShortSide);
    }
}
