//! # Measure Extractor
//!
//! This module turns free-form Spanish text, dictated or produced by an image
//! captioning service, into validated [`MeasurementRecord`]s.
//!
//! ## Features
//!
//! - Several independent grammars run over the same text; every match from
//!   every grammar becomes a candidate
//! - Quantities default to 1, edge banding to one long side
//! - Edge-banding phrases normalized through a replaceable [`SynonymTable`]
//! - Mode-specific bounds: dictated values only need to be positive, caption
//!   values must fall within 10–500 cm
//! - Decimal commas are accepted, except where a comma separates two listed
//!   measures ("120x60,80x40")
//! - Duplicate `(length, width)` pairs inside one call are collapsed, keeping
//!   the first occurrence
//!
//! Extraction never fails: text without any measure yields an empty vector.

use log::{debug, info, trace};
use regex::Regex;
use std::collections::HashSet;

use crate::edge_synonyms::SynonymTable;
use crate::extraction_config::{ExtractionConfig, ExtractionMode};
use crate::measure_model::{parse_decimal, MeasurementRecord};
use crate::measure_patterns::{
    quantity_from_word, split_listed_measures, trailing_phrase, DIMENSIONS_FIRST_REGEX,
    LABELED_REGEX, QUANTITY_FIRST_REGEX, UNIT_SUFFIX_REGEX,
};
use crate::quote_errors::QuoteError;

/// Raw substrings captured by one recognizer match
#[derive(Debug, Clone, PartialEq)]
pub struct RawCapture {
    /// Name of the recognizer that produced the capture
    pub recognizer: String,
    pub quantity: Option<String>,
    pub length: String,
    pub width: String,
    /// Trailing text that may name the edge banding
    pub edge_phrase: Option<String>,
}

/// A declarative grammar: a regex with named groups plus what it may capture
///
/// The regex must define `length` and `width` groups; a `qty` group is
/// optional.
#[derive(Debug, Clone)]
pub struct Recognizer {
    name: String,
    pattern: Regex,
    accepts_edge_phrase: bool,
    only_in: Option<ExtractionMode>,
}

impl Recognizer {
    /// Build a recognizer from a pattern string
    ///
    /// # Examples
    ///
    /// ```rust
    /// use cotizaciones::measure_extractor::Recognizer;
    ///
    /// let recognizer = Recognizer::new(
    ///     "medida",
    ///     r"(?i)medida\s+(?P<length>\d+)\s*-\s*(?P<width>\d+)",
    ///     false,
    /// )?;
    /// assert_eq!(recognizer.name(), "medida");
    /// # Ok::<(), cotizaciones::quote_errors::QuoteError>(())
    /// ```
    pub fn new(name: &str, pattern: &str, accepts_edge_phrase: bool) -> Result<Self, QuoteError> {
        let pattern = Regex::new(pattern)
            .map_err(|e| QuoteError::InvalidConfig(format!("recognizer '{name}': {e}")))?;
        Self::from_regex(name, pattern, accepts_edge_phrase)
    }

    fn from_regex(name: &str, pattern: Regex, accepts_edge_phrase: bool) -> Result<Self, QuoteError> {
        let groups: Vec<&str> = pattern.capture_names().flatten().collect();
        for required in ["length", "width"] {
            if !groups.contains(&required) {
                return Err(QuoteError::InvalidConfig(format!(
                    "recognizer '{name}' has no '{required}' group"
                )));
            }
        }
        Ok(Self {
            name: name.to_string(),
            pattern,
            accepts_edge_phrase,
            only_in: None,
        })
    }

    /// Restrict the recognizer to one extraction mode
    pub fn only_in(mut self, mode: ExtractionMode) -> Self {
        self.only_in = Some(mode);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn applies_to(&self, mode: ExtractionMode) -> bool {
        self.only_in.map_or(true, |only| only == mode)
    }

    /// All non-overlapping matches of this grammar in `text`
    pub fn captures(&self, text: &str) -> Vec<RawCapture> {
        self.pattern
            .captures_iter(text)
            .filter_map(|caps| {
                let whole = caps.get(0)?;
                let length = caps.name("length")?.as_str().to_string();
                let width = caps.name("width")?.as_str().to_string();
                let quantity = caps.name("qty").map(|m| m.as_str().to_string());
                let edge_phrase = if self.accepts_edge_phrase {
                    Some(trailing_phrase(text, whole.end()).to_string())
                        .filter(|phrase| !phrase.is_empty())
                } else {
                    None
                };

                Some(RawCapture {
                    recognizer: self.name.clone(),
                    quantity,
                    length,
                    width,
                    edge_phrase,
                })
            })
            .collect()
    }
}

/// The built-in grammars in priority order
pub fn default_recognizers() -> Vec<Recognizer> {
    let builtin = |name: &str, regex: &Regex, edge: bool| Recognizer {
        name: name.to_string(),
        pattern: regex.clone(),
        accepts_edge_phrase: edge,
        only_in: None,
    };

    vec![
        builtin("quantity-first", &*QUANTITY_FIRST_REGEX, true),
        builtin("dimensions-first", &*DIMENSIONS_FIRST_REGEX, true),
        builtin("labeled", &*LABELED_REGEX, false),
        builtin("unit-suffix", &*UNIT_SUFFIX_REGEX, true).only_in(ExtractionMode::Caption),
    ]
}

/// Measure extractor running an ordered list of recognizers
#[derive(Debug, Clone)]
pub struct MeasureExtractor {
    recognizers: Vec<Recognizer>,
    synonyms: SynonymTable,
    config: ExtractionConfig,
}

impl MeasureExtractor {
    /// Create an extractor with the built-in grammars, synonyms and bounds
    ///
    /// # Examples
    ///
    /// ```rust
    /// use cotizaciones::extraction_config::ExtractionMode;
    /// use cotizaciones::measure_extractor::MeasureExtractor;
    ///
    /// let extractor = MeasureExtractor::new();
    /// let records = extractor.extract("2 unidades de 120 por 60 bordo 4 lados", ExtractionMode::Dictation);
    ///
    /// assert_eq!(records.len(), 1);
    /// assert_eq!(records[0].quantity(), 2);
    /// assert_eq!(records[0].length(), 120.0);
    /// ```
    pub fn new() -> Self {
        Self::with_config(ExtractionConfig::default())
    }

    pub fn with_config(config: ExtractionConfig) -> Self {
        info!(
            "Creating MeasureExtractor: dictation bounds {:?}, caption bounds {:?}",
            config.dictation_bounds, config.caption_bounds
        );
        Self {
            recognizers: default_recognizers(),
            synonyms: SynonymTable::default(),
            config,
        }
    }

    /// Replace the edge-banding synonym table
    pub fn with_synonyms(mut self, synonyms: SynonymTable) -> Self {
        self.synonyms = synonyms;
        self
    }

    /// Append a recognizer after the built-in ones
    pub fn with_recognizer(mut self, recognizer: Recognizer) -> Self {
        debug!("Registering recognizer '{}'", recognizer.name());
        self.recognizers.push(recognizer);
        self
    }

    pub fn config(&self) -> &ExtractionConfig {
        &self.config
    }

    pub fn recognizers(&self) -> &[Recognizer] {
        &self.recognizers
    }

    /// Extract validated, deduplicated measures from `text`
    ///
    /// Output order is the order of first occurrence across recognizers, in
    /// priority order. Identical input always yields identical output.
    pub fn extract(&self, text: &str, mode: ExtractionMode) -> Vec<MeasurementRecord> {
        let bounds = self.config.bounds(mode);
        let text = split_listed_measures(text);
        let mut seen = HashSet::new();
        let mut records = Vec::new();

        debug!(
            "Extracting measures in {:?} mode from {} characters",
            mode,
            text.chars().count()
        );

        for recognizer in self.recognizers.iter().filter(|r| r.applies_to(mode)) {
            let captures = recognizer.captures(&text);
            debug!(
                "Recognizer '{}' produced {} candidates",
                recognizer.name(),
                captures.len()
            );

            for capture in captures {
                let record = match self.resolve(&capture) {
                    Some(record) => record,
                    None => {
                        trace!("Discarding malformed capture {:?}", capture);
                        continue;
                    }
                };

                if !bounds.contains(record.length()) || !bounds.contains(record.width()) {
                    debug!(
                        "Discarding {} x {} from '{}': outside {:?} bounds",
                        record.length(),
                        record.width(),
                        capture.recognizer,
                        mode
                    );
                    continue;
                }

                if !seen.insert(record.dimension_key()) {
                    trace!(
                        "Skipping duplicate {} x {} from '{}'",
                        record.length(),
                        record.width(),
                        capture.recognizer
                    );
                    continue;
                }

                trace!("Accepted measure: {}", record.description());
                records.push(record);
            }
        }

        info!("Extracted {} measures in {:?} mode", records.len(), mode);
        records
    }

    /// Turn raw substrings into a typed record, or `None` if a number is
    /// malformed or a dimension is not positive
    pub fn resolve(&self, capture: &RawCapture) -> Option<MeasurementRecord> {
        let length = parse_decimal(&capture.length)?;
        let width = parse_decimal(&capture.width)?;
        let quantity = match &capture.quantity {
            Some(raw) => quantity_from_word(raw)?,
            None => 1,
        };
        let edge_banding = self
            .synonyms
            .resolve(capture.edge_phrase.as_deref().unwrap_or(""));

        let record = MeasurementRecord::new(quantity, length, width).ok()?;
        Some(record.with_edge_banding(edge_banding))
    }
}

impl Default for MeasureExtractor {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::measure_model::{Drilling, EdgeBanding, EdgeFinish};

    fn dictate(text: &str) -> Vec<MeasurementRecord> {
        MeasureExtractor::new().extract(text, ExtractionMode::Dictation)
    }

    fn caption(text: &str) -> Vec<MeasurementRecord> {
        MeasureExtractor::new().extract(text, ExtractionMode::Caption)
    }

    #[test]
    fn test_quantity_first_with_edge_banding() {
        let records = dictate("1 unidad de 23.4 por 33.1 bordo 4 lados");

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].quantity(), 1);
        assert_eq!(records[0].length(), 23.4);
        assert_eq!(records[0].width(), 33.1);
        assert_eq!(records[0].edge_banding(), EdgeBanding::AllFourSides);
        assert_eq!(records[0].drilling(), Drilling::None);
        assert_eq!(records[0].edge_finish(), EdgeFinish::Soft);
    }

    #[test]
    fn test_dimensions_first_with_quantity() {
        let records = dictate("23.4 x 33.1 cantidad 2 bordo 1 largo 1 corto");

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].quantity(), 2);
        assert_eq!(records[0].edge_banding(), EdgeBanding::OneLongOneShortSide);
    }

    #[test]
    fn test_labeled_defaults() {
        let records = dictate("largo 120 ancho 60 cantidad 3");

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].quantity(), 3);
        assert_eq!(records[0].length(), 120.0);
        assert_eq!(records[0].width(), 60.0);
        assert_eq!(records[0].edge_banding(), EdgeBanding::OneLongSide);
    }

    #[test]
    fn test_quantity_first_wins_over_later_duplicate() {
        let records = dictate("3 piezas de 80 por 40 bordo todos los lados");

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].quantity(), 3);
        assert_eq!(records[0].edge_banding(), EdgeBanding::AllFourSides);
    }

    #[test]
    fn test_spelled_out_quantity() {
        let records = dictate("dos unidades de 120 por 60");
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].quantity(), 2);
    }

    #[test]
    fn test_zero_quantity_coerced() {
        let records = dictate("0 unidades de 120 por 60");
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].quantity(), 1);
    }

    #[test]
    fn test_overflowing_quantity_is_discarded() {
        // The quantity-first candidate is dropped; dimensions-first still finds it
        let records = dictate("99999999999 unidades de 120 por 60");
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].quantity(), 1);
    }

    #[test]
    fn test_decimal_comma() {
        let records = dictate("una pieza de 45,5 por 30,25");
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].length(), 45.5);
        assert_eq!(records[0].width(), 30.25);
    }

    #[test]
    fn test_comma_separated_measures() {
        let records = caption("120x60,80x40");
        assert_eq!(records.len(), 2);
        assert_eq!((records[0].length(), records[0].width()), (120.0, 60.0));
        assert_eq!((records[1].length(), records[1].width()), (80.0, 40.0));

        let records = dictate("2 unidades de 120 por 60,5 piezas de 80 por 40");
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].quantity(), 2);
        assert_eq!(records[0].width(), 60.0);
        assert_eq!(records[1].quantity(), 5);
        assert_eq!(records[1].length(), 80.0);
    }

    #[test]
    fn test_caption_unit_suffix_only_in_caption_mode() {
        let text = "Se observa un tablero de 120 cm x 60 cm";
        assert_eq!(caption(text).len(), 1);
        assert!(dictate(text).is_empty());
    }

    #[test]
    fn test_no_measures() {
        assert!(dictate("hola, quisiera una cotización").is_empty());
        assert!(caption("").is_empty());
    }

    #[test]
    fn test_custom_recognizer() {
        let recognizer = Recognizer::new(
            "medida",
            r"(?i)medida\s+(?P<length>\d+)\s*-\s*(?P<width>\d+)",
            false,
        )
        .unwrap();
        let extractor = MeasureExtractor::new().with_recognizer(recognizer);

        let records = extractor.extract("medida 150-70", ExtractionMode::Dictation);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].length(), 150.0);
        assert_eq!(records[0].width(), 70.0);
    }

    #[test]
    fn test_recognizer_requires_dimension_groups() {
        let result = Recognizer::new("roto", r"(?P<length>\d+)", false);
        assert!(matches!(result, Err(QuoteError::InvalidConfig(_))));

        let result = Recognizer::new("roto", r"(?P<length>\d+", false);
        assert!(matches!(result, Err(QuoteError::InvalidConfig(_))));
    }

    #[test]
    fn test_resolve_malformed_number() {
        let extractor = MeasureExtractor::new();
        let capture = RawCapture {
            recognizer: "test".to_string(),
            quantity: None,
            length: "12..5".to_string(),
            width: "60".to_string(),
            edge_phrase: None,
        };
        assert!(extractor.resolve(&capture).is_none());
    }

    #[test]
    fn test_default_recognizer_order() {
        let extractor = MeasureExtractor::new();
        let names: Vec<&str> = extractor.recognizers().iter().map(|r| r.name()).collect();
        assert_eq!(
            names,
            vec!["quantity-first", "dimensions-first", "labeled", "unit-suffix"]
        );
    }
}
