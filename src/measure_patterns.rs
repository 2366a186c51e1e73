//! # Measure Patterns Module
//!
//! This module contains the regex grammars used to find panel measures in
//! dictated or captioned Spanish text.
//!
//! Every grammar uses the named groups `length` and `width`, and optionally
//! `qty`. The extractor reads fields by group name only.

use lazy_static::lazy_static;
use regex::Regex;
use std::borrow::Cow;

/// Spelled-out counts accepted in front of "unidades"/"piezas"
pub const QUANTITY_WORDS: [(&str, u32); 12] = [
    ("un", 1),
    ("una", 1),
    ("uno", 1),
    ("dos", 2),
    ("tres", 3),
    ("cuatro", 4),
    ("cinco", 5),
    ("seis", 6),
    ("siete", 7),
    ("ocho", 8),
    ("nueve", 9),
    ("diez", 10),
];

// "2 unidades de 120 por 60", "una pieza de 23,4 x 33,1"
pub const QUANTITY_FIRST_PATTERN: &str = r"(?i)\b(?P<qty>\d+|un[ao]?|dos|tres|cuatro|cinco|seis|siete|ocho|nueve|diez)\s*(?:unidad(?:es)?|pieza(?:s)?|placa(?:s)?)\s*(?:de\s*)?(?P<length>\d+(?:[.,]\d+)?)\s*(?:x|×|por)\s*(?P<width>\d+(?:[.,]\d+)?)";

// "120 por 60", "23.4 x 33.1 cantidad 2"
pub const DIMENSIONS_FIRST_PATTERN: &str = r"(?i)(?P<length>\d+(?:[.,]\d+)?)\s*(?:x|×|por)\s*(?P<width>\d+(?:[.,]\d+)?)(?:\s*,?\s*(?:cantidad|cant\.?)\s*:?\s*(?P<qty>\d+))?";

// "largo 120 ancho 60 cantidad 1", "L: 120 A: 60"
pub const LABELED_PATTERN: &str = r"(?i)\b(?:largo|l)\s*:?\s*(?P<length>\d+(?:[.,]\d+)?)\s*(?:cm)?\s*,?\s*(?:y\s+)?(?:ancho|a)\s*:?\s*(?P<width>\d+(?:[.,]\d+)?)(?:\s*(?:cm)?\s*,?\s*(?:cantidad|cant\.?)\s*:?\s*(?P<qty>\d+))?";

// "120 cm x 60 cm", "120 centímetros por 60 centímetros"
pub const UNIT_SUFFIX_PATTERN: &str = r"(?i)(?P<length>\d+(?:[.,]\d+)?)\s*(?:cm|cent[íi]metros?)\s*(?:x|×|por)\s*(?P<width>\d+(?:[.,]\d+)?)\s*(?:cm|cent[íi]metros?)";

// Start of another measure; an edge-banding phrase never runs past it
const ITEM_START_PATTERN: &str = r"(?i)\d+(?:[.,]\d+)?\s*(?:(?:cm|cent[íi]metros?)\s*)?(?:x|×|por)\s*\d|\b(?:\d+|un[ao]?|dos|tres|cuatro|cinco|seis|siete|ocho|nueve|diez)\s*(?:unidad|pieza|placa)|\b(?:largo|l)\s*:?\s*\d+(?:[.,]\d+)?\s*(?:cm)?\s*,?\s*(?:y\s+)?(?:ancho|a)\b|[\n;]";

// Connector words allowed between a measure and its edge-banding phrase
const EDGE_LEAD_PATTERN: &str = r"(?i)^[\s,:\-]*(?:y\s+)?(?:con\s+)?(?:(?:bordos?|bordes?|cantos?)\b\s*(?:en\s+|de\s+|a\s+)?)?";

// Bytes looked back from a comma when checking whether a measure ends there
const MEASURE_END_WINDOW: usize = 24;

// A width that closes a measure: "x 60", "por 60", "ancho 60"
const MEASURE_END_PATTERN: &str = r"(?i)(?:(?:x|×|por)\s*|\b(?:ancho|a)\s*:?\s*)\d+(?:\.\d+)?$";

// A measure starting right at the beginning of the text
const NEXT_ITEM_PATTERN: &str = r"(?i)^(?:\d+(?:[.,]\d+)?\s*(?:(?:cm|cent[íi]metros?)\s*)?(?:x|×|por)\s*\d|\d+\s*(?:unidad|pieza|placa))";

lazy_static! {
    pub static ref QUANTITY_FIRST_REGEX: Regex =
        Regex::new(QUANTITY_FIRST_PATTERN).expect("Quantity-first pattern should be valid");
    pub static ref DIMENSIONS_FIRST_REGEX: Regex =
        Regex::new(DIMENSIONS_FIRST_PATTERN).expect("Dimensions-first pattern should be valid");
    pub static ref LABELED_REGEX: Regex =
        Regex::new(LABELED_PATTERN).expect("Labeled pattern should be valid");
    pub static ref UNIT_SUFFIX_REGEX: Regex =
        Regex::new(UNIT_SUFFIX_PATTERN).expect("Unit-suffix pattern should be valid");
    static ref ITEM_START_REGEX: Regex =
        Regex::new(ITEM_START_PATTERN).expect("Item-start pattern should be valid");
    static ref EDGE_LEAD_REGEX: Regex =
        Regex::new(EDGE_LEAD_PATTERN).expect("Edge-lead pattern should be valid");
    static ref MEASURE_END_REGEX: Regex =
        Regex::new(MEASURE_END_PATTERN).expect("Measure-end pattern should be valid");
    static ref NEXT_ITEM_REGEX: Regex =
        Regex::new(NEXT_ITEM_PATTERN).expect("Next-item pattern should be valid");
}

/// Resolve a quantity capture, digits or a spelled-out count
pub fn quantity_from_word(raw: &str) -> Option<u32> {
    let raw = raw.trim().to_lowercase();
    if let Ok(value) = raw.parse::<u32>() {
        return Some(value);
    }
    QUANTITY_WORDS
        .iter()
        .find(|(word, _)| *word == raw)
        .map(|(_, value)| *value)
}

/// Turn commas that separate two listed measures into spaces
///
/// A comma between digits is normally a decimal separator ("23,4 x 33,1").
/// It is read as a list separator instead when the number before it closes a
/// measure and a new measure starts right after it, as in "120x60,80x40" or
/// "120 por 60,5 piezas de 80 por 40". Byte offsets are preserved.
pub fn split_listed_measures(text: &str) -> Cow<'_, str> {
    let bytes = text.as_bytes();
    let separators: Vec<usize> = text
        .match_indices(',')
        .map(|(index, _)| index)
        .filter(|&index| {
            index > 0
                && bytes[index - 1].is_ascii_digit()
                && bytes.get(index + 1).is_some_and(|b| b.is_ascii_digit())
                && closes_measure(&text[..index])
                && NEXT_ITEM_REGEX.is_match(&text[index + 1..])
        })
        .collect();

    if separators.is_empty() {
        return Cow::Borrowed(text);
    }

    let mut split = text.to_string();
    for index in separators {
        split.replace_range(index..index + 1, " ");
    }
    Cow::Owned(split)
}

fn closes_measure(prefix: &str) -> bool {
    let mut start = prefix.len().saturating_sub(MEASURE_END_WINDOW);
    while !prefix.is_char_boundary(start) {
        start += 1;
    }
    MEASURE_END_REGEX.is_match(&prefix[start..])
}

/// Text following a measure that may describe its edge banding
///
/// Stops at a line break, `;`, or the start of the next measure, and drops
/// leading connectors such as "con bordo".
pub fn trailing_phrase(text: &str, from: usize) -> &str {
    let tail = &text[from..];
    let tail = match ITEM_START_REGEX.find(tail) {
        Some(next) => &tail[..next.start()],
        None => tail,
    };
    let lead = EDGE_LEAD_REGEX.find(tail).map(|m| m.end()).unwrap_or(0);
    tail[lead..].trim()
}
