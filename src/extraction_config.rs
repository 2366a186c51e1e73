//! # Extraction Configuration Module
//!
//! This module defines the extraction modes and the numeric bounds each mode
//! accepts for panel dimensions.

use anyhow::{Context, Result};
use std::env;
use std::str::FromStr;

use crate::quote_errors::QuoteError;

// Constants for caption bounds (centimeters)
pub const CAPTION_MIN_CM: f64 = 10.0;
pub const CAPTION_MAX_CM: f64 = 500.0;

/// Where the text being parsed came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExtractionMode {
    /// Speech-to-text output; values trusted at face value
    Dictation,
    /// Image/OCR description; noisy, strictly bounded
    Caption,
}

impl FromStr for ExtractionMode {
    type Err = QuoteError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "dictation" | "dictado" | "voz" | "audio" => Ok(ExtractionMode::Dictation),
            "caption" | "imagen" | "foto" | "camara" | "cámara" => Ok(ExtractionMode::Caption),
            other => Err(QuoteError::UnknownMode(other.to_string())),
        }
    }
}

/// Accepted range for length and width
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DimensionBounds {
    /// Lower bound
    pub min: f64,
    /// Upper bound, always inclusive
    pub max: f64,
    /// Whether `min` itself is accepted
    pub min_inclusive: bool,
}

impl DimensionBounds {
    /// Strictly positive, no upper bound
    pub fn positive() -> Self {
        Self {
            min: 0.0,
            max: f64::INFINITY,
            min_inclusive: false,
        }
    }

    /// Closed interval `[min, max]`
    pub fn closed(min: f64, max: f64) -> Self {
        Self {
            min,
            max,
            min_inclusive: true,
        }
    }

    pub fn contains(&self, value: f64) -> bool {
        if !value.is_finite() {
            return false;
        }
        let above_min = if self.min_inclusive {
            value >= self.min
        } else {
            value > self.min
        };
        above_min && value <= self.max
    }
}

/// Configuration structure for measure extraction
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractionConfig {
    /// Bounds applied in dictation mode
    pub dictation_bounds: DimensionBounds,
    /// Bounds applied in caption mode
    pub caption_bounds: DimensionBounds,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            dictation_bounds: DimensionBounds::positive(),
            caption_bounds: DimensionBounds::closed(CAPTION_MIN_CM, CAPTION_MAX_CM),
        }
    }
}

impl ExtractionConfig {
    /// Bounds for the given mode
    pub fn bounds(&self, mode: ExtractionMode) -> DimensionBounds {
        match mode {
            ExtractionMode::Dictation => self.dictation_bounds,
            ExtractionMode::Caption => self.caption_bounds,
        }
    }

    /// Defaults, with caption bounds overridable through `CAPTION_MIN_CM` and
    /// `CAPTION_MAX_CM`
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();

        let min = read_env_number("CAPTION_MIN_CM")?.unwrap_or(config.caption_bounds.min);
        let max = read_env_number("CAPTION_MAX_CM")?.unwrap_or(config.caption_bounds.max);
        if !min.is_finite() || !max.is_finite() || min < 0.0 {
            return Err(QuoteError::InvalidConfig(format!(
                "caption bounds must be finite and non-negative: {min}..{max}"
            ))
            .into());
        }
        if min > max {
            return Err(QuoteError::InvalidConfig(format!(
                "caption bounds are inverted: {min} > {max}"
            ))
            .into());
        }
        config.caption_bounds = DimensionBounds::closed(min, max);

        Ok(config)
    }
}

fn read_env_number(key: &str) -> Result<Option<f64>> {
    match env::var(key) {
        Ok(raw) => {
            let value = raw
                .trim()
                .parse::<f64>()
                .with_context(|| format!("{key} must be a number, got '{raw}'"))?;
            Ok(Some(value))
        }
        Err(env::VarError::NotPresent) => Ok(None),
        Err(e) => Err(e).with_context(|| format!("Failed to read {key}")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_bounds() {
        let config = ExtractionConfig::default();

        let dictation = config.bounds(ExtractionMode::Dictation);
        assert!(dictation.contains(900.0));
        assert!(dictation.contains(0.5));
        assert!(!dictation.contains(0.0));
        assert!(!dictation.contains(-3.0));

        let caption = config.bounds(ExtractionMode::Caption);
        assert!(caption.contains(10.0));
        assert!(caption.contains(500.0));
        assert!(!caption.contains(9.99));
        assert!(!caption.contains(500.5));
    }

    #[test]
    fn test_from_env_rejects_unusable_bounds() {
        for (min, max) in [("NaN", "500"), ("-5", "500"), ("10", "inf"), ("400", "100")] {
            env::set_var("CAPTION_MIN_CM", min);
            env::set_var("CAPTION_MAX_CM", max);
            let result = ExtractionConfig::from_env();
            env::remove_var("CAPTION_MIN_CM");
            env::remove_var("CAPTION_MAX_CM");

            let err = result.expect_err("bounds should be rejected");
            assert!(
                matches!(err.downcast_ref::<QuoteError>(), Some(QuoteError::InvalidConfig(_))),
                "{min}..{max}"
            );
        }
    }

    #[test]
    fn test_bounds_reject_non_finite() {
        let bounds = DimensionBounds::positive();
        assert!(!bounds.contains(f64::NAN));
        assert!(!bounds.contains(f64::INFINITY));
    }

    #[test]
    fn test_mode_from_str() {
        assert_eq!("dictado".parse::<ExtractionMode>(), Ok(ExtractionMode::Dictation));
        assert_eq!("Caption".parse::<ExtractionMode>(), Ok(ExtractionMode::Caption));
        assert_eq!("imagen".parse::<ExtractionMode>(), Ok(ExtractionMode::Caption));
        assert_eq!(
            "fax".parse::<ExtractionMode>(),
            Err(QuoteError::UnknownMode("fax".to_string()))
        );
    }
}
