//! # Measure Data Model
//!
//! This module defines the line items of a panel-cutting quotation: how many
//! identical pieces, their length and width in centimeters, and the edge
//! treatment requested for them.
//!
//! ## Core Concepts
//!
//! - **MeasurementRecord**: one line of the quotation
//! - **EdgeBanding**: which sides of the panel receive edge banding ("bordo")
//! - **Drilling**: optional drilling along the length or the width
//! - **EdgeFinish**: soft or hard edge profile
//! - **MeasureFields**: raw, unvalidated values typed into the manual form
//!
//! ## Usage
//!
//! ```rust
//! use cotizaciones::measure_model::{EdgeBanding, MeasurementRecord};
//!
//! let record = MeasurementRecord::new(2, 120.0, 60.0)?
//!     .with_edge_banding(EdgeBanding::AllFourSides);
//!
//! assert_eq!(
//!     record.description(),
//!     "Cant: 2, L120, A60, P-ninguna, Bordo-4 Lados, B-Suave"
//! );
//! # Ok::<(), cotizaciones::quote_errors::QuoteError>(())
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::quote_errors::QuoteError;

/// Sides of a panel that receive edge banding
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum EdgeBanding {
    /// One long side
    #[default]
    #[serde(rename = "1-largo")]
    OneLongSide,
    /// One long side and one short side
    #[serde(rename = "1-largo-1-corto")]
    OneLongOneShortSide,
    /// One long side and both short sides
    #[serde(rename = "1-largo-2-cortos")]
    OneLongTwoShortSides,
    /// The whole perimeter
    #[serde(rename = "4-lados")]
    AllFourSides,
}

/// Drilling requested on the panel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Drilling {
    #[default]
    #[serde(rename = "ninguna")]
    None,
    #[serde(rename = "largo")]
    AlongLength,
    #[serde(rename = "ancho")]
    AlongWidth,
}

/// Profile of the banded edge
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum EdgeFinish {
    #[default]
    #[serde(rename = "canto-suave")]
    Soft,
    #[serde(rename = "canto-duro")]
    Hard,
}

impl EdgeBanding {
    /// All variants, in the order the form offers them
    pub const ALL: [EdgeBanding; 4] = [
        EdgeBanding::OneLongSide,
        EdgeBanding::OneLongOneShortSide,
        EdgeBanding::OneLongTwoShortSides,
        EdgeBanding::AllFourSides,
    ];

    /// Stable code used in payloads
    pub fn code(&self) -> &'static str {
        match self {
            EdgeBanding::OneLongSide => "1-largo",
            EdgeBanding::OneLongOneShortSide => "1-largo-1-corto",
            EdgeBanding::OneLongTwoShortSides => "1-largo-2-cortos",
            EdgeBanding::AllFourSides => "4-lados",
        }
    }

    /// Label shown in descriptions
    pub fn display_name(&self) -> &'static str {
        match self {
            EdgeBanding::OneLongSide => "1 Largo",
            EdgeBanding::OneLongOneShortSide => "1 Largo y 1 Corto",
            EdgeBanding::OneLongTwoShortSides => "1 Largo y 2 Cortos",
            EdgeBanding::AllFourSides => "4 Lados",
        }
    }
}

impl Drilling {
    pub fn code(&self) -> &'static str {
        match self {
            Drilling::None => "ninguna",
            Drilling::AlongLength => "largo",
            Drilling::AlongWidth => "ancho",
        }
    }
}

impl EdgeFinish {
    pub fn code(&self) -> &'static str {
        match self {
            EdgeFinish::Soft => "canto-suave",
            EdgeFinish::Hard => "canto-duro",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            EdgeFinish::Soft => "Suave",
            EdgeFinish::Hard => "Duro",
        }
    }
}

/// One line of a quotation
///
/// Fields are only reachable through accessors and setters; every setter
/// re-renders `description`, so the description always matches the values.
/// `line_number` is 0 until a [`crate::measure_list::MeasureListMerger`] owns
/// the record.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MeasurementRecord {
    #[serde(rename = "linea")]
    line_number: usize,
    #[serde(rename = "cantidad")]
    quantity: u32,
    #[serde(rename = "largo")]
    length: f64,
    #[serde(rename = "ancho")]
    width: f64,
    #[serde(rename = "perforacion")]
    drilling: Drilling,
    #[serde(rename = "tipoBordo")]
    edge_banding: EdgeBanding,
    #[serde(rename = "cantoBordo")]
    edge_finish: EdgeFinish,
    #[serde(rename = "descripcion")]
    description: String,
}

impl MeasurementRecord {
    /// Create a record with default drilling, banding and finish
    ///
    /// A zero quantity is raised to 1.
    ///
    /// # Errors
    ///
    /// `InvalidNumber` when a dimension is not a finite positive number.
    pub fn new(quantity: u32, length: f64, width: f64) -> Result<Self, QuoteError> {
        let mut record = Self {
            line_number: 0,
            quantity: quantity.max(1),
            length: check_dimension("length", length)?,
            width: check_dimension("width", width)?,
            drilling: Drilling::default(),
            edge_banding: EdgeBanding::default(),
            edge_finish: EdgeFinish::default(),
            description: String::new(),
        };
        record.refresh_description();
        Ok(record)
    }

    pub fn with_edge_banding(mut self, edge_banding: EdgeBanding) -> Self {
        self.set_edge_banding(edge_banding);
        self
    }

    pub fn with_drilling(mut self, drilling: Drilling) -> Self {
        self.set_drilling(drilling);
        self
    }

    pub fn with_edge_finish(mut self, edge_finish: EdgeFinish) -> Self {
        self.set_edge_finish(edge_finish);
        self
    }

    pub fn line_number(&self) -> usize {
        self.line_number
    }

    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    pub fn length(&self) -> f64 {
        self.length
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn drilling(&self) -> Drilling {
        self.drilling
    }

    pub fn edge_banding(&self) -> EdgeBanding {
        self.edge_banding
    }

    pub fn edge_finish(&self) -> EdgeFinish {
        self.edge_finish
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn set_quantity(&mut self, quantity: u32) {
        self.quantity = quantity.max(1);
        self.refresh_description();
    }

    /// Replace both dimensions; on error the record is left unchanged
    pub fn set_dimensions(&mut self, length: f64, width: f64) -> Result<(), QuoteError> {
        let length = check_dimension("length", length)?;
        let width = check_dimension("width", width)?;
        self.length = length;
        self.width = width;
        self.refresh_description();
        Ok(())
    }

    pub fn set_edge_banding(&mut self, edge_banding: EdgeBanding) {
        self.edge_banding = edge_banding;
        self.refresh_description();
    }

    pub fn set_drilling(&mut self, drilling: Drilling) {
        self.drilling = drilling;
        self.refresh_description();
    }

    pub fn set_edge_finish(&mut self, edge_finish: EdgeFinish) {
        self.edge_finish = edge_finish;
        self.refresh_description();
    }

    /// Only the owning list assigns positions
    pub(crate) fn set_line_number(&mut self, line_number: usize) {
        self.line_number = line_number;
        self.refresh_description();
    }

    /// Key used to collapse duplicates inside one extraction batch
    pub(crate) fn dimension_key(&self) -> (u64, u64) {
        (self.length.to_bits(), self.width.to_bits())
    }

    fn refresh_description(&mut self) {
        self.description = render(self);
    }
}

/// Render the canonical description of a record
///
/// Pure function of quantity, length, width, drilling, banding and finish.
pub fn render(record: &MeasurementRecord) -> String {
    format!(
        "Cant: {}, L{}, A{}, P-{}, Bordo-{}, B-{}",
        record.quantity,
        record.length,
        record.width,
        record.drilling.code(),
        record.edge_banding.display_name(),
        record.edge_finish.display_name()
    )
}

impl fmt::Display for MeasurementRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.line_number > 0 {
            write!(f, "{}. ", self.line_number)?;
        }
        write!(f, "{}", self.description)
    }
}

/// Raw values from the manual entry form
#[derive(Debug, Clone, PartialEq)]
pub struct MeasureFields {
    pub length: String,
    pub width: String,
    /// Blank means 1
    pub quantity: String,
    pub drilling: Drilling,
    pub edge_banding: EdgeBanding,
    pub edge_finish: EdgeFinish,
}

impl Default for MeasureFields {
    fn default() -> Self {
        Self {
            length: String::new(),
            width: String::new(),
            quantity: "1".to_string(),
            drilling: Drilling::default(),
            edge_banding: EdgeBanding::default(),
            edge_finish: EdgeFinish::default(),
        }
    }
}

impl MeasureFields {
    /// Shorthand for the common case of just the two dimensions
    pub fn dimensions(length: &str, width: &str) -> Self {
        Self {
            length: length.to_string(),
            width: width.to_string(),
            ..Default::default()
        }
    }

    pub fn with_quantity(mut self, quantity: &str) -> Self {
        self.quantity = quantity.to_string();
        self
    }

    pub fn with_edge_banding(mut self, edge_banding: EdgeBanding) -> Self {
        self.edge_banding = edge_banding;
        self
    }

    pub fn with_drilling(mut self, drilling: Drilling) -> Self {
        self.drilling = drilling;
        self
    }

    pub fn with_edge_finish(mut self, edge_finish: EdgeFinish) -> Self {
        self.edge_finish = edge_finish;
        self
    }

    /// Validate the form values and build a record
    pub fn into_record(self) -> Result<MeasurementRecord, QuoteError> {
        let length = parse_dimension("length", &self.length)?;
        let width = parse_dimension("width", &self.width)?;
        let quantity = parse_quantity(&self.quantity)?;

        Ok(MeasurementRecord::new(quantity, length, width)?
            .with_drilling(self.drilling)
            .with_edge_banding(self.edge_banding)
            .with_edge_finish(self.edge_finish))
    }
}

/// Parse a decimal accepting either `.` or `,` as separator
pub fn parse_decimal(raw: &str) -> Option<f64> {
    raw.trim()
        .replace(',', ".")
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
}

fn check_dimension(field: &'static str, value: f64) -> Result<f64, QuoteError> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(QuoteError::InvalidNumber {
            field,
            value: value.to_string(),
        })
    }
}

fn parse_dimension(field: &'static str, raw: &str) -> Result<f64, QuoteError> {
    if raw.trim().is_empty() {
        return Err(QuoteError::MissingRequiredField(field));
    }
    match parse_decimal(raw) {
        Some(value) if value > 0.0 => Ok(value),
        _ => Err(QuoteError::InvalidNumber {
            field,
            value: raw.trim().to_string(),
        }),
    }
}

fn parse_quantity(raw: &str) -> Result<u32, QuoteError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(1);
    }
    match raw.parse::<u32>() {
        Ok(quantity) if quantity > 0 => Ok(quantity),
        _ => Err(QuoteError::InvalidNumber {
            field: "quantity",
            value: raw.to_string(),
        }),
    }
}
