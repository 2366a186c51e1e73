//! # Quotation Payload
//!
//! This module assembles the quotation that is handed to the downstream
//! submission endpoint: customer and order details plus the measure list,
//! both as joined descriptions and as structured records.
//!
//! Sending the payload is the caller's concern.

use chrono::NaiveDate;
use serde::Serialize;

use crate::measure_model::{EdgeBanding, MeasurementRecord};
use crate::quote_errors::QuoteError;

/// How the order reaches the customer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum Delivery {
    /// Delivered to the workshop address
    #[default]
    #[serde(rename = "domicilio")]
    HomeDelivery,
    /// Picked up at the store
    #[serde(rename = "retiro")]
    StorePickup,
}

/// Order header entered alongside the measures
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QuotationDetails {
    #[serde(rename = "tipoPlancha")]
    pub board_type: String,
    pub color: String,
    #[serde(rename = "vendedora")]
    pub seller: String,
    #[serde(rename = "nombreCliente")]
    pub customer_name: String,
    #[serde(rename = "telefono")]
    pub phone: String,
    #[serde(rename = "direccionTaller")]
    pub workshop_address: String,
    #[serde(rename = "entrega")]
    pub delivery: Delivery,
    #[serde(rename = "fecha")]
    pub date: NaiveDate,
    #[serde(rename = "comentarios")]
    pub comments: String,
    #[serde(rename = "userId")]
    pub user_id: String,
}

impl QuotationDetails {
    /// Check that every required header field is filled in
    pub fn validate(&self) -> Result<(), QuoteError> {
        let required = [
            ("board_type", &self.board_type),
            ("color", &self.color),
            ("seller", &self.seller),
            ("customer_name", &self.customer_name),
            ("phone", &self.phone),
            ("workshop_address", &self.workshop_address),
        ];

        for (field, value) in required {
            if value.trim().is_empty() {
                return Err(QuoteError::MissingRequiredField(field));
            }
        }
        Ok(())
    }
}

/// Full submission body
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QuotationPayload {
    #[serde(flatten)]
    pub details: QuotationDetails,
    /// Descriptions joined by newlines
    #[serde(rename = "medidasTexto")]
    pub measures_text: String,
    #[serde(rename = "medidasArray")]
    pub measures_array: Vec<String>,
    #[serde(rename = "medidasEstructuradas")]
    pub measures: Vec<MeasurementRecord>,
    #[serde(rename = "totalMedidas")]
    pub total_measures: usize,
    #[serde(rename = "totalPiezas")]
    pub total_pieces: u64,
}

impl QuotationPayload {
    /// Build a payload from validated details and the current measure list
    pub fn build(details: QuotationDetails, records: &[MeasurementRecord]) -> Result<Self, QuoteError> {
        details.validate()?;
        if records.is_empty() {
            return Err(QuoteError::EmptyQuotation);
        }

        let measures_array: Vec<String> = records
            .iter()
            .map(|r| r.description().to_string())
            .collect();

        Ok(Self {
            details,
            measures_text: measures_array.join("\n"),
            measures_array,
            measures: records.to_vec(),
            total_measures: records.len(),
            total_pieces: records.iter().map(|r| u64::from(r.quantity())).sum(),
        })
    }
}

/// Body sent once the customer confirms the returned quote
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConfirmationPayload {
    #[serde(rename = "confirmacion")]
    pub confirmation: &'static str,
    #[serde(rename = "userId")]
    pub user_id: String,
}

impl ConfirmationPayload {
    pub fn new(user_id: &str) -> Self {
        Self {
            confirmation: "confirmado",
            user_id: user_id.to_string(),
        }
    }
}

/// Numbered listing of measures for display
pub fn format_measures_for_display(records: &[MeasurementRecord]) -> String {
    let mut output = String::new();
    let total_pieces: u64 = records.iter().map(|r| u64::from(r.quantity())).sum();
    output.push_str(&format!(
        "Medidas: {} ({} piezas)\n",
        records.len(),
        total_pieces
    ));

    for record in records {
        output.push_str(&format!("{}\n", record));
    }
    output
}

/// Piece counts per edge-banding variant, in form order, skipping zeros
pub fn pieces_by_edge_banding(records: &[MeasurementRecord]) -> Vec<(EdgeBanding, u64)> {
    EdgeBanding::ALL
        .iter()
        .map(|banding| {
            let pieces = records
                .iter()
                .filter(|r| r.edge_banding() == *banding)
                .map(|r| u64::from(r.quantity()))
                .sum();
            (*banding, pieces)
        })
        .filter(|(_, pieces)| *pieces > 0)
        .collect()
}
