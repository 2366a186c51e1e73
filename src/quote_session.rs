//! Quotation session shared by the asynchronous input sources.
//!
//! Dictation, camera, file upload and manual entry each finish on their own
//! schedule. They never touch the list directly: each hands a finished batch
//! to the session, which applies it under a single lock.

use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use crate::extraction_config::ExtractionMode;
use crate::measure_extractor::MeasureExtractor;
use crate::measure_list::MeasureListMerger;
use crate::measure_model::{MeasureFields, MeasurementRecord};
use crate::quotation::{QuotationDetails, QuotationPayload};
use crate::quote_errors::QuoteError;

/// Cloneable handle to one quotation in progress
#[derive(Debug, Clone)]
pub struct QuoteSession {
    list: Arc<Mutex<MeasureListMerger>>,
    extractor: Arc<MeasureExtractor>,
}

impl QuoteSession {
    pub fn new(extractor: MeasureExtractor) -> Self {
        Self {
            list: Arc::new(Mutex::new(MeasureListMerger::new())),
            extractor: Arc::new(extractor),
        }
    }

    /// Extract measures from transcribed or captioned text and append them
    ///
    /// Extraction runs before the lock is taken; only the append is serialized.
    pub async fn ingest(&self, text: &str, mode: ExtractionMode) -> usize {
        let records = self.extractor.extract(text, mode);
        if records.is_empty() {
            info!(?mode, "No measures detected in text");
            return 0;
        }
        self.append_batch(records).await
    }

    /// Append an already-extracted batch as one unit
    pub async fn append_batch(&self, records: Vec<MeasurementRecord>) -> usize {
        let mut list = self.list.lock().await;
        let appended = list.append_many(records);
        info!(appended, lines = list.line_count(), "Appended measure batch");
        appended
    }

    pub async fn add_measure(&self, fields: MeasureFields) -> Result<MeasurementRecord, QuoteError> {
        let mut list = self.list.lock().await;
        list.append_one(fields).map_err(|e| {
            debug!(error = %e, "Rejected manual measure");
            e
        })
    }

    pub async fn remove_measure(&self, position: usize) -> Result<MeasurementRecord, QuoteError> {
        let mut list = self.list.lock().await;
        list.remove_at(position).map_err(|e| {
            warn!(error = %e, "Stale measure position");
            e
        })
    }

    pub async fn update_measure(
        &self,
        position: usize,
        fields: MeasureFields,
    ) -> Result<MeasurementRecord, QuoteError> {
        let mut list = self.list.lock().await;
        list.update_at(position, fields)
    }

    /// Copy of the current list
    pub async fn snapshot(&self) -> Vec<MeasurementRecord> {
        self.list.lock().await.records().to_vec()
    }

    pub async fn line_count(&self) -> usize {
        self.list.lock().await.line_count()
    }

    pub async fn total_pieces(&self) -> u64 {
        self.list.lock().await.total_pieces()
    }

    /// Build the submission payload from the current list
    pub async fn payload(&self, details: QuotationDetails) -> Result<QuotationPayload, QuoteError> {
        let list = self.list.lock().await;
        QuotationPayload::build(details, list.records())
    }

    /// Start over after a successful submission
    pub async fn reset(&self) {
        self.list.lock().await.clear();
    }
}

impl Default for QuoteSession {
    fn default() -> Self {
        Self::new(MeasureExtractor::default())
    }
}
