//! # Measure List
//!
//! The authoritative, ordered list of measures for one quotation. Every
//! mutating operation finishes by renumbering the whole list, so line numbers
//! are always `1..=N` in order. A failed operation leaves the list untouched.

use log::{debug, info, warn};

use crate::measure_model::{MeasureFields, MeasurementRecord};
use crate::quote_errors::QuoteError;

/// Ordered list of measures with contiguous 1-based line numbers
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MeasureListMerger {
    records: Vec<MeasurementRecord>,
}

impl MeasureListMerger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate manual form values and append them as a new line
    ///
    /// # Errors
    ///
    /// `MissingRequiredField` when length or width is blank, `InvalidNumber`
    /// when a value is not a positive number.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use cotizaciones::measure_list::MeasureListMerger;
    /// use cotizaciones::measure_model::MeasureFields;
    ///
    /// let mut list = MeasureListMerger::new();
    /// let record = list.append_one(MeasureFields::dimensions("120", "60"))?;
    /// assert_eq!(record.line_number(), 1);
    /// # Ok::<(), cotizaciones::quote_errors::QuoteError>(())
    /// ```
    pub fn append_one(&mut self, fields: MeasureFields) -> Result<MeasurementRecord, QuoteError> {
        let record = fields.into_record()?;
        self.records.push(record);
        self.reindex();

        let appended = self.records[self.records.len() - 1].clone();
        info!("Added measure line {}: {}", appended.line_number(), appended.description());
        Ok(appended)
    }

    /// Append an extracted batch in order, without deduplicating against
    /// existing lines
    pub fn append_many(&mut self, records: Vec<MeasurementRecord>) -> usize {
        let count = records.len();
        self.records.extend(records);
        self.reindex();

        info!("Appended {} measures, list now has {} lines", count, self.records.len());
        count
    }

    /// Remove the line at a 1-based position and renumber the rest
    pub fn remove_at(&mut self, position: usize) -> Result<MeasurementRecord, QuoteError> {
        let index = self.index_of(position)?;
        let removed = self.records.remove(index);
        self.reindex();

        info!("Removed measure line {}: {}", position, removed.description());
        Ok(removed)
    }

    /// Replace the values of the line at a 1-based position
    pub fn update_at(
        &mut self,
        position: usize,
        fields: MeasureFields,
    ) -> Result<MeasurementRecord, QuoteError> {
        let index = self.index_of(position)?;
        let record = fields.into_record()?;
        self.records[index] = record;
        self.reindex();

        let updated = self.records[index].clone();
        debug!("Updated measure line {}: {}", position, updated.description());
        Ok(updated)
    }

    /// Drop every line
    pub fn clear(&mut self) {
        info!("Clearing {} measures", self.records.len());
        self.records.clear();
    }

    /// Sum of quantities across all lines
    pub fn total_pieces(&self) -> u64 {
        self.records.iter().map(|r| u64::from(r.quantity())).sum()
    }

    pub fn line_count(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn records(&self) -> &[MeasurementRecord] {
        &self.records
    }

    /// Line at a 1-based position
    pub fn get(&self, position: usize) -> Option<&MeasurementRecord> {
        position.checked_sub(1).and_then(|index| self.records.get(index))
    }

    fn index_of(&self, position: usize) -> Result<usize, QuoteError> {
        if position == 0 || position > self.records.len() {
            warn!(
                "Measure position {} out of range (1..={})",
                position,
                self.records.len()
            );
            return Err(QuoteError::IndexOutOfRange {
                position,
                len: self.records.len(),
            });
        }
        Ok(position - 1)
    }

    fn reindex(&mut self) {
        for (index, record) in self.records.iter_mut().enumerate() {
            record.set_line_number(index + 1);
        }
    }
}
