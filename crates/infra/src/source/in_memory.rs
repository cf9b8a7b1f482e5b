use std::sync::RwLock;

use medbill_invoicing::InvoiceRecord;

use super::r#trait::{InvoiceSource, SourceError, ensure_unique};

/// In-memory invoice source.
///
/// Intended for tests/dev and for the built-in sample data.
#[derive(Debug, Default)]
pub struct InMemoryInvoiceSource {
    records: RwLock<Vec<InvoiceRecord>>,
}

impl InMemoryInvoiceSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed with `records` as given (no uniqueness check).
    pub fn with_records(records: Vec<InvoiceRecord>) -> Self {
        Self {
            records: RwLock::new(records),
        }
    }
}

impl InvoiceSource for InMemoryInvoiceSource {
    fn list(&self) -> Result<Vec<InvoiceRecord>, SourceError> {
        let records = self.records.read().map_err(|_| SourceError::Poisoned)?;
        Ok(records.clone())
    }

    fn append(&self, record: InvoiceRecord) -> Result<(), SourceError> {
        let mut records = self.records.write().map_err(|_| SourceError::Poisoned)?;
        ensure_unique(&records, &record)?;
        tracing::debug!(id = %record.id, "appended invoice (in-memory)");
        records.push(record);
        Ok(())
    }
}
