use std::path::PathBuf;
use std::sync::Arc;

use thiserror::Error;

use medbill_invoicing::InvoiceRecord;

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("failed to access {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed invoice data in {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Ids and document numbers are unique per record.
    #[error("duplicate invoice: {0}")]
    Duplicate(String),

    #[error("invoice source lock poisoned")]
    Poisoned,
}

/// Provider of invoice records.
pub trait InvoiceSource: Send + Sync {
    /// All records in storage order.
    fn list(&self) -> Result<Vec<InvoiceRecord>, SourceError>;

    /// Store a new record.
    ///
    /// Fails with [`SourceError::Duplicate`] when the id or the document
    /// number is already taken.
    fn append(&self, record: InvoiceRecord) -> Result<(), SourceError>;
}

impl<S> InvoiceSource for Arc<S>
where
    S: InvoiceSource + ?Sized,
{
    fn list(&self) -> Result<Vec<InvoiceRecord>, SourceError> {
        (**self).list()
    }

    fn append(&self, record: InvoiceRecord) -> Result<(), SourceError> {
        (**self).append(record)
    }
}

/// Shared uniqueness check for `append` implementations.
pub(crate) fn ensure_unique(
    existing: &[InvoiceRecord],
    record: &InvoiceRecord,
) -> Result<(), SourceError> {
    if existing.iter().any(|r| r.id == record.id) {
        return Err(SourceError::Duplicate(format!("id {} already exists", record.id)));
    }
    if existing
        .iter()
        .any(|r| r.document_number == record.document_number)
    {
        return Err(SourceError::Duplicate(format!(
            "document number {} already exists",
            record.document_number
        )));
    }
    Ok(())
}
