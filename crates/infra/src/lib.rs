//! Infrastructure layer: invoice data providers.

pub mod sample;
pub mod source;

pub use sample::sample_invoices;
pub use source::{InMemoryInvoiceSource, InvoiceSource, JsonFileInvoiceSource, SourceError};
