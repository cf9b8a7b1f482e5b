//! Invoice data-provider boundary.
//!
//! Aggregation and filtering only ever see a `Vec<InvoiceRecord>`; where the
//! records come from is decided here.

pub mod in_memory;
pub mod json_file;
pub mod r#trait;

pub use in_memory::InMemoryInvoiceSource;
pub use json_file::JsonFileInvoiceSource;
pub use r#trait::{InvoiceSource, SourceError};
