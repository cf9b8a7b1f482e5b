//! Invoice record model.
//!
//! Shape, status rules and creation contract of a medical invoice, kept as
//! deterministic domain logic (no IO, no storage, no clocks).

pub mod form;
pub mod invoice;

pub use form::{InvoiceForm, submit_invoice};
pub use invoice::{InvoiceRecord, InvoiceStatus, Payer, PayerMilestones, SettlementPolicy};
