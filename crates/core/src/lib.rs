//! `medbill-core`: domain foundation building blocks.
//!
//! This crate contains **pure domain** primitives (no IO, no storage).

pub mod date;
pub mod entity;
pub mod error;
pub mod id;
pub mod money;
pub mod value_object;

pub use date::{format_date_de, format_opt_date_de, parse_date};
pub use entity::Entity;
pub use error::{DomainError, FieldViolation, ValidationError};
pub use id::InvoiceId;
pub use money::Money;
pub use value_object::ValueObject;
