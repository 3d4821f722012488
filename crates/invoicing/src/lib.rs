//! Invoicing domain module.
//!
//! An [`Invoice`] owns an ordered collection of [`InvoiceLine`]s whose ids are
//! unique within the invoice. Every write is validated before it is applied:
//! invalid input is ignored and leaves the value exactly as it was, while the
//! `try_*` variants report the rejection as a [`DomainError`].
//!
//! Pure, deterministic domain logic (no IO, no storage).
//!
//! [`DomainError`]: invoicekit_core::DomainError

pub mod invoice;
pub mod line;

pub use invoice::{Invoice, parse_date};
pub use line::InvoiceLine;
