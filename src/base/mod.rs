//! Base types and error handling.
//!
//! - [`StoreError`](storeerror::StoreError): error kinds for decoding, encoding and persistence
//! - [`context`]: extension traits that attach context to IO and JSON results

pub mod context;
pub mod storeerror;
