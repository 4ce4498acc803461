//! Domain types for the PLZ router.
//!
//! This module contains the core value types shared by the address resolver
//! and the assignment router. Types enforce their invariants at construction
//! time, so code that receives them can trust their validity.

mod error;
mod person;
mod postal_code;
mod resolution;

pub use error::TableError;
pub use person::{Person, PersonContact};
pub use postal_code::{InvalidPostalCode, PostalCode};
pub use resolution::{Confidence, Resolution, Source};
