//! German postal code router.
//!
//! Turns a postal code (PLZ) or a free-text German address into the sales
//! person responsible for that region, together with the federal state
//! ("Land") the region belongs to.

pub mod address;
pub mod cache;
pub mod config;
pub mod domain;
pub mod geocode;
pub mod routing;
pub mod web;
