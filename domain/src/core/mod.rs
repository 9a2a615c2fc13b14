//! Core domain concepts shared across all subdomains.
//!
//! - [`error::DomainError`]: domain-level errors
//! - [`string`]: text helpers (truncation, stance normalization)

pub mod error;
pub mod string;
