//! Core domain concepts shared across all subdomains.
//!
//! - [`error::DomainError`]: validation errors raised before any network call

pub mod error;
