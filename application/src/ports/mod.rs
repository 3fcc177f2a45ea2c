//! Port definitions (interfaces for external adapters)
//!
//! Ports define the contracts that infrastructure adapters must implement.

pub mod identity_gateway;
pub mod prediction_gateway;
pub mod progress;
