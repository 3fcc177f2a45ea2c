//! Credentials exchanged with the identity service.
//!
//! Both types keep their secret out of `Debug` and `Display` output so that
//! they can be passed through `tracing` fields and error messages safely.

mod api_key;
mod token;

pub use api_key::ApiKey;
pub use token::AccessToken;
