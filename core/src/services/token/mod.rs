//! Token service module for JWT management
//!
//! - Issuing access/refresh pairs
//! - Verifying signature and expiry
//! - Token fingerprints for revocation keys and logs

mod config;
mod service;

#[cfg(test)]
mod tests;

pub use config::TokenServiceConfig;
pub use service::{hash_token, TokenService};
