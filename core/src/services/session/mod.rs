//! Session manager
//!
//! Registration, login, refresh rotation, logout and the per-request
//! `Authenticator` used by the HTTP gate.

mod config;
mod service;


pub use config::SessionConfig;
pub use service::{Authenticator, SessionService};
