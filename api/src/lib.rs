//! # ato API
//!
//! actix-web surface for the ato backend: authentication routes, the
//! bearer-token gate and the group endpoints.

pub mod app;
pub mod dto;
pub mod handlers;
pub mod health;
pub mod middleware;
pub mod routes;

pub use app::{create_app, AppState, Groups, HealthCheck, Sessions};
