//! HTTP route handlers under `/api/v1`

pub mod auth;
pub mod groups;
