//! Per-user ordered groups

mod service;

#[cfg(test)]
mod tests;

pub use service::GroupService;
