//! CORS middleware built from [`CorsConfig`]

use actix_cors::Cors;

use ato_shared::CorsConfig;

/// Creates the CORS middleware for the configured browser origins.
///
/// Credentials are allowed, so every origin is listed explicitly.
pub fn create_cors(config: &CorsConfig) -> Cors {
    tracing::debug!(origins = ?config.allowed_origins, "configuring CORS");

    let mut cors = Cors::default()
        .allowed_methods(config.allowed_methods.iter().map(String::as_str))
        .allowed_headers(config.allowed_headers.iter().map(String::as_str))
        .expose_headers(config.exposed_headers.iter().map(String::as_str))
        .max_age(config.max_age);

    for origin in &config.allowed_origins {
        cors = cors.allowed_origin(origin);
    }
    if config.allow_credentials {
        cors = cors.supports_credentials();
    }
    cors
}
