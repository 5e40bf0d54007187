//! # ato core
//!
//! Domain layer for the ato backend: entities, repository and cache
//! contracts, the session manager and the group service.

pub mod domain;
pub mod errors;
pub mod repositories;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::{AuthResponse, Claims, Group, NewUser, PublicUser, TokenKind, TokenPair, User};
pub use errors::{AuthError, DomainError, DomainResult, TokenError, ValidationError};
pub use repositories::{GroupRepository, MockGroupRepository, MockUserRepository, UserRepository};
pub use services::{
    Authenticator, CacheStore, GroupCache, GroupService, InMemoryCacheStore, RevocationCache,
    SessionConfig, SessionService, TokenBlacklist, TokenService, TokenServiceConfig,
};
