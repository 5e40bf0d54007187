//! Business services containing domain logic and use cases.

pub mod cache;
pub mod group;
pub mod password;
pub mod session;
pub mod token;

// Re-export commonly used types
pub use cache::{CacheStore, GroupCache, InMemoryCacheStore, RevocationCache, TokenBlacklist};
pub use group::GroupService;
pub use session::{Authenticator, SessionConfig, SessionService};
pub use token::{TokenService, TokenServiceConfig};
