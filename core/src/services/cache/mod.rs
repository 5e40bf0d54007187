//! Cache capabilities and their namespaces
//!
//! `TokenBlacklist` owns `blacklist:*` and `GroupCache` owns `groups:*`. They
//! share a `CacheStore` but neither can build a key in the other's namespace.

mod blacklist;
mod groups;
mod memory;
mod traits;


pub use blacklist::{TokenBlacklist, BLACKLIST_PREFIX};
pub use groups::{GroupCache, DEFAULT_GROUP_TTL, GROUPS_PREFIX};
pub use memory::InMemoryCacheStore;
pub use traits::{CacheStore, RevocationCache};
