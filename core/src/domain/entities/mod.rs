//! Domain entities representing core business objects.

pub mod group;
pub mod token;
pub mod user;


// Re-export commonly used types
pub use group::Group;
pub use token::{Claims, TokenKind, TokenPair};
pub use user::{NewUser, PublicUser, User};
