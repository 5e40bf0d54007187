pub mod r#trait {
    pub use super::trait_::*;
}
#[path = "trait.rs"]
mod trait_;
mod mock;


pub use mock::MockGroupRepository;
pub use r#trait::GroupRepository;
