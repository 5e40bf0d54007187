//! Configuration for the session service

/// Configuration for the session service
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// bcrypt work factor for new password hashes
    pub bcrypt_cost: u32,
    /// Minimum password length accepted at registration
    pub min_password_length: usize,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            bcrypt_cost: bcrypt::DEFAULT_COST,
            min_password_length: 8,
        }
    }
}
