use crate::error::AppError;
use bcrypt::{hash, verify};

/// Lowest bcrypt work factor the service accepts.
pub const MIN_COST: u32 = 10;

/// Salted, versioned one-way password hashing (bcrypt `$2b$`).
#[derive(Debug, Clone, Copy)]
pub struct PasswordHasher {
    cost: u32,
}

impl PasswordHasher {
    /// Creates a hasher with the given work factor, raised to `MIN_COST` if lower.
    pub fn new(cost: u32) -> Self {
        Self {
            cost: cost.max(MIN_COST),
        }
    }

    pub fn cost(&self) -> u32 {
        self.cost
    }

    /// Hashes `password` with a fresh random salt.
    ///
    /// A failure here is an internal error for the calling operation, never a
    /// verification failure.
    pub fn hash(&self, password: &str) -> Result<String, AppError> {
        hash(password, self.cost)
            .map_err(|e| AppError::InternalError(format!("Failed to hash password: {}", e)))
    }

    /// Checks `password` against a stored hash.
    ///
    /// Malformed hashes are treated as a mismatch.
    pub fn verify(&self, hashed_password: &str, password: &str) -> bool {
        match verify(password, hashed_password) {
            Ok(matches) => matches,
            Err(e) => {
                log::warn!("Stored password hash could not be parsed: {}", e);
                false
            }
        }
    }
}

impl Default for PasswordHasher {
    fn default() -> Self {
        Self::new(bcrypt::DEFAULT_COST)
    }
}
