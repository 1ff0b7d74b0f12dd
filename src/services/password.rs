//! Hash de contraseñas con bcrypt
//!
//! Cada llamada a `hash` usa una sal aleatoria: dos hashes de la misma
//! contraseña nunca coinciden, pero ambos verifican.

use crate::utils::errors::{AppError, AppResult};

#[derive(Debug, Clone, Copy)]
pub struct PasswordHasher {
    cost: u32,
}

impl Default for PasswordHasher {
    fn default() -> Self {
        Self::new(bcrypt::DEFAULT_COST)
    }
}

impl PasswordHasher {
    pub fn new(cost: u32) -> Self {
        Self { cost }
    }

    pub fn hash(&self, password: &str) -> AppResult<String> {
        bcrypt::hash(password, self.cost)
            .map_err(|e| AppError::Hash(format!("Error hashing password: {}", e)))
    }

    /// Un hash corrupto se trata como credencial inválida
    pub fn verify(&self, password: &str, hashed: &str) -> bool {
        bcrypt::verify(password, hashed).unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hasher() -> PasswordHasher {
        PasswordHasher::new(4)
    }

    #[test]
    fn test_hash_is_salted() {
        let a = hasher().hash("segredo123").unwrap();
        let b = hasher().hash("segredo123").unwrap();
        assert_ne!(a, b);
        assert_ne!(a, "segredo123");
    }

    #[test]
    fn test_verify() {
        let hashed = hasher().hash("segredo123").unwrap();
        assert!(hasher().verify("segredo123", &hashed));
        assert!(!hasher().verify("outra-senha", &hashed));
        assert!(!hasher().verify("segredo123", "not-a-bcrypt-hash"));
    }

    #[test]
    fn test_invalid_cost_is_an_error() {
        let result = PasswordHasher::new(1).hash("segredo123");
        assert!(matches!(result, Err(AppError::Hash(_))));
    }
}
