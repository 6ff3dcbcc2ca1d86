//! Shared test infrastructure for the domain crates.
//!
//! - [`TestDatabase`]: throwaway PostgreSQL container with every migration applied
//! - [`TestDataBuilder`]: deterministic, collision-free names per test
//! - [`assertions`]: small assertion helpers
//!
//! ```rust,no_run
//! use test_utils::{TestDatabase, TestDataBuilder};
//!
//! #[tokio::test]
//! async fn my_postgres_test() {
//!     let db = TestDatabase::new().await;
//!     let data = TestDataBuilder::from_test_name("my_postgres_test");
//!     let depto = db.insert_departamento(&data.name("depto", "a"), None).await;
//! }
//! ```

mod postgres;

pub use postgres::TestDatabase;

/// Deterministic test data derived from the test name.
///
/// Seeded lookup rows already exist in a fresh [`TestDatabase`], so fixtures
/// use names that cannot collide with them or with other tests.
pub struct TestDataBuilder {
    seed: u64,
}

impl TestDataBuilder {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }

    pub fn from_test_name(name: &str) -> Self {
        use std::collections::hash_map::DefaultHasher;
        use std::hash::{Hash, Hasher};

        let mut hasher = DefaultHasher::new();
        name.hash(&mut hasher);
        Self::new(hasher.finish())
    }

    /// `"test-{prefix}-{seed}-{suffix}"`, truncated to fit a 50 character column.
    pub fn name(&self, prefix: &str, suffix: &str) -> String {
        let mut name = format!("test-{}-{}-{}", prefix, self.seed, suffix);
        name.truncate(50);
        name
    }

    /// Colombian style plate (`ABC123`) derived from the seed and `n`.
    pub fn placa(&self, n: u64) -> String {
        let value = self.seed.wrapping_add(n.wrapping_mul(7_919));
        let letters: String = (0..3)
            .map(|i| (b'A' + ((value >> (i * 5)) % 26) as u8) as char)
            .collect();
        format!("{}{:03}", letters, value % 1000)
    }
}

pub mod assertions {
    /// Unwrap `value`, failing the test with `context` when it is `None`.
    pub fn assert_some<T>(value: Option<T>, context: &str) -> T {
        value.unwrap_or_else(|| panic!("{}: expected Some, got None", context))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_is_deterministic() {
        let a = TestDataBuilder::from_test_name("crear_siniestro");
        let b = TestDataBuilder::from_test_name("crear_siniestro");

        assert_eq!(a.name("depto", "x"), b.name("depto", "x"));
        assert_eq!(a.placa(1), b.placa(1));
    }

    #[test]
    fn test_different_tests_get_different_names() {
        let a = TestDataBuilder::from_test_name("uno");
        let b = TestDataBuilder::from_test_name("dos");
        assert_ne!(a.name("depto", "x"), b.name("depto", "x"));
    }

    #[test]
    fn test_placa_shape() {
        let placa = TestDataBuilder::new(42).placa(3);
        assert_eq!(placa.len(), 6);
        assert!(placa[..3].chars().all(|c| c.is_ascii_uppercase()));
        assert!(placa[3..].chars().all(|c| c.is_ascii_digit()));
    }

    #[test]
    fn test_name_fits_column() {
        let name = TestDataBuilder::new(u64::MAX).name("tipo-siniestro-largo", "sufijo");
        assert!(name.len() <= 50);
    }
}
