//! Secret sources for the JWT signing key.
//!
//! Secrets are drawn from a lowercase base-36 alphabet so the value is safe
//! to embed unquoted in `.env` files and JavaScript string literals alike.

use std::sync::Mutex;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use exforge_core::domain::SecretSource;

const ALPHABET: &[u8] = b"abcdefghijklmnopqrstuvwxyz0123456789";

/// Length of generated secrets.
pub const SECRET_LEN: usize = 32;

fn draw<R: Rng + ?Sized>(rng: &mut R, len: usize) -> String {
    (0..len)
        .map(|_| char::from(ALPHABET[rng.random_range(0..ALPHABET.len())]))
        .collect()
}

/// Draws from the thread-local generator. Used in production.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomSecretSource;

impl SecretSource for RandomSecretSource {
    fn generate(&self) -> String {
        draw(&mut rand::rng(), SECRET_LEN)
    }
}

/// Reproducible draws from a seeded ChaCha stream.
#[derive(Debug)]
pub struct SeededSecretSource {
    rng: Mutex<ChaCha8Rng>,
}

impl SeededSecretSource {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Mutex::new(ChaCha8Rng::seed_from_u64(seed)),
        }
    }
}

impl SecretSource for SeededSecretSource {
    fn generate(&self) -> String {
        // A poisoned lock only means another draw panicked; the stream is intact.
        let mut rng = self.rng.lock().unwrap_or_else(|e| e.into_inner());
        draw(&mut *rng, SECRET_LEN)
    }
}

/// Always yields the same value.
#[derive(Debug, Clone)]
pub struct FixedSecretSource(pub String);

impl SecretSource for FixedSecretSource {
    fn generate(&self) -> String {
        self.0.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn random_secrets_have_expected_shape() {
        let secret = RandomSecretSource.generate();
        assert_eq!(secret.len(), SECRET_LEN);
        assert!(secret.bytes().all(|b| ALPHABET.contains(&b)));
    }

    #[test]
    fn successive_draws_differ() {
        let source = RandomSecretSource;
        assert_ne!(source.generate(), source.generate());

        let seeded = SeededSecretSource::new(7);
        assert_ne!(seeded.generate(), seeded.generate());
    }

    #[test]
    fn seeded_sources_are_reproducible() {
        let a = SeededSecretSource::new(42);
        let b = SeededSecretSource::new(42);
        assert_eq!(a.generate(), b.generate());
        assert_ne!(a.generate(), SeededSecretSource::new(43).generate());
    }

    #[test]
    fn fixed_source_is_constant() {
        let source = FixedSecretSource("abc".into());
        assert_eq!(source.generate(), "abc");
        assert_eq!(source.generate(), "abc");
    }
}
