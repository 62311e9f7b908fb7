//! Application secret key generation

use std::fmt;

use rand::rngs::OsRng;
use rand::seq::SliceRandom;
use rand::{CryptoRng, Rng};

/// Length of every generated key
pub const SECRET_KEY_LENGTH: usize = 100;

/// Digits, ASCII letters and ASCII punctuation
pub const SECRET_KEY_ALPHABET: &[u8] =
    b"0123456789abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ!\"#$%&'()*+,-./:;<=>?@[\\]^_`{|}~";

/// Random secret written to the remote key file
///
/// `Debug` never shows the value.
#[derive(Clone, PartialEq, Eq)]
pub struct SecretKey(String);

impl SecretKey {
    /// Generate a key from the operating system's CSPRNG
    pub fn generate() -> Self {
        Self::generate_with(&mut OsRng)
    }

    /// Generate a key from a caller-provided cryptographic RNG
    pub fn generate_with<R: Rng + CryptoRng + ?Sized>(rng: &mut R) -> Self {
        let key = (0..SECRET_KEY_LENGTH)
            .map(|_| {
                let byte = SECRET_KEY_ALPHABET
                    .choose(rng)
                    .copied()
                    .unwrap_or(b'0');
                char::from(byte)
            })
            .collect();
        Self(key)
    }

    pub fn expose(&self) -> &str {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Debug for SecretKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SecretKey(<{} chars>)", self.0.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn alphabet_is_digits_letters_punctuation() {
        assert_eq!(SECRET_KEY_ALPHABET.len(), 10 + 52 + 32);
        assert!(SECRET_KEY_ALPHABET
            .iter()
            .all(|b| b.is_ascii_alphanumeric() || b.is_ascii_punctuation()));
    }

    #[test]
    fn generated_key_has_fixed_length() {
        let key = SecretKey::generate();
        assert_eq!(key.len(), SECRET_KEY_LENGTH);
        assert!(key
            .expose()
            .bytes()
            .all(|b| SECRET_KEY_ALPHABET.contains(&b)));
    }

    #[test]
    fn successive_keys_differ() {
        assert_ne!(SecretKey::generate(), SecretKey::generate());
    }

    #[test]
    fn seeded_rng_is_deterministic() {
        let a = SecretKey::generate_with(&mut StdRng::seed_from_u64(7));
        let b = SecretKey::generate_with(&mut StdRng::seed_from_u64(7));
        assert_eq!(a, b);
    }

    #[test]
    fn debug_hides_value() {
        let key = SecretKey::generate();
        let rendered = format!("{:?}", key);
        assert_eq!(rendered, "SecretKey(<100 chars>)");
    }
}
