//! Property tests for secret key generation.

use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

use stagehand::domain::value_objects::{SecretKey, SECRET_KEY_ALPHABET, SECRET_KEY_LENGTH};

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 96,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: every key is 100 characters drawn from the key alphabet.
    #[test]
    fn property_key_shape(seed in any::<u64>()) {
        let key = SecretKey::generate_with(&mut StdRng::seed_from_u64(seed));

        prop_assert_eq!(key.len(), SECRET_KEY_LENGTH);
        prop_assert!(key.expose().bytes().all(|b| SECRET_KEY_ALPHABET.contains(&b)));
    }

    /// PROPERTY: the same seed yields the same key; different seeds do not collide.
    #[test]
    fn property_key_follows_rng(a in any::<u64>(), b in any::<u64>()) {
        prop_assume!(a != b);
        let first = SecretKey::generate_with(&mut StdRng::seed_from_u64(a));
        let again = SecretKey::generate_with(&mut StdRng::seed_from_u64(a));
        let other = SecretKey::generate_with(&mut StdRng::seed_from_u64(b));

        prop_assert_eq!(first.expose(), again.expose());
        prop_assert_ne!(first.expose(), other.expose());
    }
}

#[test]
fn successive_keys_differ() {
    let first = SecretKey::generate();
    let second = SecretKey::generate();
    assert_ne!(first.expose(), second.expose());
}
