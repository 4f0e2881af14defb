//! Property-based tests for HKDF key derivation.

use proptest::prelude::*;
use securecrypto::{derive_key_with, Error, HkdfAlgorithm};

fn arbitrary_master_key() -> impl Strategy<Value = Vec<u8>> {
    prop::collection::vec(any::<u8>(), 16..64)
}

fn arbitrary_label() -> impl Strategy<Value = String> {
    "[a-z][a-z0-9.-]{0,31}"
}

fn arbitrary_algorithm() -> impl Strategy<Value = HkdfAlgorithm> {
    prop_oneof![
        Just(HkdfAlgorithm::Sha256),
        Just(HkdfAlgorithm::Sha512),
        Just(HkdfAlgorithm::Sha1),
    ]
}

fn derived(
    master_key: &[u8],
    domain: &str,
    context: &str,
    key_size: usize,
    algorithm: HkdfAlgorithm,
) -> Vec<u8> {
    derive_key_with(master_key, domain, context, key_size, algorithm)
        .expect("derivation should succeed")
        .reveal(|key| key.to_vec())
}

proptest! {
    #[test]
    fn derivation_is_deterministic(
        master_key in arbitrary_master_key(),
        domain in arbitrary_label(),
        context in arbitrary_label(),
        key_size in 1usize..=128,
        algorithm in arbitrary_algorithm(),
    ) {
        let first = derived(&master_key, &domain, &context, key_size, algorithm);
        let second = derived(&master_key, &domain, &context, key_size, algorithm);
        prop_assert_eq!(first, second, "same inputs must produce same output");
    }

    #[test]
    fn output_has_requested_size(
        master_key in arbitrary_master_key(),
        domain in arbitrary_label(),
        context in arbitrary_label(),
        key_size in 1usize..=256,
        algorithm in arbitrary_algorithm(),
    ) {
        let key = derived(&master_key, &domain, &context, key_size, algorithm);
        prop_assert_eq!(key.len(), key_size);
    }

    #[test]
    fn distinct_domains_separate_keys(
        master_key in arbitrary_master_key(),
        domain_a in arbitrary_label(),
        domain_b in arbitrary_label(),
        context in arbitrary_label(),
    ) {
        prop_assume!(domain_a != domain_b);

        let key_a = derived(&master_key, &domain_a, &context, 32, HkdfAlgorithm::Sha256);
        let key_b = derived(&master_key, &domain_b, &context, 32, HkdfAlgorithm::Sha256);
        prop_assert_ne!(key_a, key_b, "domain separation must hold");
    }

    #[test]
    fn distinct_master_keys_separate_keys(
        master_a in arbitrary_master_key(),
        master_b in arbitrary_master_key(),
        domain in arbitrary_label(),
        context in arbitrary_label(),
    ) {
        prop_assume!(master_a != master_b);

        let key_a = derived(&master_a, &domain, &context, 32, HkdfAlgorithm::Sha256);
        let key_b = derived(&master_b, &domain, &context, 32, HkdfAlgorithm::Sha256);
        prop_assert_ne!(key_a, key_b);
    }

    #[test]
    fn short_master_keys_are_always_rejected(
        master_key in prop::collection::vec(any::<u8>(), 0..16),
        domain in arbitrary_label(),
        context in arbitrary_label(),
    ) {
        let result = derive_key_with(&master_key, &domain, &context, 32, HkdfAlgorithm::Sha256);
        let is_invalid_argument = matches!(result, Err(Error::InvalidArgument { .. }));
        prop_assert!(is_invalid_argument);
    }
}
