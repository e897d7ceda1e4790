use proptest::prelude::*;
use verifiable_dh::{verify_claimed_secret, DiffieHellman, Group, Modp1024, SecureRng};

// Every case runs several 1024-bit exponentiations.
proptest! {
    #![proptest_config(ProptestConfig::with_cases(16))]

    #[test]
    fn shared_secret_agrees_for_any_seeds(
        seed_a in proptest::collection::vec(any::<u8>(), 1..64),
        seed_b in proptest::collection::vec(any::<u8>(), 1..64),
    ) {
        let alice = DiffieHellman::from_seed(&seed_a);
        let bob = DiffieHellman::from_seed(&seed_b);

        let ab = alice.shared_secret(&bob.public_component()).unwrap();
        let ba = bob.shared_secret(&alice.public_component()).unwrap();

        prop_assert_eq!(ab.len(), Modp1024::ELEMENT_BYTES);
        prop_assert_eq!(ab, ba);
    }

    #[test]
    fn honest_proof_verifies_for_any_seeds(
        seed_a in proptest::collection::vec(any::<u8>(), 1..64),
        seed_b in proptest::collection::vec(any::<u8>(), 1..64),
    ) {
        let alice = DiffieHellman::from_seed(&seed_a);
        let bob = DiffieHellman::from_seed(&seed_b);
        let remote = bob.public_component();

        let prover = alice.prover(&remote).unwrap();
        let proof = prover.prove(&mut SecureRng::new()).unwrap().to_bytes();
        let secret = alice.shared_secret(&remote).unwrap();

        let verified = verify_claimed_secret::<Modp1024>(
            &alice.public_component(),
            &remote,
            &secret,
            &proof,
        );
        prop_assert_eq!(verified, Some(secret));
    }

    #[test]
    fn proof_does_not_transfer_to_another_secret(
        seed_a in proptest::collection::vec(any::<u8>(), 1..64),
        seed_b in proptest::collection::vec(any::<u8>(), 1..64),
        seed_c in proptest::collection::vec(any::<u8>(), 1..64),
    ) {
        let alice = DiffieHellman::from_seed(&seed_a);
        let bob = DiffieHellman::from_seed(&seed_b);
        let carol = DiffieHellman::from_seed(&seed_c);
        let remote = bob.public_component();

        let proof = alice
            .prover(&remote)
            .unwrap()
            .prove(&mut SecureRng::new())
            .unwrap()
            .to_bytes();
        let wrong = alice.shared_secret(&carol.public_component()).unwrap();
        prop_assume!(wrong != alice.shared_secret(&remote).unwrap());

        let verified = verify_claimed_secret::<Modp1024>(
            &alice.public_component(),
            &remote,
            &wrong,
            &proof,
        );
        prop_assert_eq!(verified, None);
    }

    #[test]
    fn seed_derivation_is_deterministic(seed in proptest::collection::vec(any::<u8>(), 1..64)) {
        let a = DiffieHellman::new(&seed, true).unwrap();
        let b = DiffieHellman::new(&seed, true).unwrap();

        prop_assert_eq!(a.private_component(), b.private_component());
        prop_assert_eq!(a.public_component(), b.public_component());
    }

    #[test]
    fn private_component_restores_key(seed in proptest::collection::vec(any::<u8>(), 1..64)) {
        let key = DiffieHellman::from_seed(&seed);
        let private = key.private_component();
        prop_assert_eq!(private.len(), Modp1024::SCALAR_BYTES);

        let restored = DiffieHellman::new(&private, false).unwrap();
        prop_assert_eq!(restored.public_component(), key.public_component());
    }
}

proptest! {
    #[test]
    fn arbitrary_proof_bytes_never_verify(bytes in proptest::collection::vec(any::<u8>(), 0..400)) {
        let alice = DiffieHellman::from_seed(b"alice");
        let bob = DiffieHellman::from_seed(b"bob");
        let remote = bob.public_component();
        let secret = alice.shared_secret(&remote).unwrap();

        let verified = verify_claimed_secret::<Modp1024>(
            &alice.public_component(),
            &remote,
            &secret,
            &bytes,
        );
        prop_assert_eq!(verified, None);
    }
}
