//! Basic usage of verifiable Diffie-Hellman key agreement.
//!
//! Alice and Bob derive a shared secret, Alice proves to an auditor that the
//! secret she reports is the one she actually derived, and the auditor checks
//! the proof using only public values.

use verifiable_dh::{
    verify_claimed_secret, DiffieHellman, Group, Modp1024, SecureRng, Transcript, Verifier,
};

fn main() {
    println!("Verifiable Diffie-Hellman: Basic Example\n");

    println!("Step 1: Both parties generate key pairs");
    let alice = DiffieHellman::generate().expect("Key generation should succeed");
    let bob = DiffieHellman::generate().expect("Key generation should succeed");
    let alice_public = alice.public_component();
    let bob_public = bob.public_component();
    println!("  Group: {}", Modp1024::name());
    println!("  Public values are {} bytes each\n", alice_public.len());

    println!("Step 2: Each side derives the shared secret");
    let s_ab = alice
        .shared_secret(&bob_public)
        .expect("Bob's key is valid");
    let s_ba = bob
        .shared_secret(&alice_public)
        .expect("Alice's key is valid");
    assert_eq!(s_ab, s_ba);
    println!("  Secrets agree: {}...\n", hex::encode(&s_ab[..8]));

    println!("Step 3: Alice proves her shared secret");
    let mut rng = SecureRng::new();
    let prover = alice.prover(&bob_public).expect("Bob's key is valid");
    let proof = prover
        .prove(&mut rng)
        .expect("Proof generation should succeed");
    let proof_bytes = proof.to_bytes();
    println!("  Proof size: {} bytes\n", proof_bytes.len());

    println!("Step 4: The auditor verifies with public values only");
    match verify_claimed_secret::<Modp1024>(&alice_public, &bob_public, &s_ab, &proof_bytes) {
        Some(_) => println!("  Proof is VALID"),
        None => println!("  Proof is INVALID"),
    }

    println!("\nStep 5: A proof bound to one session fails in another");
    let mut session = Transcript::new();
    session.append_context(b"session-1");
    let bound = prover
        .prove_with_transcript(&mut rng, &mut session)
        .expect("Proof generation should succeed");

    let mut replay = Transcript::new();
    replay.append_context(b"session-2");
    let verifier = Verifier::new(prover.statement().clone());
    match verifier.verify_with_transcript(&bound, &mut replay) {
        Ok(()) => println!("  Replay ACCEPTED (unexpected)"),
        Err(e) => println!("  Replay rejected: {e}"),
    }

    println!("\nStep 6: A lying prover is caught");
    let carol = DiffieHellman::generate().expect("Key generation should succeed");
    let wrong = alice
        .shared_secret(&carol.public_component())
        .expect("Carol's key is valid");
    let liar = verify_claimed_secret::<Modp1024>(&alice_public, &bob_public, &wrong, &proof_bytes);
    println!("  Wrong secret accepted: {}", liar.is_some());
}
