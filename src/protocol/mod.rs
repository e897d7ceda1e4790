/// Core protocol types (witness, statement, commitment, response, proof).
pub mod gadgets;
/// Prover implementation for generating proofs.
pub mod prover;
/// Merlin transcript wrapper for Fiat-Shamir transformation.
pub mod transcript;
/// Verifier implementation for validating proofs.
pub mod verifier;

pub use gadgets::{CertifiedSecret, Commitment, Proof, Response, Statement, Witness};
pub use prover::{Nonce, Prover};
pub use transcript::Transcript;
pub use verifier::{verify_certified_secret, verify_claimed_secret, Verifier};
