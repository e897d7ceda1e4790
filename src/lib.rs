//! Diffie-Hellman key agreement with a non-interactive proof of shared-secret correctness.
//!
//! A party holding private exponent `x` (public value `g^x`) derives the shared
//! secret `B^x` with a counterparty's public value `B`, and can later convince
//! anyone that this secret is correct without revealing `x`. The proof is a
//! Chaum-Pedersen proof that `g^x` and `B^x` share the same discrete logarithm,
//! made non-interactive with a Merlin (Fiat-Shamir) transcript.
//!
//! ```rust
//! use verifiable_dh::DiffieHellman;
//!
//! let alice = DiffieHellman::generate().unwrap();
//! let bob = DiffieHellman::generate().unwrap();
//!
//! let secret = alice.shared_secret(&bob.public_component()).unwrap();
//! let certified = alice.prove_shared_secret(&bob.public_component()).unwrap();
//!
//! // An auditor only sees public values and the certified secret.
//! let audited = DiffieHellman::verify_shared_secret(
//!     &alice.public_component(),
//!     &bob.public_component(),
//!     &certified,
//! );
//! assert_eq!(audited, Some(secret));
//! ```

/// CLI configuration loading.
#[cfg(feature = "cli")]
pub mod config;
/// Arithmetic backend trait, modular arithmetic and randomness.
pub mod crypto;
/// Error types.
pub mod error;
/// Concrete group backends.
pub mod groups;
/// Key agreement (key generation, shared secrets, proofs about them).
pub mod key_agreement;
/// Proof of shared-secret correctness.
pub mod protocol;

pub use crypto::{Group, SecureRng};
pub use error::Error;
pub use groups::{GroupParameters, Modp1024};
pub use key_agreement::{DiffieHellman, KeyAgreement};
pub use protocol::{
    verify_certified_secret, verify_claimed_secret, CertifiedSecret, Commitment, Nonce, Proof,
    Prover, Response, Statement, Transcript, Verifier, Witness,
};

/// Result type alias for this crate.
pub type Result<T> = core::result::Result<T, Error>;
