//! Error types for verifiable Diffie-Hellman

/// Main error types for the library.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Group constants are malformed or inconsistent.
    #[error("Invalid group parameters: {0}")]
    InvalidParams(String),

    /// A scalar value (private exponent, response) is invalid or out of range.
    #[error("Invalid scalar: {0}")]
    InvalidScalar(String),

    /// A group element is out of range or not in the prime-order subgroup.
    #[error("Invalid group element: {0}")]
    InvalidGroupElement(String),

    /// A byte encoding (proof, certified secret) is malformed.
    #[error("Malformed encoding: {0}")]
    Encoding(String),

    /// The proof equations did not hold for the given statement.
    #[error("Proof verification failed")]
    VerificationFailed,

    /// The secure random source could not produce entropy.
    #[error("Entropy source unavailable: {0}")]
    Entropy(String),
}

impl Error {
    /// Returns `true` for infrastructure failures, as opposed to bad input or a bad proof.
    pub fn is_infrastructure(&self) -> bool {
        matches!(self, Error::Entropy(_))
    }
}
