use merlin::Transcript as MerlinTranscript;
use zeroize::Zeroize;

use super::{Commitment, Statement};
use crate::Group;

/// Protocol label for transcript initialization.
const PROTOCOL_LABEL: &[u8] = b"Verifiable DH shared secret proof v1";

/// Domain separation tag for protocol name.
const PROTOCOL_DST: &[u8] = b"chaum-pedersen-dh";

/// Domain separation tag for challenge generation.
const CHALLENGE_DST: &[u8] = b"challenge";

/// Label for deterministic private exponent derivation from a seed.
const KEY_DERIVATION_LABEL: &[u8] = b"Verifiable DH private exponent v1";

/// Transcript wrapper for Fiat-Shamir transformation.
///
/// Every message is labelled and length-prefixed by Merlin, so two different
/// sequences of inputs can never produce the same challenge.
pub struct Transcript(MerlinTranscript);

impl Transcript {
    /// Creates a new transcript for the shared-secret proof.
    pub fn new() -> Self {
        let mut transcript = MerlinTranscript::new(PROTOCOL_LABEL);
        transcript.append_message(b"protocol", PROTOCOL_DST);
        Self(transcript)
    }

    /// Appends application-specific context to prevent cross-protocol attacks.
    ///
    /// # Security
    ///
    /// Call this before proving or verifying when a proof belongs to a specific
    /// protocol run (session id, round number) so it cannot be replayed in another.
    pub fn append_context(&mut self, context: &[u8]) {
        self.0.append_message(b"context", context);
    }

    /// Appends the group description (name, generator `g`, modulus `p`).
    pub fn append_group(&mut self, name: &str, generator: &[u8], modulus: &[u8]) {
        self.0.append_message(b"group", name.as_bytes());
        self.0.append_message(b"generator", generator);
        self.0.append_message(b"modulus", modulus);
    }

    /// Appends the public statement: both public values and the claimed secret.
    pub fn append_statement(
        &mut self,
        prover_public: &[u8],
        remote_public: &[u8],
        shared_secret: &[u8],
    ) {
        self.0.append_message(b"prover-public", prover_public);
        self.0.append_message(b"remote-public", remote_public);
        self.0.append_message(b"shared-secret", shared_secret);
    }

    /// Appends the commitment values to the transcript.
    pub fn append_commitment(&mut self, commitment1: &[u8], commitment2: &[u8]) {
        self.0.append_message(b"commitment-1", commitment1);
        self.0.append_message(b"commitment-2", commitment2);
    }

    /// Generates a challenge scalar reduced modulo the group order.
    pub fn challenge_scalar<G: Group>(&mut self) -> G::Scalar {
        let mut buf = vec![0u8; G::WIDE_SCALAR_BYTES];
        self.0.challenge_bytes(CHALLENGE_DST, &mut buf);
        G::scalar_from_wide_bytes(&buf)
    }

    /// Binds the group, statement and commitment, then derives the challenge.
    ///
    /// Prover and verifier both go through here so the absorption order cannot drift.
    pub fn challenge_for<G: Group>(
        &mut self,
        statement: &Statement<G>,
        commitment: &Commitment<G>,
    ) -> G::Scalar {
        self.append_group(
            G::name(),
            &G::element_to_bytes(&G::generator()),
            &G::modulus_bytes(),
        );
        self.append_statement(
            &G::element_to_bytes(statement.prover_public()),
            &G::element_to_bytes(statement.remote_public()),
            &G::element_to_bytes(statement.shared_secret()),
        );
        self.append_commitment(
            &G::element_to_bytes(commitment.commitment1()),
            &G::element_to_bytes(commitment.commitment2()),
        );
        self.challenge_scalar::<G>()
    }
}

impl Default for Transcript {
    fn default() -> Self {
        Self::new()
    }
}

/// Deterministically maps seed bytes to a non-zero scalar.
///
/// Draws wide output from a seeded transcript and retries on zero, so the
/// result is uniform over `[1, q - 1]` up to negligible bias.
pub(crate) fn derive_scalar<G: Group>(seed: &[u8]) -> G::Scalar {
    let mut transcript = MerlinTranscript::new(KEY_DERIVATION_LABEL);
    transcript.append_message(b"group", G::name().as_bytes());
    transcript.append_message(b"seed", seed);

    let mut buf = vec![0u8; G::WIDE_SCALAR_BYTES];
    loop {
        transcript.challenge_bytes(b"private-exponent", &mut buf);
        let scalar = G::scalar_from_wide_bytes(&buf);
        buf.zeroize();

        if !G::scalar_is_zero(&scalar) {
            return scalar;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Modp1024;

    #[test]
    fn challenge_scalar_deterministic() {
        let mut t1 = Transcript::new();
        t1.append_group("test", b"g", b"p");
        t1.append_statement(b"y", b"b", b"s");
        t1.append_commitment(b"c1", b"c2");
        let c1 = t1.challenge_scalar::<Modp1024>();

        let mut t2 = Transcript::new();
        t2.append_group("test", b"g", b"p");
        t2.append_statement(b"y", b"b", b"s");
        t2.append_commitment(b"c1", b"c2");
        let c2 = t2.challenge_scalar::<Modp1024>();

        assert_eq!(c1, c2);
    }

    #[test]
    fn challenge_scalar_different_inputs() {
        let mut t1 = Transcript::new();
        t1.append_commitment(b"c1", b"c2");
        let c1 = t1.challenge_scalar::<Modp1024>();

        let mut t2 = Transcript::new();
        t2.append_commitment(b"c1_different", b"c2");
        let c2 = t2.challenge_scalar::<Modp1024>();

        assert_ne!(c1, c2);
    }

    #[test]
    fn message_boundaries_are_unambiguous() {
        let mut t1 = Transcript::new();
        t1.append_commitment(b"ab", b"c");
        let c1 = t1.challenge_scalar::<Modp1024>();

        let mut t2 = Transcript::new();
        t2.append_commitment(b"a", b"bc");
        let c2 = t2.challenge_scalar::<Modp1024>();

        assert_ne!(c1, c2);
    }

    #[test]
    fn context_changes_challenge() {
        let mut t1 = Transcript::new();
        t1.append_context(b"round-1");
        let c1 = t1.challenge_scalar::<Modp1024>();

        let mut t2 = Transcript::new();
        t2.append_context(b"round-2");
        let c2 = t2.challenge_scalar::<Modp1024>();

        assert_ne!(c1, c2);
    }

    #[test]
    fn derived_scalar_depends_only_on_seed() {
        let a = derive_scalar::<Modp1024>(b"seed");
        let b = derive_scalar::<Modp1024>(b"seed");
        let c = derive_scalar::<Modp1024>(b"seed!");

        assert_eq!(a, b);
        assert_ne!(a, c);
        assert!(!Modp1024::scalar_is_zero(&a));
    }
}
