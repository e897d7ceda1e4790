use core::fmt;

use rand_core::CryptoRngCore;
use tracing::debug;
use zeroize::{Zeroize, ZeroizeOnDrop};

use super::{CertifiedSecret, Commitment, Proof, Response, Statement, Transcript, Witness};
use crate::{Error, Group, Result};

/// Prover for the shared-secret correctness proof.
///
/// Proves that `shared_secret = remote_public^x` for the same `x` with
/// `prover_public = g^x`, without revealing `x` (a Chaum-Pedersen proof of
/// equal discrete logarithms made non-interactive with Fiat-Shamir).
///
/// # Security
///
/// - Every proof draws a fresh nonce from the supplied RNG; nonces are never cached
/// - Bind proofs to a protocol run with [`Transcript::append_context`] to prevent replay
pub struct Prover<G: Group> {
    witness: Witness<G>,
    statement: Statement<G>,
}

impl<G: Group> Prover<G> {
    /// Creates a prover for the secret shared with `remote_public`.
    ///
    /// The statement is computed from the witness. `remote_public` must be a
    /// non-identity subgroup element.
    pub fn new(witness: Witness<G>, remote_public: G::Element) -> Result<Self> {
        G::validate_element(&remote_public)?;
        if G::is_identity(&remote_public) {
            return Err(Error::InvalidGroupElement(
                "Remote public value cannot be the identity".to_string(),
            ));
        }

        let statement = Statement::from_witness(&witness, remote_public);
        Ok(Self { witness, statement })
    }

    /// Returns the public statement.
    pub fn statement(&self) -> &Statement<G> {
        &self.statement
    }

    /// Generates a non-interactive proof using Fiat-Shamir.
    pub fn prove<R: CryptoRngCore>(&self, rng: &mut R) -> Result<Proof<G>> {
        let mut transcript = Transcript::new();
        self.prove_with_transcript(rng, &mut transcript)
    }

    /// Generates a proof using a custom transcript.
    ///
    /// Allows the caller to add additional context to the transcript.
    pub fn prove_with_transcript<R: CryptoRngCore>(
        &self,
        rng: &mut R,
        transcript: &mut Transcript,
    ) -> Result<Proof<G>> {
        let (commitment, nonce) = self.commit(rng)?;
        let challenge = transcript.challenge_for(&self.statement, &commitment);
        let response = self.respond(&nonce, &challenge);

        debug!(group = G::name(), "generated shared secret proof");
        Ok(Proof::new(commitment, response))
    }

    /// Generates a proof and bundles it with the shared secret it certifies.
    pub fn certify<R: CryptoRngCore>(&self, rng: &mut R) -> Result<CertifiedSecret<G>> {
        let proof = self.prove(rng)?;
        Ok(CertifiedSecret::new(
            self.statement.shared_secret().clone(),
            proof,
        ))
    }

    /// Interactive protocol: generates the commitment (first message).
    ///
    /// Returns the commitment and the secret nonce (must be kept secret).
    pub fn commit<R: CryptoRngCore>(&self, rng: &mut R) -> Result<(Commitment<G>, Nonce<G>)> {
        let r = G::random_scalar(rng)?;
        let commitment1 = G::exp(&G::generator(), &r);
        let commitment2 = G::exp(self.statement.remote_public(), &r);

        Ok((Commitment::new(commitment1, commitment2), Nonce::new(r)))
    }

    /// Interactive protocol: generates the response `r + c * x (mod q)`.
    pub fn respond(&self, nonce: &Nonce<G>, challenge: &G::Scalar) -> Response<G> {
        let cx = G::scalar_mul(challenge, self.witness.secret());
        Response::new(G::scalar_add(nonce.r(), &cx))
    }
}

/// Secret nonce used in the commitment phase.
///
/// Zeroized when dropped.
pub struct Nonce<G: Group> {
    r: G::Scalar,
}

impl<G: Group> Nonce<G> {
    /// Creates a new nonce from a scalar.
    pub fn new(r: G::Scalar) -> Self {
        Self { r }
    }

    /// Returns a reference to the nonce scalar.
    pub fn r(&self) -> &G::Scalar {
        &self.r
    }
}

impl<G: Group> Drop for Nonce<G> {
    fn drop(&mut self) {
        self.r.zeroize();
    }
}

impl<G: Group> ZeroizeOnDrop for Nonce<G> {}

impl<G: Group> fmt::Debug for Nonce<G> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Nonce(<redacted>)")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Modp1024, SecureRng};

    fn prover(rng: &mut SecureRng) -> Prover<Modp1024> {
        let x = Modp1024::random_scalar(rng).unwrap();
        let b = Modp1024::random_scalar(rng).unwrap();
        let remote = Modp1024::exp(&Modp1024::generator(), &b);
        Prover::new(Witness::new(x).unwrap(), remote).unwrap()
    }

    #[test]
    fn prover_rejects_identity_remote() {
        let mut rng = SecureRng::new();
        let x = Modp1024::random_scalar(&mut rng).unwrap();
        let result = Prover::new(Witness::<Modp1024>::new(x).unwrap(), Modp1024::identity());
        assert!(result.is_err());
    }

    #[test]
    fn prove_generates_versioned_proof() {
        let mut rng = SecureRng::new();
        let proof = prover(&mut rng).prove(&mut rng).unwrap();
        assert_eq!(proof.version(), 1);
    }

    #[test]
    fn nonces_are_fresh_per_proof() {
        let mut rng = SecureRng::new();
        let prover = prover(&mut rng);
        let p1 = prover.prove(&mut rng).unwrap();
        let p2 = prover.prove(&mut rng).unwrap();
        assert_ne!(p1.commitment(), p2.commitment());
    }

    #[test]
    fn interactive_protocol() {
        let mut rng = SecureRng::new();
        let prover = prover(&mut rng);
        let (commitment, nonce) = prover.commit(&mut rng).unwrap();
        let challenge = Modp1024::random_scalar(&mut rng).unwrap();
        let response = prover.respond(&nonce, &challenge);

        // g^s = commitment1 * y^c
        let lhs = Modp1024::exp(&Modp1024::generator(), response.s());
        let rhs = Modp1024::element_mul(
            commitment.commitment1(),
            &Modp1024::exp(prover.statement().prover_public(), &challenge),
        );
        assert_eq!(lhs, rhs);
    }

    #[test]
    fn certify_carries_the_shared_secret() {
        let mut rng = SecureRng::new();
        let prover = prover(&mut rng);
        let certified = prover.certify(&mut rng).unwrap();
        let expected = prover.statement().shared_secret();
        assert_eq!(certified.shared_secret(), expected);
    }
}
