use subtle::ConstantTimeEq;
use tracing::debug;

use super::{CertifiedSecret, Proof, Statement, Transcript};
use crate::{Error, Group, Result};

/// Verifier for the shared-secret correctness proof.
///
/// Needs only public values: both public keys and the claimed shared secret.
pub struct Verifier<G: Group> {
    statement: Statement<G>,
}

impl<G: Group> Verifier<G> {
    /// Creates a new verifier for the given statement.
    pub fn new(statement: Statement<G>) -> Self {
        Self { statement }
    }

    /// Verifies a non-interactive proof.
    ///
    /// Returns `Ok(())` if the proof is valid, `Err` otherwise.
    pub fn verify(&self, proof: &Proof<G>) -> Result<()> {
        let mut transcript = Transcript::new();
        self.verify_with_transcript(proof, &mut transcript)
    }

    /// Verifies a proof using a custom transcript.
    ///
    /// The transcript must carry the same context that was used during proof generation.
    pub fn verify_with_transcript(
        &self,
        proof: &Proof<G>,
        transcript: &mut Transcript,
    ) -> Result<()> {
        self.statement.validate()?;

        let challenge = transcript.challenge_for(&self.statement, proof.commitment());
        self.verify_response(&challenge, proof)
    }

    /// Interactive protocol: verifies the response against a known challenge.
    ///
    /// Checks that `g^s = commitment1 * prover_public^c` and
    /// `remote_public^s = commitment2 * shared_secret^c`.
    pub fn verify_response(&self, challenge: &G::Scalar, proof: &Proof<G>) -> Result<()> {
        let s = proof.response().s();
        let commitment = proof.commitment();

        let lhs1 = G::exp(&G::generator(), s);
        let rhs1 = G::element_mul(
            commitment.commitment1(),
            &G::exp(self.statement.prover_public(), challenge),
        );

        let lhs2 = G::exp(self.statement.remote_public(), s);
        let rhs2 = G::element_mul(
            commitment.commitment2(),
            &G::exp(self.statement.shared_secret(), challenge),
        );

        if !bool::from(lhs1.ct_eq(&rhs1) & lhs2.ct_eq(&rhs2)) {
            return Err(Error::VerificationFailed);
        }

        Ok(())
    }
}

/// Checks a proof that `claimed_secret` is shared by `prover_public` and `remote_public`.
///
/// Total over its input: malformed encodings, out-of-range values and failing
/// equations all yield `None`. On success returns the canonical fixed-width
/// encoding of the claimed secret.
pub fn verify_claimed_secret<G: Group>(
    prover_public: &[u8],
    remote_public: &[u8],
    claimed_secret: &[u8],
    proof: &[u8],
) -> Option<Vec<u8>> {
    let result = check_claimed_secret::<G>(prover_public, remote_public, claimed_secret, proof);
    accept_or_log::<G>(result)
}

/// Checks a [`CertifiedSecret`] encoding and returns the secret it carries.
///
/// The three-argument form: the claimed secret travels inside the bundle.
pub fn verify_certified_secret<G: Group>(
    prover_public: &[u8],
    remote_public: &[u8],
    certified: &[u8],
) -> Option<Vec<u8>> {
    let result = check_certified_secret::<G>(prover_public, remote_public, certified);
    accept_or_log::<G>(result)
}

fn check_claimed_secret<G: Group>(
    prover_public: &[u8],
    remote_public: &[u8],
    claimed_secret: &[u8],
    proof: &[u8],
) -> Result<Vec<u8>> {
    let statement = Statement::<G>::from_bytes(prover_public, remote_public, claimed_secret)?;
    let proof = Proof::<G>::from_bytes(proof)?;
    Verifier::new(statement.clone()).verify(&proof)?;
    Ok(G::element_to_bytes(statement.shared_secret()))
}

fn check_certified_secret<G: Group>(
    prover_public: &[u8],
    remote_public: &[u8],
    certified: &[u8],
) -> Result<Vec<u8>> {
    let certified = CertifiedSecret::<G>::from_bytes(certified)?;
    let statement = Statement::<G>::new(
        G::element_from_bytes(prover_public)?,
        G::element_from_bytes(remote_public)?,
        certified.shared_secret().clone(),
    );
    Verifier::new(statement).verify(certified.proof())?;
    Ok(G::element_to_bytes(certified.shared_secret()))
}

fn accept_or_log<G: Group>(result: Result<Vec<u8>>) -> Option<Vec<u8>> {
    match result {
        Ok(secret) => {
            debug!(group = G::name(), "shared secret proof accepted");
            Some(secret)
        }
        Err(e) => {
            debug!(group = G::name(), error = %e, "shared secret proof rejected");
            None
        }
    }
}
