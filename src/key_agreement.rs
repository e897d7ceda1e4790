//! Diffie-Hellman key agreement with provable shared secrets.
//!
//! A [`KeyAgreement`] owns one private exponent and the public value derived
//! from it. It derives shared secrets with counterparties and can prove to a
//! third party that a shared secret was computed honestly.

use rand_core::CryptoRngCore;
use tracing::{debug, trace};

use crate::protocol::transcript::derive_scalar;
use crate::protocol::{verify_certified_secret, Prover, Witness};
use crate::{Error, Group, Modp1024, Result, SecureRng};

/// Key agreement over the built-in RFC 5114 1024-bit group.
pub type DiffieHellman = KeyAgreement<Modp1024>;

/// One party's Diffie-Hellman key pair.
///
/// The public value is computed at construction and never changes, so a
/// constructed `KeyAgreement` is always ready to use. The backend `G` is chosen
/// by type parameter and owned by this instance alone.
#[derive(Debug)]
pub struct KeyAgreement<G: Group> {
    witness: Witness<G>,
    public: G::Element,
}

impl<G: Group> KeyAgreement<G> {
    /// Creates a key from `data`.
    ///
    /// With `is_seed = true` the bytes are entropy and the private exponent is
    /// derived from them deterministically; an empty seed draws a fresh key from
    /// the operating system. With `is_seed = false` the bytes are the big-endian
    /// private exponent itself, which must lie in `[1, q - 1]`.
    pub fn new(data: &[u8], is_seed: bool) -> Result<Self> {
        match (is_seed, data.is_empty()) {
            (true, true) => Self::generate(),
            (true, false) => Ok(Self::from_seed(data)),
            (false, _) => Self::from_private_key(data),
        }
    }

    /// Generates a fresh key from the operating system's random source.
    pub fn generate() -> Result<Self> {
        Self::generate_with_rng(&mut SecureRng::new())
    }

    /// Generates a fresh key from `rng`.
    pub fn generate_with_rng<R: CryptoRngCore>(rng: &mut R) -> Result<Self> {
        let x = G::random_scalar(rng)?;
        trace!(group = G::name(), "generated random private exponent");
        Ok(Self::from_witness(Witness::new(x)?))
    }

    /// Derives a key deterministically from seed bytes.
    ///
    /// The same seed always yields the same key.
    pub fn from_seed(seed: &[u8]) -> Self {
        let x = derive_scalar::<G>(seed);
        trace!(group = G::name(), "derived private exponent from seed");
        let witness =
            Witness::new(x).unwrap_or_else(|_| unreachable!("seed derivation never yields zero"));
        Self::from_witness(witness)
    }

    /// Uses `private_key` as the private exponent.
    ///
    /// Values of zero or at least `q` are rejected rather than reduced.
    pub fn from_private_key(private_key: &[u8]) -> Result<Self> {
        let x = G::scalar_from_bytes(private_key).inspect_err(|e| {
            debug!(group = G::name(), error = %e, "rejected private key");
        })?;
        Ok(Self::from_witness(Witness::new(x)?))
    }

    fn from_witness(witness: Witness<G>) -> Self {
        let public = G::exp(&G::generator(), witness.secret());
        Self { witness, public }
    }

    /// Returns the public value `g^x` as fixed-width big-endian bytes.
    pub fn public_component(&self) -> Vec<u8> {
        G::element_to_bytes(&self.public)
    }

    /// Returns the private exponent `x` as fixed-width big-endian bytes.
    pub fn private_component(&self) -> Vec<u8> {
        G::scalar_to_bytes(self.witness.secret())
    }

    /// Derives the secret shared with the owner of `remote_public`.
    ///
    /// `remote_public` must be a non-identity member of the order-`q` subgroup;
    /// anything else is rejected.
    pub fn shared_secret(&self, remote_public: &[u8]) -> Result<Vec<u8>> {
        let remote = decode_remote::<G>(remote_public)?;
        Ok(G::element_to_bytes(&G::exp(&remote, self.witness.secret())))
    }

    /// Builds a prover for the secret shared with `remote_public`.
    pub fn prover(&self, remote_public: &[u8]) -> Result<Prover<G>> {
        let remote = decode_remote::<G>(remote_public)?;
        Prover::new(self.witness.clone(), remote)
    }

    /// Proves the secret shared with `remote_public` was derived from this key.
    ///
    /// Returns an encoded [`CertifiedSecret`](crate::CertifiedSecret) carrying both the
    /// shared secret and its proof, ready for [`KeyAgreement::verify_shared_secret`].
    pub fn prove_shared_secret(&self, remote_public: &[u8]) -> Result<Vec<u8>> {
        self.prove_shared_secret_with_rng(remote_public, &mut SecureRng::new())
    }

    pub fn prove_shared_secret_with_rng<R: CryptoRngCore>(
        &self,
        remote_public: &[u8],
        rng: &mut R,
    ) -> Result<Vec<u8>> {
        Ok(self.prover(remote_public)?.certify(rng)?.to_bytes())
    }

    /// Verifies a certified secret produced by [`KeyAgreement::prove_shared_secret`].
    ///
    /// Returns the shared secret between `prover_public` and `remote_public` if
    /// the proof holds, `None` otherwise.
    pub fn verify_shared_secret(
        prover_public: &[u8],
        remote_public: &[u8],
        certified: &[u8],
    ) -> Option<Vec<u8>> {
        verify_certified_secret::<G>(prover_public, remote_public, certified)
    }
}

fn decode_remote<G: Group>(remote_public: &[u8]) -> Result<G::Element> {
    let remote = G::element_from_bytes(remote_public).inspect_err(|e| {
        debug!(group = G::name(), error = %e, "rejected remote public value");
    })?;
    if G::is_identity(&remote) {
        debug!(group = G::name(), "rejected identity remote public value");
        return Err(Error::InvalidGroupElement(
            "Remote public value cannot be the identity".to_string(),
        ));
    }
    Ok(remote)
}
