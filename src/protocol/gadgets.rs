//! Protocol gadgets for the shared-secret correctness proof.
//!
//! This module contains the data carried by the protocol: the secret witness,
//! the public statement, the commitment, the response, the proof itself, and
//! the certified secret that bundles a proof with the secret it vouches for.

use core::fmt;

use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::{Error, Group, Result};

/// Protocol version for serialization compatibility.
const PROTOCOL_VERSION: u8 = 1;

/// Upper bound on any single length-prefixed field.
const MAX_FIELD_SIZE: usize = 4096;

/// Secret witness: the private Diffie-Hellman exponent `x`.
///
/// # Security
///
/// - The witness is zeroized when dropped
/// - Its `Debug` output is redacted
/// - Keep witness values secret and never transmit them
#[derive(Clone)]
pub struct Witness<G: Group> {
    x: G::Scalar,
}

impl<G: Group> Witness<G> {
    /// Wraps a private exponent.
    ///
    /// Rejects zero; every other scalar is already in `[1, q - 1]`.
    pub fn new(x: G::Scalar) -> Result<Self> {
        if G::scalar_is_zero(&x) {
            return Err(Error::InvalidScalar("Private exponent cannot be zero".to_string()));
        }
        Ok(Self { x })
    }

    /// Returns a reference to the secret scalar.
    pub(crate) fn secret(&self) -> &G::Scalar {
        &self.x
    }
}

impl<G: Group> Drop for Witness<G> {
    fn drop(&mut self) {
        self.x.zeroize();
    }
}

impl<G: Group> ZeroizeOnDrop for Witness<G> {}

impl<G: Group> fmt::Debug for Witness<G> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Witness(<redacted>)")
    }
}

/// Public statement certified by the proof.
///
/// `prover_public = g^x`, `remote_public = B`, `shared_secret = B^x`, where `x`
/// is the prover's private exponent. The proof shows that `prover_public` and
/// `shared_secret` share the discrete logarithm `x` to the bases `g` and `B`.
#[derive(Clone, Debug)]
pub struct Statement<G: Group> {
    prover_public: G::Element,
    remote_public: G::Element,
    shared_secret: G::Element,
}

impl<G: Group> Statement<G> {
    /// Creates a statement from already-decoded public values.
    pub fn new(
        prover_public: G::Element,
        remote_public: G::Element,
        shared_secret: G::Element,
    ) -> Self {
        Self {
            prover_public,
            remote_public,
            shared_secret,
        }
    }

    /// Computes the statement a prover holding `witness` makes about `remote_public`.
    pub fn from_witness(witness: &Witness<G>, remote_public: G::Element) -> Self {
        let prover_public = G::exp(&G::generator(), witness.secret());
        let shared_secret = G::exp(&remote_public, witness.secret());
        Self {
            prover_public,
            remote_public,
            shared_secret,
        }
    }

    /// Decodes a statement from big-endian encodings, validating every element.
    pub fn from_bytes(
        prover_public: &[u8],
        remote_public: &[u8],
        shared_secret: &[u8],
    ) -> Result<Self> {
        let statement = Self::new(
            G::element_from_bytes(prover_public)?,
            G::element_from_bytes(remote_public)?,
            G::element_from_bytes(shared_secret)?,
        );
        statement.validate()?;
        Ok(statement)
    }

    /// Returns the prover's public value `g^x`.
    pub fn prover_public(&self) -> &G::Element {
        &self.prover_public
    }

    /// Returns the counterparty's public value `B`.
    pub fn remote_public(&self) -> &G::Element {
        &self.remote_public
    }

    /// Returns the claimed shared secret `B^x`.
    pub fn shared_secret(&self) -> &G::Element {
        &self.shared_secret
    }

    /// Validates subgroup membership and rejects identity public values.
    ///
    /// An identity public value makes the statement trivially true for any secret.
    pub fn validate(&self) -> Result<()> {
        for (name, element) in [
            ("prover public value", &self.prover_public),
            ("remote public value", &self.remote_public),
            ("shared secret", &self.shared_secret),
        ] {
            G::validate_element(element)?;
            if G::is_identity(element) {
                return Err(Error::InvalidGroupElement(format!("{name} cannot be the identity")));
            }
        }
        Ok(())
    }
}

/// Commitment values in the proof.
///
/// First message from the prover: `commitment1 = g^r`, `commitment2 = B^r` for a fresh nonce `r`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Commitment<G: Group> {
    commitment1: G::Element,
    commitment2: G::Element,
}

impl<G: Group> Commitment<G> {
    pub fn new(commitment1: G::Element, commitment2: G::Element) -> Self {
        Self {
            commitment1,
            commitment2,
        }
    }

    /// Returns `g^r`.
    pub fn commitment1(&self) -> &G::Element {
        &self.commitment1
    }

    /// Returns `B^r`.
    pub fn commitment2(&self) -> &G::Element {
        &self.commitment2
    }
}

/// Response value in the proof: `response = r + c * x (mod q)`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Response<G: Group> {
    s: G::Scalar,
}

impl<G: Group> Response<G> {
    pub fn new(s: G::Scalar) -> Self {
        Self { s }
    }

    /// Returns a reference to the response scalar.
    pub fn s(&self) -> &G::Scalar {
        &self.s
    }
}

/// Non-interactive proof that a shared secret was derived honestly.
///
/// The challenge is not carried; the verifier recomputes it from the transcript.
///
/// # Serialization
///
/// Format: `[version (1 byte)][len (4 bytes)][commitment1][len][commitment2][len][response]`,
/// lengths big-endian.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Proof<G: Group> {
    version: u8,
    commitment: Commitment<G>,
    response: Response<G>,
}

impl<G: Group> Proof<G> {
    /// Creates a new proof from commitment and response.
    pub fn new(commitment: Commitment<G>, response: Response<G>) -> Self {
        Self {
            version: PROTOCOL_VERSION,
            commitment,
            response,
        }
    }

    /// Returns the protocol version.
    pub fn version(&self) -> u8 {
        self.version
    }

    pub fn commitment(&self) -> &Commitment<G> {
        &self.commitment
    }

    pub fn response(&self) -> &Response<G> {
        &self.response
    }

    /// Serializes the proof to bytes.
    pub fn to_bytes(&self) -> Vec<u8> {
        let commitment = &self.commitment;
        let mut out = vec![self.version];
        put_field(&mut out, &G::element_to_bytes(commitment.commitment1()));
        put_field(&mut out, &G::element_to_bytes(commitment.commitment2()));
        put_field(&mut out, &G::scalar_to_bytes(self.response.s()));
        out
    }

    /// Deserializes a proof, validating both commitments and the response range.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let mut reader = FieldReader::new(bytes, "proof")?;
        let commitment1 = G::element_from_bytes(reader.field("commitment1")?)?;
        let commitment2 = G::element_from_bytes(reader.field("commitment2")?)?;
        let s = G::scalar_from_bytes(reader.field("response")?)?;
        reader.finish()?;

        Ok(Self::new(
            Commitment::new(commitment1, commitment2),
            Response::new(s),
        ))
    }
}

/// A shared secret together with the proof that vouches for it.
///
/// This is what a prover hands to an auditor when the auditor has no other way
/// of learning the claimed secret.
///
/// # Serialization
///
/// Format: `[version (1 byte)][len (4 bytes)][shared secret][len (4 bytes)][proof bytes]`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CertifiedSecret<G: Group> {
    shared_secret: G::Element,
    proof: Proof<G>,
}

impl<G: Group> CertifiedSecret<G> {
    pub fn new(shared_secret: G::Element, proof: Proof<G>) -> Self {
        Self {
            shared_secret,
            proof,
        }
    }

    pub fn shared_secret(&self) -> &G::Element {
        &self.shared_secret
    }

    pub fn proof(&self) -> &Proof<G> {
        &self.proof
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = vec![PROTOCOL_VERSION];
        put_field(&mut out, &G::element_to_bytes(&self.shared_secret));
        put_field(&mut out, &self.proof.to_bytes());
        out
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let mut reader = FieldReader::new(bytes, "certified secret")?;
        let shared_secret = G::element_from_bytes(reader.field("shared secret")?)?;
        let proof = Proof::from_bytes(reader.field("proof")?)?;
        reader.finish()?;

        Ok(Self::new(shared_secret, proof))
    }
}

fn put_field(out: &mut Vec<u8>, field: &[u8]) {
    out.extend_from_slice(&(field.len() as u32).to_be_bytes());
    out.extend_from_slice(field);
}

/// Cursor over a versioned sequence of length-prefixed fields.
struct FieldReader<'a> {
    bytes: &'a [u8],
    pos: usize,
    what: &'static str,
}

impl<'a> FieldReader<'a> {
    fn new(bytes: &'a [u8], what: &'static str) -> Result<Self> {
        let version = *bytes
            .first()
            .ok_or_else(|| Error::Encoding(format!("Empty {what}")))?;
        if version != PROTOCOL_VERSION {
            return Err(Error::Encoding(format!("Unsupported {what} version: {version}")));
        }
        Ok(Self {
            bytes,
            pos: 1,
            what,
        })
    }

    fn field(&mut self, name: &str) -> Result<&'a [u8]> {
        let len_end = self.pos + 4;
        let len_bytes: [u8; 4] = self
            .bytes
            .get(self.pos..len_end)
            .and_then(|s| s.try_into().ok())
            .ok_or_else(|| {
                Error::Encoding(format!("Truncated {}: missing {name} length", self.what))
            })?;
        let len = u32::from_be_bytes(len_bytes) as usize;

        if len == 0 || len > MAX_FIELD_SIZE {
            return Err(Error::Encoding(format!("Invalid {name} length: {len}")));
        }

        let end = len_end + len;
        let Some(field) = self.bytes.get(len_end..end) else {
            return Err(Error::Encoding(format!("Truncated {}: short {name} data", self.what)));
        };
        self.pos = end;
        Ok(field)
    }

    fn finish(self) -> Result<()> {
        if self.pos != self.bytes.len() {
            return Err(Error::Encoding(format!(
                "{} has {} trailing bytes",
                self.what,
                self.bytes.len() - self.pos
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Modp1024, SecureRng};

    fn random_proof() -> Proof<Modp1024> {
        let mut rng = SecureRng::new();
        let g = Modp1024::generator();
        let c1 = Modp1024::exp(&g, &Modp1024::random_scalar(&mut rng).unwrap());
        let c2 = Modp1024::exp(&g, &Modp1024::random_scalar(&mut rng).unwrap());
        let s = Modp1024::random_scalar(&mut rng).unwrap();
        Proof::new(Commitment::new(c1, c2), Response::new(s))
    }

    #[test]
    fn witness_rejects_zero() {
        let zero = Modp1024::scalar_from_bytes(&[0u8; 20]).unwrap();
        assert!(Witness::<Modp1024>::new(zero).is_err());
    }

    #[test]
    fn witness_debug_is_redacted() {
        let x = Modp1024::scalar_from_bytes(&[7]).unwrap();
        let witness = Witness::<Modp1024>::new(x).unwrap();
        assert_eq!(format!("{witness:?}"), "Witness(<redacted>)");
    }

    #[test]
    fn statement_from_witness() {
        let mut rng = SecureRng::new();
        let x = Modp1024::random_scalar(&mut rng).unwrap();
        let y = Modp1024::random_scalar(&mut rng).unwrap();
        let g = Modp1024::generator();
        let b = Modp1024::exp(&g, &y);
        let witness = Witness::<Modp1024>::new(x.clone()).unwrap();

        let statement = Statement::from_witness(&witness, b.clone());
        assert_eq!(statement.prover_public(), &Modp1024::exp(&g, &x));
        assert_eq!(statement.shared_secret(), &Modp1024::exp(&b, &x));
        statement.validate().unwrap();
    }

    #[test]
    fn statement_rejects_identity() {
        let g = Modp1024::generator();
        let id = Modp1024::identity();
        let statement = Statement::<Modp1024>::new(g.clone(), id, g);
        assert!(statement.validate().is_err());
    }

    #[test]
    fn proof_serialization() {
        let proof = random_proof();
        let bytes = proof.to_bytes();
        assert_eq!(bytes.len(), 1 + 4 + 128 + 4 + 128 + 4 + 20);

        let deserialized = Proof::<Modp1024>::from_bytes(&bytes).unwrap();
        assert_eq!(deserialized, proof);
        assert_eq!(deserialized.version(), PROTOCOL_VERSION);
    }

    #[test]
    fn proof_from_bytes_rejects_empty() {
        assert!(Proof::<Modp1024>::from_bytes(&[]).is_err());
    }

    #[test]
    fn proof_from_bytes_rejects_truncated() {
        assert!(Proof::<Modp1024>::from_bytes(&[1, 0, 0, 0]).is_err());

        let bytes = random_proof().to_bytes();
        assert!(Proof::<Modp1024>::from_bytes(&bytes[..bytes.len() - 1]).is_err());
    }

    #[test]
    fn proof_from_bytes_rejects_wrong_version() {
        let mut bytes = random_proof().to_bytes();
        bytes[0] = 99;
        assert!(Proof::<Modp1024>::from_bytes(&bytes).is_err());
    }

    #[test]
    fn proof_from_bytes_rejects_zero_length_fields() {
        let bytes = [PROTOCOL_VERSION, 0, 0, 0, 0];
        assert!(Proof::<Modp1024>::from_bytes(&bytes).is_err());
    }

    #[test]
    fn proof_from_bytes_rejects_excessive_length() {
        let bytes = [PROTOCOL_VERSION, 0xFF, 0xFF, 0xFF, 0xFF];
        assert!(Proof::<Modp1024>::from_bytes(&bytes).is_err());
    }

    #[test]
    fn proof_from_bytes_rejects_trailing_data() {
        let mut bytes = random_proof().to_bytes();
        bytes.push(0xFF);
        assert!(Proof::<Modp1024>::from_bytes(&bytes).is_err());
    }

    #[test]
    fn proof_from_bytes_rejects_element_outside_subgroup() {
        let mut bytes = random_proof().to_bytes();
        // commitment1 -> 2, which has the wrong order
        bytes[5..5 + 128].fill(0);
        bytes[5 + 127] = 2;
        assert!(matches!(
            Proof::<Modp1024>::from_bytes(&bytes),
            Err(Error::InvalidGroupElement(_))
        ));
    }

    #[test]
    fn certified_secret_serialization() {
        let proof = random_proof();
        let secret = proof.commitment().commitment1().clone();
        let certified = CertifiedSecret::<Modp1024>::new(secret, proof);

        let bytes = certified.to_bytes();
        let decoded = CertifiedSecret::<Modp1024>::from_bytes(&bytes).unwrap();
        assert_eq!(decoded, certified);

        assert!(CertifiedSecret::<Modp1024>::from_bytes(&bytes[..bytes.len() - 3]).is_err());
    }
}
