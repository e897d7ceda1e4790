use core::fmt;
use std::sync::OnceLock;

use crypto_bigint::modular::MontyParams;
use crypto_bigint::{NonZero, U1024};
use rand_core::CryptoRngCore;
use subtle::{Choice, ConstantTimeEq};
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::crypto::field::{decode_be, monty_params, monty_pow};
use crate::{Error, Group, Result};

/// RFC 5114 section 2.1 modulus (1024 bits).
const P_HEX: &str = "B10B8F96A080E01DDE92DE5EAE5D54EC52C99FBCFB06A3C69A6A9DCA52D23B61\
                     6073E28675A23D189838EF1E2EE652C013ECB4AEA906112324975C3CD49B83BF\
                     ACCBDD7D90C4BD7098488E9C219A73724EFFD6FAE5644738FAA31A4FF55BCCC0\
                     A151AF5F0DC8B4BD45BF37DF365C1A65E68CFDA76D4DA708DF1FB2BC2E4A4371";

/// RFC 5114 section 2.1 generator of the order-q subgroup.
const G_HEX: &str = "A4D1CBD5C3FD34126765A442EFB99905F8104DD258AC507FD6406CFF14266D31\
                     266FEA1E5C41564B777E690F5504F213160217B4B01B886A5E91547F9E2749F4\
                     D7FBD7D3B9A92EE1909D0D2263F80A76A6A24C087A091F531DBF0A0169B6A28A\
                     D662A4D18E73AFA32D779D5918D08BC8858F4DCEF97C2A24855E6EEB22B3B2E5";

/// RFC 5114 section 2.1 subgroup order (160 bits).
const Q_HEX: &str = "F518AA8781A8DF278ABA4E7D64B7CB9D49462353";

const LIMBS: usize = U1024::LIMBS;

/// Width of an encoded element.
const ELEMENT_BYTES: usize = 128;

/// Width of an encoded scalar.
const SCALAR_BYTES: usize = 20;

/// 160-bit order plus 128 bits of statistical slack.
const WIDE_SCALAR_BYTES: usize = 36;

/// Fixed Diffie-Hellman group: modulus `p`, subgroup order `q`, generator `g`.
///
/// Decoded once from the built-in hexadecimal constants on first use and shared
/// by every key afterwards. Montgomery parameters for `p` are precomputed at the
/// same time.
pub struct GroupParameters {
    p: U1024,
    q: U1024,
    g: U1024,
    p_monty: MontyParams<LIMBS>,
    p_nonzero: NonZero<U1024>,
    q_nonzero: NonZero<U1024>,
}

impl GroupParameters {
    /// Returns the process-wide group parameters.
    ///
    /// # Panics
    ///
    /// Panics on first use if the compiled-in constants are malformed, which
    /// [`GroupParameters::from_hex`] rules out for the shipped values.
    pub fn get() -> &'static Self {
        static PARAMS: OnceLock<GroupParameters> = OnceLock::new();
        PARAMS.get_or_init(|| match Self::from_hex(P_HEX, Q_HEX, G_HEX) {
            Ok(params) => params,
            Err(e) => panic!("built-in group constants are malformed: {e}"),
        })
    }

    /// Decodes and validates group parameters from big-endian hexadecimal strings.
    pub fn from_hex(p: &str, q: &str, g: &str) -> Result<Self> {
        Self::new(
            decode_hex("p", p)?,
            decode_hex("q", q)?,
            decode_hex("g", g)?,
        )
    }

    /// Validates the structural relations between `p`, `q` and `g`.
    ///
    /// Checks that `p` and `q` are odd, `q < p`, `q` divides `p - 1`, and that `g`
    /// is a non-trivial element with `g^q = 1 (mod p)`. Primality of `p` and `q`
    /// is not re-checked.
    pub fn new(p: U1024, q: U1024, g: U1024) -> Result<Self> {
        let p_nonzero = Option::<NonZero<U1024>>::from(NonZero::new(p))
            .ok_or_else(|| Error::InvalidParams("p cannot be zero".to_string()))?;
        let q_nonzero = Option::<NonZero<U1024>>::from(NonZero::new(q))
            .ok_or_else(|| Error::InvalidParams("q cannot be zero".to_string()))?;

        let p_monty = monty_params(&p)?;
        if monty_params(&q).is_err() {
            return Err(Error::InvalidParams("q must be odd".to_string()));
        }
        if q <= U1024::ONE {
            return Err(Error::InvalidParams("q must be greater than 1".to_string()));
        }
        if q >= p {
            return Err(Error::InvalidParams("q must be smaller than p".to_string()));
        }

        let p_minus_one = p.wrapping_sub(&U1024::ONE);
        if p_minus_one.rem(&q_nonzero) != U1024::ZERO {
            return Err(Error::InvalidParams("q must divide p - 1".to_string()));
        }

        if g <= U1024::ONE || g >= p_minus_one {
            return Err(Error::InvalidParams("g must lie in [2, p - 2]".to_string()));
        }
        if monty_pow(&g, &q, &p_monty) != U1024::ONE {
            return Err(Error::InvalidParams(
                "g does not generate a subgroup of order q".to_string(),
            ));
        }

        Ok(Self {
            p,
            q,
            g,
            p_monty,
            p_nonzero,
            q_nonzero,
        })
    }

    /// Returns the modulus `p`.
    pub fn modulus(&self) -> &U1024 {
        &self.p
    }

    /// Returns the subgroup order `q`.
    pub fn order(&self) -> &U1024 {
        &self.q
    }

    /// Returns the generator `g`.
    pub fn generator(&self) -> &U1024 {
        &self.g
    }
}

impl fmt::Debug for GroupParameters {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GroupParameters")
            .field("p", &self.p)
            .field("q", &self.q)
            .field("g", &self.g)
            .finish_non_exhaustive()
    }
}

fn decode_hex(name: &str, value: &str) -> Result<U1024> {
    let bytes = hex::decode(value)
        .map_err(|e| Error::InvalidParams(format!("{name} is not valid hex: {e}")))?;
    decode_be::<LIMBS>(&bytes)
        .ok_or_else(|| Error::InvalidParams(format!("{name} exceeds 1024 bits")))
}

/// The RFC 5114 1024-bit MODP group with a 160-bit prime-order subgroup.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Modp1024;

/// Exponent modulo `q`, zeroized on drop and redacted in `Debug` output.
#[derive(Clone, Eq, PartialEq, Zeroize, ZeroizeOnDrop)]
pub struct Scalar(U1024);

/// Element of the order-`q` subgroup of `Z_p^*`.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Element(U1024);

impl ConstantTimeEq for Scalar {
    fn ct_eq(&self, other: &Self) -> Choice {
        self.0.ct_eq(&other.0)
    }
}

impl ConstantTimeEq for Element {
    fn ct_eq(&self, other: &Self) -> Choice {
        self.0.ct_eq(&other.0)
    }
}

impl fmt::Debug for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Scalar(<redacted>)")
    }
}

impl Group for Modp1024 {
    type Scalar = Scalar;
    type Element = Element;

    const SCALAR_BYTES: usize = SCALAR_BYTES;
    const ELEMENT_BYTES: usize = ELEMENT_BYTES;
    const WIDE_SCALAR_BYTES: usize = WIDE_SCALAR_BYTES;

    fn name() -> &'static str {
        "RFC5114-1024-160"
    }

    fn generator() -> Self::Element {
        Element(*GroupParameters::get().generator())
    }

    fn modulus_bytes() -> Vec<u8> {
        GroupParameters::get().modulus().to_be_bytes().to_vec()
    }

    fn scalar_from_bytes(bytes: &[u8]) -> Result<Self::Scalar> {
        let value = decode_be::<LIMBS>(bytes).ok_or_else(|| {
            Error::InvalidScalar(format!("{} bytes is too wide for a scalar", bytes.len()))
        })?;

        if value >= *GroupParameters::get().order() {
            return Err(Error::InvalidScalar(
                "Scalar value must be less than group order".to_string(),
            ));
        }

        Ok(Scalar(value))
    }

    fn scalar_to_bytes(scalar: &Self::Scalar) -> Vec<u8> {
        let bytes = scalar.0.to_be_bytes();
        bytes[ELEMENT_BYTES - SCALAR_BYTES..].to_vec()
    }

    fn scalar_from_wide_bytes(bytes: &[u8]) -> Self::Scalar {
        let tail = &bytes[bytes.len().saturating_sub(ELEMENT_BYTES)..];
        let value = decode_be::<LIMBS>(tail)
            .unwrap_or_else(|| unreachable!("at most 128 bytes always fit in U1024"));
        Scalar(value.rem(&GroupParameters::get().q_nonzero))
    }

    fn element_from_bytes(bytes: &[u8]) -> Result<Self::Element> {
        let value = decode_be::<LIMBS>(bytes).ok_or_else(|| {
            Error::InvalidGroupElement(format!(
                "{} bytes is too wide for a group element",
                bytes.len()
            ))
        })?;

        let element = Element(value);
        Self::validate_element(&element)?;
        Ok(element)
    }

    fn element_to_bytes(element: &Self::Element) -> Vec<u8> {
        element.0.to_be_bytes().to_vec()
    }

    fn random_scalar<R: CryptoRngCore>(rng: &mut R) -> Result<Self::Scalar> {
        let mut buf = [0u8; WIDE_SCALAR_BYTES];
        loop {
            rng.try_fill_bytes(&mut buf)
                .map_err(|e| Error::Entropy(e.to_string()))?;
            let scalar = Self::scalar_from_wide_bytes(&buf);
            buf.zeroize();

            if !Self::scalar_is_zero(&scalar) {
                return Ok(scalar);
            }
        }
    }

    fn exp(base: &Self::Element, exponent: &Self::Scalar) -> Self::Element {
        let params = GroupParameters::get();
        Element(monty_pow(&base.0, &exponent.0, &params.p_monty))
    }

    fn element_mul(a: &Self::Element, b: &Self::Element) -> Self::Element {
        Element(a.0.mul_mod(&b.0, &GroupParameters::get().p_nonzero))
    }

    fn identity() -> Self::Element {
        Element(U1024::ONE)
    }

    fn is_identity(element: &Self::Element) -> bool {
        bool::from(element.0.ct_eq(&U1024::ONE))
    }

    fn validate_element(element: &Self::Element) -> Result<()> {
        let params = GroupParameters::get();

        if element.0 == U1024::ZERO {
            return Err(Error::InvalidGroupElement("Element cannot be zero".to_string()));
        }

        if element.0 >= params.p {
            return Err(Error::InvalidGroupElement("Element must be less than p".to_string()));
        }

        if monty_pow(&element.0, &params.q, &params.p_monty) != U1024::ONE {
            return Err(Error::InvalidGroupElement(
                "Element is not in the correct subgroup".to_string(),
            ));
        }

        Ok(())
    }

    fn scalar_add(a: &Self::Scalar, b: &Self::Scalar) -> Self::Scalar {
        Scalar(a.0.add_mod(&b.0, &GroupParameters::get().q_nonzero))
    }

    fn scalar_mul(a: &Self::Scalar, b: &Self::Scalar) -> Self::Scalar {
        Scalar(a.0.mul_mod(&b.0, &GroupParameters::get().q_nonzero))
    }

    fn scalar_is_zero(scalar: &Self::Scalar) -> bool {
        bool::from(scalar.0.ct_eq(&U1024::ZERO))
    }
}
