use core::fmt::Debug;

use rand_core::CryptoRngCore;
use subtle::ConstantTimeEq;
use zeroize::Zeroize;

use crate::Result;

/// Arithmetic backend for Diffie-Hellman key agreement and its correctness proof.
///
/// A backend fixes a prime-order subgroup of some larger group together with a
/// generator. Scalars are exponents reduced modulo the subgroup order `q`;
/// elements are members of the subgroup. The group operation is written
/// multiplicatively: [`Group::exp`] raises an element to a scalar power and
/// [`Group::element_mul`] multiplies two elements.
///
/// Decoding functions are the validation boundary: anything they return is in
/// range and, for elements, a member of the order-`q` subgroup.
pub trait Group: Clone + Debug + Send + Sync + 'static {
    /// Exponent type, an integer in `[0, q)`. Zeroized on drop by implementations.
    type Scalar: Clone + Debug + Eq + PartialEq + Zeroize + Send + Sync;

    /// Subgroup element type.
    type Element: Clone + Debug + Eq + PartialEq + ConstantTimeEq + Send + Sync;

    /// Fixed width of an encoded scalar.
    const SCALAR_BYTES: usize;

    /// Fixed width of an encoded element.
    const ELEMENT_BYTES: usize;

    /// Number of uniform bytes reduced into one scalar.
    ///
    /// Must exceed the bit length of `q` by enough that the bias of the
    /// reduction is negligible.
    const WIDE_SCALAR_BYTES: usize;

    /// Returns the name of this group, bound into every proof transcript.
    fn name() -> &'static str;

    /// Returns the generator `g` of the order-`q` subgroup.
    fn generator() -> Self::Element;

    /// Returns the encoded modulus of the ambient group, bound into every proof transcript.
    fn modulus_bytes() -> Vec<u8>;

    /// Decodes a big-endian scalar, rejecting values `>= q`.
    fn scalar_from_bytes(bytes: &[u8]) -> Result<Self::Scalar>;

    /// Encodes a scalar as `SCALAR_BYTES` big-endian bytes.
    fn scalar_to_bytes(scalar: &Self::Scalar) -> Vec<u8>;

    /// Reduces `WIDE_SCALAR_BYTES` (or fewer) uniform bytes modulo `q`.
    fn scalar_from_wide_bytes(bytes: &[u8]) -> Self::Scalar;

    /// Decodes a big-endian element and checks subgroup membership.
    fn element_from_bytes(bytes: &[u8]) -> Result<Self::Element>;

    /// Encodes an element as `ELEMENT_BYTES` big-endian bytes.
    fn element_to_bytes(element: &Self::Element) -> Vec<u8>;

    /// Draws a uniformly random non-zero scalar.
    ///
    /// Fails only if the random source fails.
    fn random_scalar<R: CryptoRngCore>(rng: &mut R) -> Result<Self::Scalar>;

    /// Computes `base^exponent`.
    fn exp(base: &Self::Element, exponent: &Self::Scalar) -> Self::Element;

    fn element_mul(a: &Self::Element, b: &Self::Element) -> Self::Element;

    fn identity() -> Self::Element;

    fn is_identity(element: &Self::Element) -> bool;

    /// Checks range and subgroup membership of an element built without decoding.
    fn validate_element(element: &Self::Element) -> Result<()>;

    fn scalar_add(a: &Self::Scalar, b: &Self::Scalar) -> Self::Scalar;

    fn scalar_mul(a: &Self::Scalar, b: &Self::Scalar) -> Self::Scalar;

    fn scalar_is_zero(scalar: &Self::Scalar) -> bool;
}
