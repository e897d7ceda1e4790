use crypto_bigint::modular::{MontyForm, MontyParams};
use crypto_bigint::{Odd, Uint};

use crate::{Error, Result};

/// Builds Montgomery parameters for an odd public modulus.
///
/// Uses `new_vartime` for setup. The modulus is a public group constant, and the
/// exponentiations performed with the result stay constant-time.
pub fn monty_params<const LIMBS: usize>(modulus: &Uint<LIMBS>) -> Result<MontyParams<LIMBS>> {
    let odd_modulus: Option<Odd<Uint<LIMBS>>> = Odd::new(*modulus).into();
    let odd_modulus = odd_modulus.ok_or_else(|| {
        Error::InvalidParams("modulus must be odd for Montgomery form".to_string())
    })?;

    Ok(MontyParams::new_vartime(odd_modulus))
}

/// Computes `base^exp` against precomputed Montgomery parameters.
///
/// `base` must already be reduced below the modulus.
pub fn monty_pow<const LIMBS: usize>(
    base: &Uint<LIMBS>,
    exp: &Uint<LIMBS>,
    params: &MontyParams<LIMBS>,
) -> Uint<LIMBS> {
    MontyForm::new(base, *params).pow(exp).retrieve()
}

/// Decodes a big-endian integer of at most `Uint::<LIMBS>::BYTES` significant bytes.
///
/// Leading zero bytes are ignored, so both minimal and fixed-width encodings decode
/// to the same value. Returns `None` if the value does not fit.
pub fn decode_be<const LIMBS: usize>(bytes: &[u8]) -> Option<Uint<LIMBS>> {
    let significant = strip_leading_zeros(bytes);
    let width = Uint::<LIMBS>::BYTES;
    if significant.len() > width {
        return None;
    }

    let mut buf = vec![0u8; width];
    buf[width - significant.len()..].copy_from_slice(significant);
    Some(Uint::from_be_slice(&buf))
}

fn strip_leading_zeros(bytes: &[u8]) -> &[u8] {
    let first = bytes.iter().position(|b| *b != 0).unwrap_or(bytes.len());
    &bytes[first..]
}
