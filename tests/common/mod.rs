//! Common test utilities shared across integration tests.

use rand_core::{CryptoRng, RngCore};
use verifiable_dh::DiffieHellman;

/// Initialize test tracing (call once at the beginning of tests).
///
/// Only debug logs from this crate are shown. Subsequent calls are ignored.
pub fn init_tracing() {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::new("verifiable_dh=debug");

    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_env_filter(filter)
        .try_init();
}

/// Two freshly generated parties.
pub fn parties() -> (DiffieHellman, DiffieHellman) {
    (
        DiffieHellman::generate().expect("key generation should succeed"),
        DiffieHellman::generate().expect("key generation should succeed"),
    )
}

/// Random source that always reports failure.
#[allow(dead_code)]
pub struct FailingRng;

impl RngCore for FailingRng {
    fn next_u32(&mut self) -> u32 {
        unimplemented!("FailingRng only supports try_fill_bytes")
    }

    fn next_u64(&mut self) -> u64 {
        unimplemented!("FailingRng only supports try_fill_bytes")
    }

    fn fill_bytes(&mut self, _dest: &mut [u8]) {
        unimplemented!("FailingRng only supports try_fill_bytes")
    }

    fn try_fill_bytes(&mut self, _dest: &mut [u8]) -> Result<(), rand_core::Error> {
        Err(rand_core::Error::new(std::io::Error::other(
            "entropy source offline",
        )))
    }
}

impl CryptoRng for FailingRng {}
