#![no_main]

use libfuzzer_sys::fuzz_target;
use verifiable_dh::DiffieHellman;

fuzz_target!(|data: &[u8]| {
    if data.len() < 256 {
        return;
    }

    let prover_public = &data[..128];
    let remote_public = &data[128..256];
    let certified = &data[256..];

    // Random input must never panic and is overwhelmingly rejected.
    let _ = DiffieHellman::verify_shared_secret(prover_public, remote_public, certified);
});
