#![no_main]

use libfuzzer_sys::fuzz_target;
use verifiable_dh::{CertifiedSecret, Modp1024, Proof};

fuzz_target!(|data: &[u8]| {
    if let Ok(proof) = Proof::<Modp1024>::from_bytes(data) {
        // Decoded proofs re-encode to a form that decodes to the same proof.
        let reencoded = Proof::<Modp1024>::from_bytes(&proof.to_bytes());
        assert_eq!(reencoded.ok(), Some(proof));
    }
    let _ = CertifiedSecret::<Modp1024>::from_bytes(data);
});
