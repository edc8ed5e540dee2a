//! HMAC-SHA-512, per [RFC 2104](https://www.rfc-editor.org/rfc/rfc2104),
//! described in spec.md §4.9.

use {
    super::{
        constants::BLOCK_BYTES,
        context::{sha512_digest, Hasher, Sha512Context},
    },
    zeroize::Zeroize,
};

const IPAD: u8 = 0x36;
const OPAD: u8 = 0x5c;

/// Compute `HMAC-SHA-512(key, message)`.
///
/// Keys longer than the 128-byte block size are first hashed down to 64
/// bytes; all intermediate buffers (`K`, `ipad`, `opad`, the inner digest)
/// are zeroed before this function returns.
pub fn hmac_sha512(key: &[u8], message: &[u8]) -> [u8; 64] {
    let mut k = [0u8; BLOCK_BYTES];
    if key.len() > BLOCK_BYTES {
        let hashed = sha512_digest(key);
        k[..hashed.len()].copy_from_slice(&hashed);
    } else {
        k[..key.len()].copy_from_slice(key);
    }

    let mut ipad = [0u8; BLOCK_BYTES];
    let mut opad = [0u8; BLOCK_BYTES];
    for i in 0..BLOCK_BYTES {
        ipad[i] = k[i] ^ IPAD;
        opad[i] = k[i] ^ OPAD;
    }

    let mut inner_ctx = Sha512Context::init();
    inner_ctx.update(&ipad).unwrap();
    inner_ctx.update(message).unwrap();
    let mut inner = inner_ctx.finalize();

    let mut outer_ctx = Sha512Context::init();
    outer_ctx.update(&opad).unwrap();
    outer_ctx.update(&inner).unwrap();
    let result = outer_ctx.finalize();

    k.zeroize();
    ipad.zeroize();
    opad.zeroize();
    inner.zeroize();

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rfc4231_test_case_1() {
        let key = [0x0bu8; 20];
        let mac = hmac_sha512(&key, b"Hi There");
        assert_eq!(
            hex::encode(mac),
            "87aa7cdea5ef619d4ff0b4241a1d6cb02379f4e2ce4ec2787ad0b30545e17cdedaa833b7d6b8a702038b274eaea3f4e4be9d914eeb61f1702e696c203a126854"
        );
    }

    #[test]
    fn key_length_boundaries_including_hash_the_key_path() {
        for key_len in [0usize, 64, 128, 129, 1024] {
            let key = vec![0x5bu8; key_len];
            // Must not panic regardless of which branch (pad vs. hash-then-pad)
            // is taken.
            let mac = hmac_sha512(&key, b"boundary check");
            assert_eq!(mac.len(), 64);
        }
    }

    #[test]
    fn oversized_key_exercises_hash_the_key_path() {
        let short_key = vec![0x42u8; 128];
        let long_key = vec![0x42u8; 1024];
        // A >128-byte key is hashed down before use, so two keys that are not
        // byte-equal can still (by construction here) differ from the
        // padding-only path; the real assertion is just that it doesn't panic
        // and produces a stable-length output.
        assert_eq!(hmac_sha512(&short_key, b"m").len(), 64);
        assert_eq!(hmac_sha512(&long_key, b"m").len(), 64);
    }
}
