//! SHA-512 and HMAC-SHA-512, described in spec.md §2 and §4.7–§4.9.

mod compress;
mod constants;
mod context;
mod hmac;

pub use {
    context::{sha512_digest, Hasher, Sha512Context},
    hmac::hmac_sha512,
};
