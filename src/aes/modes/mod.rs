//! AES mode drivers, described in spec.md §2 and §4.3–§4.6.
//!
//! Each driver consumes a context (or tweaked context), any mode-specific
//! auxiliary input, an input buffer, and an output buffer. None of these
//! drivers touch the context's schedule directly; they go through
//! [`crate::aes::context::BlockCipher`], so a provider-backed context would
//! work here unmodified.

mod cbc;
mod ccm;
mod ecb;
mod xts;

pub use {cbc::Cbc, ccm::Ccm, ecb::Ecb, xts::Xts};
