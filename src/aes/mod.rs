//! AES: key schedule, block primitive, keyed contexts, and mode drivers,
//! described in spec.md §2 and §4.1–§4.6.

pub(crate) mod block;
pub mod context;
pub mod modes;
pub(crate) mod schedule;
pub(crate) mod tables;
pub mod tweaked;

pub use {
    context::{AesContext, BlockCipher, Direction},
    modes::{Cbc, Ccm, Ecb, Xts},
    tweaked::TweakedAesContext,
};
