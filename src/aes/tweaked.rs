//! The dual-key context used by [XTS](super::modes::xts), described in
//! spec.md §4.1 and §4.5.

use {
    super::context::{AesContext, Direction},
    crate::error::CryptoError,
};

/// Two AES contexts keyed together: one for the data itself, one to encrypt
/// the tweak value. The tweak key is always used in the encrypt direction,
/// regardless of whether the data key is encrypting or decrypting, per
/// spec.md §4.5.
///
/// Both keys are set atomically: if either fails to validate, neither is
/// applied and the context (on re-key) is left unchanged.
pub struct TweakedAesContext {
    data_ctx: AesContext,
    tweak_ctx: AesContext,
}

impl TweakedAesContext {
    /// Key both contexts. `data_key` is keyed for `direction`; `tweak_key` is
    /// always keyed for [`Direction::Encrypt`].
    pub fn new(
        direction: Direction,
        data_key: &[u8],
        tweak_key: &[u8],
        key_bits: u32,
    ) -> Result<Self, CryptoError> {
        log::trace!("creating tweaked AES context, direction={direction:?}, key_bits={key_bits}");
        let data_ctx = AesContext::new(direction, data_key, key_bits)?;
        let tweak_ctx = AesContext::new(Direction::Encrypt, tweak_key, key_bits)?;
        Ok(Self {
            data_ctx,
            tweak_ctx,
        })
    }

    /// Replace both keys atomically. On failure, the context is left
    /// unchanged.
    pub fn set_keys(
        &mut self,
        direction: Direction,
        data_key: &[u8],
        tweak_key: &[u8],
        key_bits: u32,
    ) -> Result<(), CryptoError> {
        let new_ctx = Self::new(direction, data_key, tweak_key, key_bits)?;
        *self = new_ctx;
        Ok(())
    }

    pub(crate) fn data(&self) -> &AesContext {
        &self.data_ctx
    }

    pub(crate) fn tweak(&self) -> &AesContext {
        &self.tweak_ctx
    }
}
