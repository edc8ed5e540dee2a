//! ECB mode, described in spec.md §4.3.

use {
    crate::{aes::context::BlockCipher, aes::tables::BLOCK_BYTES, error::CryptoError},
};

/// Electronic codebook mode: every block is transformed independently. No
/// chaining state, and therefore no auxiliary input beyond the context
/// itself.
pub struct Ecb;

impl Ecb {
    /// Transform `input` into `output` block by block under `ctx`'s
    /// direction. Both buffers must be the same length and a multiple of 16
    /// bytes.
    pub fn crypt(ctx: &impl BlockCipher, input: &[u8], output: &mut [u8]) -> Result<(), CryptoError> {
        if input.len() % BLOCK_BYTES != 0 {
            return Err(CryptoError::invalid_argument(format!(
                "ECB input length {} is not a multiple of {BLOCK_BYTES}",
                input.len()
            )));
        }
        if output.len() != input.len() {
            return Err(CryptoError::invalid_argument(format!(
                "ECB output length {} does not match input length {}",
                output.len(),
                input.len()
            )));
        }

        for (in_block, out_block) in input.chunks(BLOCK_BYTES).zip(output.chunks_mut(BLOCK_BYTES)) {
            let mut block = [0u8; BLOCK_BYTES];
            block.copy_from_slice(in_block);
            let transformed = match ctx.direction() {
                crate::aes::context::Direction::Encrypt => ctx.encrypt_block(block),
                crate::aes::context::Direction::Decrypt => ctx.decrypt_block(block),
            };
            out_block.copy_from_slice(&transformed);
        }

        Ok(())
    }
}
