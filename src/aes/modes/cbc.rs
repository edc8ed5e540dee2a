//! CBC mode, described in spec.md §4.4.

use crate::{
    aes::context::{BlockCipher, Direction},
    aes::tables::BLOCK_BYTES,
    error::CryptoError,
};

/// Cipher block chaining. `out[i] = E_K(in[i] XOR prev)` on encrypt,
/// `out[i] = D_K(in[i]) XOR prev` on decrypt, where `prev` is the IV for
/// block 0 and the previous block's ciphertext thereafter.
pub struct Cbc;

impl Cbc {
    /// Transform `buf` in place under `ctx`'s direction, 16 bytes at a time.
    /// A single buffer parameter is what makes the in-place requirement from
    /// spec.md §4.4 ("the implementation must tolerate `input == output`")
    /// actually reachable: a caller transforming into a separate buffer
    /// copies their input into the output buffer first, then calls this with
    /// that buffer.
    pub fn crypt(ctx: &impl BlockCipher, iv: &[u8], buf: &mut [u8]) -> Result<(), CryptoError> {
        if iv.len() != BLOCK_BYTES {
            return Err(CryptoError::invalid_argument(format!(
                "CBC IV length {} must be {BLOCK_BYTES}",
                iv.len()
            )));
        }
        if buf.len() % BLOCK_BYTES != 0 {
            return Err(CryptoError::invalid_argument(format!(
                "CBC buffer length {} is not a multiple of {BLOCK_BYTES}",
                buf.len()
            )));
        }

        let mut prev = [0u8; BLOCK_BYTES];
        prev.copy_from_slice(iv);

        match ctx.direction() {
            Direction::Encrypt => {
                for chunk in buf.chunks_mut(BLOCK_BYTES) {
                    let mut block = [0u8; BLOCK_BYTES];
                    block.copy_from_slice(chunk);
                    for (b, p) in block.iter_mut().zip(prev) {
                        *b ^= p;
                    }
                    let ciphertext = ctx.encrypt_block(block);
                    chunk.copy_from_slice(&ciphertext);
                    prev = ciphertext;
                }
            }
            Direction::Decrypt => {
                for chunk in buf.chunks_mut(BLOCK_BYTES) {
                    let mut block = [0u8; BLOCK_BYTES];
                    block.copy_from_slice(chunk);
                    // Capture the ciphertext block before overwriting it with
                    // the decrypted plaintext below.
                    let ciphertext = block;
                    let mut plaintext = ctx.decrypt_block(block);
                    for (p, v) in plaintext.iter_mut().zip(prev) {
                        *p ^= v;
                    }
                    chunk.copy_from_slice(&plaintext);
                    prev = ciphertext;
                }
            }
        }

        Ok(())
    }
}
