//! CCM mode (NIST SP 800-38C), described in spec.md §4.5.
//!
//! This driver exposes the encryption/decryption half only, with no
//! associated-data path, matching what spec.md §4.5 calls out as the
//! abbreviated entry point in the original source. The tag-handling path is
//! implemented strictly against SP 800-38C rather than guessed at, per the
//! open question in spec.md §9: `AuthenticationFailed` is raised on any tag
//! mismatch.

use crate::{
    aes::context::{BlockCipher, Direction},
    aes::tables::BLOCK_BYTES,
    error::CryptoError,
};

/// The fixed tag length this driver uses, in bytes. SP 800-38C allows
/// `{4, 6, 8, 10, 12, 14, 16}`; this core always uses the maximum.
const TAG_BYTES: usize = 16;

/// Counter with CBC-MAC, per NIST SP 800-38C. Requires a context keyed in
/// the encrypt direction: both the CBC-MAC and the keystream generation use
/// only the forward cipher, regardless of whether the caller is encrypting
/// or decrypting.
pub struct Ccm;

impl Ccm {
    /// `direction == Encrypt`: `output` must be `input.len() + 16` bytes;
    /// the last 16 bytes are the authentication tag.
    ///
    /// `direction == Decrypt`: `input` must be ciphertext followed by its
    /// 16-byte tag; `output` must be `input.len() - 16` bytes. On tag
    /// mismatch this returns `CryptoError::AuthenticationFailed` and
    /// `output`'s content must not be treated as valid plaintext by the
    /// caller.
    pub fn crypt(
        ctx: &impl BlockCipher,
        direction: Direction,
        nonce: &[u8],
        input: &[u8],
        output: &mut [u8],
    ) -> Result<(), CryptoError> {
        if ctx.direction() != Direction::Encrypt {
            return Err(CryptoError::invalid_argument(
                "CCM requires a context keyed in the encrypt direction",
            ));
        }
        if !(7..=13).contains(&nonce.len()) {
            return Err(CryptoError::invalid_argument(format!(
                "CCM nonce length {} must be between 7 and 13",
                nonce.len()
            )));
        }

        match direction {
            Direction::Encrypt => Self::encrypt(ctx, nonce, input, output),
            Direction::Decrypt => Self::decrypt(ctx, nonce, input, output),
        }
    }

    fn encrypt(
        ctx: &impl BlockCipher,
        nonce: &[u8],
        plaintext: &[u8],
        output: &mut [u8],
    ) -> Result<(), CryptoError> {
        if output.len() != plaintext.len() + TAG_BYTES {
            return Err(CryptoError::invalid_argument(format!(
                "CCM encrypt output length {} must be input length {} + {TAG_BYTES}",
                output.len(),
                plaintext.len()
            )));
        }

        let q = queue_field_len(nonce);
        let mac = cbc_mac(ctx, nonce, q, plaintext)?;
        let s0 = counter_block_keystream(ctx, nonce, q, 0);
        let tag: Vec<u8> = mac.iter().zip(&s0).map(|(m, s)| m ^ s).collect();

        let (ciphertext_out, tag_out) = output.split_at_mut(plaintext.len());
        keystream_xor(ctx, nonce, q, plaintext, ciphertext_out);
        tag_out.copy_from_slice(&tag);

        Ok(())
    }

    fn decrypt(
        ctx: &impl BlockCipher,
        nonce: &[u8],
        input: &[u8],
        output: &mut [u8],
    ) -> Result<(), CryptoError> {
        if input.len() < TAG_BYTES {
            return Err(CryptoError::invalid_argument(
                "CCM decrypt input shorter than the tag",
            ));
        }
        if output.len() != input.len() - TAG_BYTES {
            return Err(CryptoError::invalid_argument(format!(
                "CCM decrypt output length {} must be input length {} - {TAG_BYTES}",
                output.len(),
                input.len()
            )));
        }

        let (ciphertext, received_tag) = input.split_at(input.len() - TAG_BYTES);
        let q = queue_field_len(nonce);

        keystream_xor(ctx, nonce, q, ciphertext, output);

        let mac = cbc_mac(ctx, nonce, q, output)?;
        let s0 = counter_block_keystream(ctx, nonce, q, 0);
        let expected_tag: Vec<u8> = mac.iter().zip(&s0).map(|(m, s)| m ^ s).collect();

        if !constant_time_eq(&expected_tag, received_tag) {
            return Err(CryptoError::AuthenticationFailed);
        }

        Ok(())
    }
}

/// `q`: the number of octets used to encode the message length, `15 -
/// |nonce|`.
fn queue_field_len(nonce: &[u8]) -> usize {
    15 - nonce.len()
}

/// Build `B0` per SP 800-38C: flags byte, nonce, then the message length
/// encoded big-endian in `q` octets. No associated data is supported, so the
/// Adata flag bit is always clear.
fn format_b0(nonce: &[u8], q: usize, msg_len: usize) -> [u8; BLOCK_BYTES] {
    let mut b0 = [0u8; BLOCK_BYTES];
    let t_field = ((TAG_BYTES - 2) / 2) as u8;
    b0[0] = (t_field << 3) | (q - 1) as u8;
    b0[1..1 + nonce.len()].copy_from_slice(nonce);
    let len_bytes = (msg_len as u128).to_be_bytes();
    b0[16 - q..16].copy_from_slice(&len_bytes[16 - q..]);
    b0
}

/// Build counter block `A_i` per SP 800-38C: flags byte carries only the `q`
/// field, the rest reserved to zero.
fn format_counter_block(nonce: &[u8], q: usize, counter: u64) -> [u8; BLOCK_BYTES] {
    let mut a = [0u8; BLOCK_BYTES];
    a[0] = (q - 1) as u8;
    a[1..1 + nonce.len()].copy_from_slice(nonce);
    let counter_bytes = (counter as u128).to_be_bytes();
    a[16 - q..16].copy_from_slice(&counter_bytes[16 - q..]);
    a
}

/// CBC-MAC over `B0` followed by the zero-padded message, per SP 800-38C.
/// Returns the full 16-byte MAC (`TAG_BYTES` of it are used as the tag).
fn cbc_mac(
    ctx: &impl BlockCipher,
    nonce: &[u8],
    q: usize,
    message: &[u8],
) -> Result<[u8; BLOCK_BYTES], CryptoError> {
    let b0 = format_b0(nonce, q, message.len());
    let mut y = ctx.encrypt_block(b0);

    for chunk in message.chunks(BLOCK_BYTES) {
        let mut block = [0u8; BLOCK_BYTES];
        block[..chunk.len()].copy_from_slice(chunk);
        for (b, v) in block.iter_mut().zip(y) {
            *b ^= v;
        }
        y = ctx.encrypt_block(block);
    }

    Ok(y)
}

/// The keystream block `S_i = E_K(A_i)`, used both to mask the tag (`i =
/// 0`) and to encrypt message blocks (`i >= 1`).
fn counter_block_keystream(ctx: &impl BlockCipher, nonce: &[u8], q: usize, counter: u64) -> [u8; BLOCK_BYTES] {
    let a = format_counter_block(nonce, q, counter);
    ctx.encrypt_block(a)
}

fn keystream_xor(ctx: &impl BlockCipher, nonce: &[u8], q: usize, input: &[u8], output: &mut [u8]) {
    for (i, (in_chunk, out_chunk)) in input
        .chunks(BLOCK_BYTES)
        .zip(output.chunks_mut(BLOCK_BYTES))
        .enumerate()
    {
        let s = counter_block_keystream(ctx, nonce, q, (i + 1) as u64);
        for (o, (i, s)) in out_chunk.iter_mut().zip(in_chunk.iter().zip(s)) {
            *o = i ^ s;
        }
    }
}

fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.iter().zip(b).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aes::context::AesContext;

    #[test]
    fn rejects_bad_nonce_length() {
        let ctx = AesContext::new(Direction::Encrypt, &[0u8; 16], 128).unwrap();
        let input = [0u8; 16];
        let mut output = [0u8; 32];
        assert!(Ccm::crypt(&ctx, Direction::Encrypt, &[0u8; 6], &input, &mut output).is_err());
        assert!(Ccm::crypt(&ctx, Direction::Encrypt, &[0u8; 14], &input, &mut output).is_err());
    }

    #[test]
    fn rejects_decrypt_keyed_context() {
        let ctx = AesContext::new(Direction::Decrypt, &[0u8; 16], 128).unwrap();
        let input = [0u8; 16];
        let mut output = [0u8; 32];
        assert!(Ccm::crypt(&ctx, Direction::Encrypt, &[0u8; 12], &input, &mut output).is_err());
    }

    #[test]
    fn round_trips_and_detects_tampering() {
        for nonce_len in [7usize, 12, 13] {
            let key = [0x3cu8; 16];
            let ctx = AesContext::new(Direction::Encrypt, &key, 128).unwrap();
            let nonce = vec![0x5au8; nonce_len];
            let plaintext = b"a forensic disk image fragment!".to_vec();
            let mut ciphertext = vec![0u8; plaintext.len() + TAG_BYTES];
            Ccm::crypt(&ctx, Direction::Encrypt, &nonce, &plaintext, &mut ciphertext).unwrap();

            let mut recovered = vec![0u8; plaintext.len()];
            Ccm::crypt(&ctx, Direction::Decrypt, &nonce, &ciphertext, &mut recovered).unwrap();
            assert_eq!(recovered, plaintext);

            let mut tampered = ciphertext.clone();
            let last = tampered.len() - 1;
            tampered[last] ^= 0x01;
            let mut out = vec![0u8; plaintext.len()];
            let err = Ccm::crypt(&ctx, Direction::Decrypt, &nonce, &tampered, &mut out).unwrap_err();
            assert!(matches!(err, CryptoError::AuthenticationFailed));
        }
    }
}
