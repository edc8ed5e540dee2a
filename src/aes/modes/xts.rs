//! XTS mode (IEEE 1619), described in spec.md §4.6.

use crate::{
    aes::{context::Direction, tables::BLOCK_BYTES, tweaked::TweakedAesContext},
    error::CryptoError,
};

/// XEX-based tweaked-codebook mode with ciphertext stealing.
pub struct Xts;

impl Xts {
    /// Transform `input` into `output` under `ctx`'s data direction, tweaked
    /// by `tweak_value` (16 bytes, little-endian sector number). `input`
    /// must be at least 16 bytes; a final partial block is handled via
    /// ciphertext stealing.
    pub fn crypt(
        ctx: &TweakedAesContext,
        tweak_value: &[u8],
        input: &[u8],
        output: &mut [u8],
    ) -> Result<(), CryptoError> {
        if tweak_value.len() != BLOCK_BYTES {
            return Err(CryptoError::invalid_argument(format!(
                "XTS tweak length {} must be {BLOCK_BYTES}",
                tweak_value.len()
            )));
        }
        if input.len() < BLOCK_BYTES {
            return Err(CryptoError::invalid_argument(format!(
                "XTS input length {} must be at least {BLOCK_BYTES}",
                input.len()
            )));
        }
        if output.len() != input.len() {
            return Err(CryptoError::invalid_argument(format!(
                "XTS output length {} does not match input length {}",
                output.len(),
                input.len()
            )));
        }

        let mut tweak = [0u8; BLOCK_BYTES];
        tweak.copy_from_slice(tweak_value);
        tweak = ctx.tweak().encrypt_block(tweak);

        let remainder = input.len() % BLOCK_BYTES;
        let full_blocks = input.len() / BLOCK_BYTES;
        // Number of full blocks processed with the simple per-block loop;
        // when there's a tail, the last full block is handled together with
        // it via ciphertext stealing instead.
        let simple_blocks = if remainder == 0 { full_blocks } else { full_blocks - 1 };

        for i in 0..simple_blocks {
            let mut block = [0u8; BLOCK_BYTES];
            block.copy_from_slice(&input[i * BLOCK_BYTES..(i + 1) * BLOCK_BYTES]);
            let out_block = transform_block(ctx, block, tweak);
            output[i * BLOCK_BYTES..(i + 1) * BLOCK_BYTES].copy_from_slice(&out_block);
            gf_mul_x(&mut tweak);
        }

        if remainder == 0 {
            return Ok(());
        }

        let last_full_start = simple_blocks * BLOCK_BYTES;
        let mut last_full = [0u8; BLOCK_BYTES];
        last_full.copy_from_slice(&input[last_full_start..last_full_start + BLOCK_BYTES]);
        let tail = &input[last_full_start + BLOCK_BYTES..];

        match ctx.data().direction() {
            Direction::Encrypt => {
                let tmp = transform_block(ctx, last_full, tweak);
                output[last_full_start + BLOCK_BYTES..].copy_from_slice(&tmp[..remainder]);

                let mut stolen = [0u8; BLOCK_BYTES];
                stolen[..remainder].copy_from_slice(tail);
                stolen[remainder..].copy_from_slice(&tmp[remainder..]);

                let final_full = transform_block(ctx, stolen, tweak);
                output[last_full_start..last_full_start + BLOCK_BYTES].copy_from_slice(&final_full);
            }
            Direction::Decrypt => {
                let recovered = transform_block(ctx, last_full, tweak);
                output[last_full_start + BLOCK_BYTES..].copy_from_slice(&recovered[..remainder]);

                let mut stolen = [0u8; BLOCK_BYTES];
                stolen[..remainder].copy_from_slice(tail);
                stolen[remainder..].copy_from_slice(&recovered[remainder..]);

                let final_full = transform_block(ctx, stolen, tweak);
                output[last_full_start..last_full_start + BLOCK_BYTES].copy_from_slice(&final_full);
            }
        }

        Ok(())
    }
}

fn transform_block(ctx: &TweakedAesContext, mut block: [u8; BLOCK_BYTES], tweak: [u8; BLOCK_BYTES]) -> [u8; BLOCK_BYTES] {
    for (b, t) in block.iter_mut().zip(tweak) {
        *b ^= t;
    }
    block = match ctx.data().direction() {
        Direction::Encrypt => ctx.data().encrypt_block(block),
        Direction::Decrypt => ctx.data().decrypt_block(block),
    };
    for (b, t) in block.iter_mut().zip(tweak) {
        *b ^= t;
    }
    block
}

/// Advance the tweak by multiplying by the primitive element `α = 0x02` in
/// `GF(2^128)`, reduced by `x^128 + x^7 + x^2 + x + 1 ≡ 0x87`.
///
/// The tweak is a little-endian 128-bit number: this shifts it left by one
/// bit, carrying from the low-order byte toward the high-order byte, and
/// XORs the low byte with `0x87` if the top bit (bit 127) was set before the
/// shift.
fn gf_mul_x(t: &mut [u8; BLOCK_BYTES]) {
    let mut carry = 0u8;
    for b in t.iter_mut() {
        let next_carry = (*b & 0x80) >> 7;
        *b = (*b << 1) | carry;
        carry = next_carry;
    }
    if carry != 0 {
        t[0] ^= 0x87;
    }
}
