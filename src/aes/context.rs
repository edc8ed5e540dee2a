//! The AES context: a prepared key schedule plus its directional mode,
//! described in spec.md §3 and §4.1.

use {
    super::{
        block::{decrypt_block, encrypt_block},
        schedule::{derive_decryption_schedule, expand_encryption_schedule, Schedule},
        tables::BLOCK_BYTES,
    },
    crate::error::CryptoError,
    zeroize::Zeroize,
};

/// Which way a keyed context, or a single `crypt` call, is configured to
/// transform data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Encrypt,
    Decrypt,
}

/// The capability a context must provide to be usable by the mode drivers in
/// [`crate::aes::modes`].
///
/// This is the seam described in spec.md §9's Design Notes: the portable
/// [`AesContext`] is the only implementor this crate ships, but a
/// provider-backed context (wrapping a platform cryptography API) could
/// implement the same trait and be used by the same mode drivers without any
/// change to them.
pub trait BlockCipher {
    /// The direction this context was keyed for.
    fn direction(&self) -> Direction;

    /// Transform one block in the encrypt direction.
    fn encrypt_block(&self, block: [u8; BLOCK_BYTES]) -> [u8; BLOCK_BYTES];

    /// Transform one block in the decrypt direction.
    fn decrypt_block(&self, block: [u8; BLOCK_BYTES]) -> [u8; BLOCK_BYTES];
}

/// A prepared AES key schedule and its direction.
///
/// Lifecycle: `AesContext::new` corresponds to create+set-key combined (see
/// spec.md §9: a pointer-to-pointer out-parameter constructor becomes an
/// owned return value, which eliminates the "already set" failure mode
/// entirely). [`AesContext::rekey`] replaces the schedule wholesale. Dropping
/// the context zeroizes the schedule.
#[derive(Zeroize)]
pub struct AesContext {
    #[zeroize(skip)]
    direction: Direction,
    #[zeroize(skip)]
    rounds: u8,
    schedule: Schedule,
}

impl Drop for AesContext {
    fn drop(&mut self) {
        self.zeroize();
    }
}

impl AesContext {
    /// Create a context and immediately key it, per spec.md §4.1.
    ///
    /// `key_bits` must be exactly one of 128, 192, or 256; `key` must be
    /// `key_bits / 8` bytes long.
    pub fn new(direction: Direction, key: &[u8], key_bits: u32) -> Result<Self, CryptoError> {
        log::trace!("creating AES context, direction={direction:?}, key_bits={key_bits}");
        let (schedule, rounds) = prepare_schedule(direction, key, key_bits)?;
        Ok(Self {
            direction,
            rounds,
            schedule,
        })
    }

    /// Replace the schedule wholesale. Per spec.md §3, "a context may be
    /// re-keyed; a re-key replaces the schedule wholesale." On failure the
    /// context is left unchanged (the old schedule is not touched until the
    /// new one has been fully prepared).
    pub fn rekey(&mut self, direction: Direction, key: &[u8], key_bits: u32) -> Result<(), CryptoError> {
        log::trace!("re-keying AES context, direction={direction:?}, key_bits={key_bits}");
        let (schedule, rounds) = prepare_schedule(direction, key, key_bits)?;
        self.schedule.zeroize();
        self.schedule = schedule;
        self.rounds = rounds;
        self.direction = direction;
        Ok(())
    }
}

impl BlockCipher for AesContext {
    fn direction(&self) -> Direction {
        self.direction
    }

    fn encrypt_block(&self, block: [u8; BLOCK_BYTES]) -> [u8; BLOCK_BYTES] {
        encrypt_block(&self.schedule, self.rounds, block)
    }

    fn decrypt_block(&self, block: [u8; BLOCK_BYTES]) -> [u8; BLOCK_BYTES] {
        decrypt_block(&self.schedule, self.rounds, block)
    }
}

fn prepare_schedule(
    direction: Direction,
    key: &[u8],
    key_bits: u32,
) -> Result<(Schedule, u8), CryptoError> {
    let (enc_schedule, rounds) = expand_encryption_schedule(key, key_bits)?;
    let schedule = match direction {
        Direction::Encrypt => enc_schedule,
        Direction::Decrypt => derive_decryption_schedule(&enc_schedule, rounds),
    };
    Ok((schedule, rounds))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_unsupported_key_bit_size() {
        let key = [0u8; 16];
        assert!(AesContext::new(Direction::Encrypt, &key, 100).is_err());
    }

    #[test]
    fn rekey_replaces_schedule() {
        let key_a = [0u8; 16];
        let key_b = [1u8; 16];
        let mut ctx = AesContext::new(Direction::Encrypt, &key_a, 128).unwrap();
        let block = [0u8; 16];
        let out_a = ctx.encrypt_block(block);
        ctx.rekey(Direction::Encrypt, &key_b, 128).unwrap();
        let out_b = ctx.encrypt_block(block);
        assert_ne!(out_a, out_b);
    }

    #[test]
    fn encrypt_then_decrypt_round_trips() {
        let key = [0x42u8; 32];
        let enc = AesContext::new(Direction::Encrypt, &key, 256).unwrap();
        let dec = AesContext::new(Direction::Decrypt, &key, 256).unwrap();
        let block = [0x11u8; 16];
        let ciphertext = enc.encrypt_block(block);
        let plaintext = dec.decrypt_block(ciphertext);
        assert_eq!(plaintext, block);
    }

    #[test]
    fn failed_rekey_leaves_context_usable() {
        let key = [0u8; 24];
        let mut ctx = AesContext::new(Direction::Encrypt, &key, 192).unwrap();
        let block = [7u8; 16];
        let before = ctx.encrypt_block(block);
        assert!(ctx.rekey(Direction::Encrypt, &key, 999).is_err());
        let after = ctx.encrypt_block(block);
        assert_eq!(before, after);
    }

    #[test]
    fn schedule_is_zeroized_on_drop() {
        let key = [0x99u8; 16];
        let ctx = AesContext::new(Direction::Encrypt, &key, 128).unwrap();
        let schedule_ptr: *const u8 = ctx.schedule.as_ptr();
        let schedule_len = ctx.schedule.len();
        drop(ctx);

        // SAFETY: the allocation backing `schedule_ptr` is a field of `ctx`,
        // a stack-allocated struct with no heap indirection; reading it
        // immediately after drop (before the stack slot is reused) observes
        // what `Drop::drop` left behind.
        let after_drop = unsafe { std::slice::from_raw_parts(schedule_ptr, schedule_len) };
        assert!(after_drop.iter().all(|&b| b == 0));
    }
}
