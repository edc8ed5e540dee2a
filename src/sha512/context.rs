//! The incremental SHA-512 API, described in spec.md §4.8.

use {
    super::{
        compress::compress,
        constants::{BLOCK_BYTES, H0},
    },
    crate::error::CryptoError,
    zeroize::Zeroize,
};

/// The capability a hash context must provide: initialize, feed bytes
/// incrementally, and consume itself to produce a digest. This is the
/// `Hasher` seam from spec.md §9's Design Notes; [`Sha512Context`] is the
/// portable implementor this crate ships.
pub trait Hasher: Sized {
    type Output;

    fn init() -> Self;
    fn update(&mut self, data: &[u8]) -> Result<(), CryptoError>;
    fn finalize(self) -> Self::Output;
}

/// An in-progress SHA-512 hash.
///
/// `finalize` consumes the context, so a finalized context cannot be updated
/// again — the type system enforces spec.md §4.8's "any further update
/// fails" rather than a runtime flag check.
#[derive(Zeroize)]
pub struct Sha512Context {
    state: [u64; 8],
    buffer: [u8; BLOCK_BYTES],
    buffered: usize,
    /// Bytes absorbed through the compression function so far. Does not
    /// include the currently buffered tail. Capped so the bit-length suffix
    /// fits in a 64-bit field: `total_length * 8` must not overflow `u64`.
    total_length: u64,
}

impl Default for Sha512Context {
    fn default() -> Self {
        Self::init()
    }
}

impl Hasher for Sha512Context {
    type Output = [u8; 64];

    fn init() -> Self {
        Self {
            state: H0,
            buffer: [0u8; BLOCK_BYTES],
            buffered: 0,
            total_length: 0,
        }
    }

    /// Absorb `data`. If the internal buffer is non-empty, top it up to a
    /// full block and compress it first; then compress as many whole blocks
    /// of `data` as possible directly; any remainder is buffered.
    fn update(&mut self, data: &[u8]) -> Result<(), CryptoError> {
        let added_bits = (data.len() as u64)
            .checked_mul(8)
            .ok_or_else(|| CryptoError::invalid_argument("input too long to hash"))?;
        self.total_length
            .checked_add(self.buffered as u64)
            .and_then(|n| n.checked_mul(8))
            .and_then(|n| n.checked_add(added_bits))
            .ok_or_else(|| {
                CryptoError::invalid_argument(
                    "message length would overflow the 64-bit bit-length counter",
                )
            })?;

        let mut data = data;

        if self.buffered > 0 {
            let needed = BLOCK_BYTES - self.buffered;
            let take = needed.min(data.len());
            self.buffer[self.buffered..self.buffered + take].copy_from_slice(&data[..take]);
            self.buffered += take;
            data = &data[take..];

            if self.buffered == BLOCK_BYTES {
                let block = self.buffer;
                compress(&mut self.state, &block);
                self.total_length += BLOCK_BYTES as u64;
                self.buffered = 0;
            } else {
                return Ok(());
            }
        }

        let whole_blocks = data.len() / BLOCK_BYTES * BLOCK_BYTES;
        if whole_blocks > 0 {
            compress(&mut self.state, &data[..whole_blocks]);
            self.total_length += whole_blocks as u64;
            data = &data[whole_blocks..];
        }

        self.buffer[..data.len()].copy_from_slice(data);
        self.buffered = data.len();

        Ok(())
    }

    /// Pad and compress the final block(s), serialize the state big-endian,
    /// and zero all internal state.
    fn finalize(mut self) -> [u8; 64] {
        let bit_length = (self.total_length + self.buffered as u64) * 8;

        let mut tail = [0u8; BLOCK_BYTES * 2];
        tail[..self.buffered].copy_from_slice(&self.buffer[..self.buffered]);
        tail[self.buffered] = 0x80;

        let pad_to = if self.buffered + 1 <= BLOCK_BYTES - 16 {
            BLOCK_BYTES
        } else {
            BLOCK_BYTES * 2
        };
        tail[pad_to - 16..pad_to - 8].copy_from_slice(&0u64.to_be_bytes());
        tail[pad_to - 8..pad_to].copy_from_slice(&bit_length.to_be_bytes());

        compress(&mut self.state, &tail[..pad_to]);

        let mut out = [0u8; 64];
        for (word, chunk) in self.state.iter().zip(out.chunks_mut(8)) {
            chunk.copy_from_slice(&word.to_be_bytes());
        }

        tail.zeroize();
        self.zeroize();

        out
    }
}

/// One-shot convenience wrapper: init, update once, finalize.
pub fn sha512_digest(data: &[u8]) -> [u8; 64] {
    let mut ctx = Sha512Context::init();
    ctx.update(data).expect("single update cannot overflow the length counter for any in-memory slice");
    ctx.finalize()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_input_matches_known_digest() {
        let digest = sha512_digest(b"");
        assert_eq!(
            hex::encode(digest),
            "cf83e1357eefb8bdf1542850d66d8007d620e4050b5715dc83f4a921d36ce9ce47d0d13c5d85f2b0ff8318d2877eec2f63b931bd47417a81a538327af927da3e"
        );
    }

    #[test]
    fn abc_matches_known_digest() {
        let digest = sha512_digest(b"abc");
        assert_eq!(
            hex::encode(digest),
            "ddaf35a193617abacc417349ae20413112e6fa4e89a97ea20a9eeee64b55d39a2192992a274fc1a836ba3c23a3feebbd454d4423643ce80e2a9ac94fa54ca49f"
        );
    }

    #[test]
    fn one_shot_matches_incremental_across_boundaries() {
        for chunk_size in [1usize, 127, 128, 129, 255] {
            let message: Vec<u8> = (0..1000u32).map(|i| (i % 256) as u8).collect();
            let one_shot = sha512_digest(&message);

            let mut ctx = Sha512Context::init();
            for chunk in message.chunks(chunk_size) {
                ctx.update(chunk).unwrap();
            }
            let incremental = ctx.finalize();

            assert_eq!(one_shot, incremental, "chunk size {chunk_size} mismatched");
        }
    }

    #[test]
    fn million_byte_message_matches_incremental() {
        let message = vec![b'a'; 1_000_000];
        let mut ctx = Sha512Context::init();
        ctx.update(&message).unwrap();
        let digest = ctx.finalize();
        assert_eq!(digest, sha512_digest(&message));
    }

    #[test]
    fn split_update_matches_one_shot() {
        let m1 = b"hello, ".to_vec();
        let m2 = b"forensic world".to_vec();
        let mut combined = m1.clone();
        combined.extend_from_slice(&m2);

        let mut ctx = Sha512Context::init();
        ctx.update(&m1).unwrap();
        ctx.update(&m2).unwrap();
        let incremental = ctx.finalize();

        assert_eq!(incremental, sha512_digest(&combined));
    }
}
