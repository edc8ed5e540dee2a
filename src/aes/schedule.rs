//! The KeyExpansion routine defined in Section 5.2 of the AES specification,
//! and its decryption-schedule derivation described in spec.md §4.1.

use {
    super::tables::{MAX_EXPANSION_BYTES, NB, RCON, S_BOX, WORD_SIZE},
    crate::error::CryptoError,
};

/// A prepared key schedule, sized for the largest supported key (256 bits).
/// Only the first `(rounds + 1) * 16` bytes are meaningful; the remainder is
/// unused padding kept at zero so the type has a fixed size regardless of key
/// size.
pub(crate) type Schedule = [u8; MAX_EXPANSION_BYTES];

/// Key-size-dependent parameters: number of 32-bit words in the key (`Nk`)
/// and number of rounds (`Nr`).
pub(crate) fn key_size_params(key_bits: u32) -> Result<(usize, u8), CryptoError> {
    match key_bits {
        128 => Ok((4, 10)),
        192 => Ok((6, 12)),
        256 => Ok((8, 14)),
        other => Err(CryptoError::invalid_argument(format!(
            "unsupported AES key bit size {other}, expected 128, 192, or 256"
        ))),
    }
}

/// Expand `key` into the encryption schedule, following the KeyExpansion
/// routine in Section 5.2 of the AES specification.
///
/// The user key fills the first `Nk` words. Subsequent words are the XOR of
/// the word `Nk` positions earlier with the previous word, except every
/// `Nk`-th word first passes through RotWord → SubWord → XOR Rcon, and for
/// 256-bit keys an additional SubWord is applied at the `Nk/2` offset.
pub(crate) fn expand_encryption_schedule(
    key: &[u8],
    key_bits: u32,
) -> Result<(Schedule, u8), CryptoError> {
    let (nk, rounds) = key_size_params(key_bits)?;
    if key.len() != usize::try_from(key_bits / 8).unwrap() {
        return Err(CryptoError::invalid_argument(format!(
            "key is {} bytes, expected {} for a {key_bits}-bit key",
            key.len(),
            key_bits / 8
        )));
    }

    let mut w = [0u8; MAX_EXPANSION_BYTES];
    w[..nk * WORD_SIZE].copy_from_slice(key);

    let total_words = NB * (usize::from(rounds) + 1);
    for i in nk..total_words {
        let mut temp = [0u8; WORD_SIZE];
        temp.copy_from_slice(&w[(i - 1) * WORD_SIZE..i * WORD_SIZE]);
        if i % nk == 0 {
            rot_word(&mut temp);
            sub_word(&mut temp);
            temp[0] ^= RCON[i / nk];
        } else if nk > 6 && i % nk == 4 {
            sub_word(&mut temp);
        }
        for j in 0..WORD_SIZE {
            w[i * WORD_SIZE + j] = w[(i - nk) * WORD_SIZE + j];
        }
        w[i * WORD_SIZE..(i + 1) * WORD_SIZE]
            .iter_mut()
            .zip(temp)
            .for_each(|(w, t)| *w ^= t);
    }

    Ok((w, rounds))
}

/// Derive the decryption schedule from the encryption schedule, following
/// the Equivalent Inverse Cipher key schedule described in Section 5.3.5 of
/// the AES specification and spec.md §4.1.
///
/// `dw[0] = w[Nr]`, `dw[Nr] = w[0]`, and `dw[i] = InvMixColumns(w[Nr - i])`
/// for `0 < i < Nr`. Consuming `dw` in round order during decryption is
/// equivalent to consuming `w` in reverse order with InvMixColumns applied
/// to the state instead of the key.
pub(crate) fn derive_decryption_schedule(enc: &Schedule, rounds: u8) -> Schedule {
    use super::block::inv_mix_columns;

    let rounds = usize::from(rounds);
    let mut dw = [0u8; MAX_EXPANSION_BYTES];
    let round_bytes = NB * WORD_SIZE;

    dw[..round_bytes].copy_from_slice(&enc[rounds * round_bytes..(rounds + 1) * round_bytes]);
    dw[rounds * round_bytes..(rounds + 1) * round_bytes].copy_from_slice(&enc[..round_bytes]);

    for i in 1..rounds {
        let src = rounds - i;
        let mut block = [0u8; 16];
        block.copy_from_slice(&enc[src * round_bytes..(src + 1) * round_bytes]);
        inv_mix_columns(&mut block);
        dw[i * round_bytes..(i + 1) * round_bytes].copy_from_slice(&block);
    }

    dw
}

/// The RotWord function defined in Section 5.2 of the AES specification.
///
/// Rotates the byte array left by one index.
fn rot_word(word: &mut [u8; WORD_SIZE]) {
    word.rotate_left(1);
}

/// The SubWord function defined in Section 5.2 of the AES specification.
///
/// Applies the [S-box](S_BOX) to every byte of the word.
fn sub_word(word: &mut [u8; WORD_SIZE]) {
    for b in word.iter_mut() {
        *b = S_BOX[usize::from(*b)];
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_unsupported_key_bit_size() {
        assert!(key_size_params(64).is_err());
        assert!(key_size_params(512).is_err());
    }

    #[test]
    fn rejects_mismatched_key_length() {
        let key = [0u8; 15];
        assert!(expand_encryption_schedule(&key, 128).is_err());
    }

    #[test]
    fn fips197_appendix_a1_key_expansion() {
        // FIPS 197 Appendix A.1, first few and last round key words for a
        // 128-bit key.
        let key = hex::decode("000102030405060708090a0b0c0d0e0f").unwrap();
        let (w, rounds) = expand_encryption_schedule(&key, 128).unwrap();
        assert_eq!(rounds, 10);
        assert_eq!(&w[0..4], &[0x00, 0x01, 0x02, 0x03]);
        assert_eq!(&w[4..8], &[0x04, 0x05, 0x06, 0x07]);
        // w[43] (last word of the last round key), from FIPS 197 Appendix A.1.
        assert_eq!(&w[43 * 4..43 * 4 + 4], &[0xb6, 0x63, 0x0c, 0xa6]);
    }
}
