//! End-to-end test vectors from spec.md §8: NIST SP 800-38A (AES-ECB/CBC),
//! IEEE 1619 (AES-XTS), FIPS 180-4 (SHA-512), and RFC 4231 (HMAC-SHA-512).

use forensic_crypto_core::{
    aes::{AesContext, Cbc, Direction, Ecb, TweakedAesContext, Xts},
    sha512::{hmac_sha512, sha512_digest, Hasher, Sha512Context},
};

#[test]
fn aes_ecb_128_sp800_38a() {
    let key = hex::decode("2b7e151628aed2a6abf7158809cf4f3c").unwrap();
    let plaintext = hex::decode("6bc1bee22e409f96e93d7e117393172a").unwrap();
    let expected = hex::decode("3ad77bb40d7a3660a89ecaf32466ef97").unwrap();

    let ctx = AesContext::new(Direction::Encrypt, &key, 128).unwrap();
    let mut ciphertext = vec![0u8; plaintext.len()];
    Ecb::crypt(&ctx, &plaintext, &mut ciphertext).unwrap();

    assert_eq!(ciphertext, expected);
}

#[test]
fn aes_cbc_128_sp800_38a() {
    let key = hex::decode("2b7e151628aed2a6abf7158809cf4f3c").unwrap();
    let iv = hex::decode("000102030405060708090a0b0c0d0e0f").unwrap();
    let plaintext =
        hex::decode("6bc1bee22e409f96e93d7e117393172aae2d8a571e03ac9c9eb76fac45af8e51").unwrap();
    let expected =
        hex::decode("7649abac8119b246cee98e9b12e9197d5086cb9b507219ee95db113a917678b2").unwrap();

    let ctx = AesContext::new(Direction::Encrypt, &key, 128).unwrap();
    let mut buf = plaintext.clone();
    Cbc::crypt(&ctx, &iv, &mut buf).unwrap();

    assert_eq!(buf, expected);
}

#[test]
fn aes_xts_128_ieee1619_vector_1() {
    let data_key = [0u8; 16];
    let tweak_key = [0u8; 16];
    let tweak = [0u8; 16];
    let plaintext = [0u8; 32];
    let expected =
        hex::decode("917cf69ebd68b2ec9b9fe9a3eadda692cd43d2f59598ed858c02c2652fbf922e").unwrap();

    let ctx = TweakedAesContext::new(Direction::Encrypt, &data_key, &tweak_key, 128).unwrap();
    let mut ciphertext = vec![0u8; plaintext.len()];
    Xts::crypt(&ctx, &tweak, &plaintext, &mut ciphertext).unwrap();

    assert_eq!(ciphertext, expected);
}

#[test]
fn sha512_empty_string() {
    let digest = sha512_digest(b"");
    assert_eq!(
        hex::encode(digest),
        "cf83e1357eefb8bdf1542850d66d8007d620e4050b5715dc83f4a921d36ce9ce47d0d13c5d85f2b0ff8318d2877eec2f63b931bd47417a81a538327af927da3e"
    );
}

#[test]
fn sha512_abc() {
    let mut ctx = Sha512Context::init();
    ctx.update(b"abc").unwrap();
    let digest = ctx.finalize();
    assert_eq!(
        hex::encode(digest),
        "ddaf35a193617abacc417349ae20413112e6fa4e89a97ea20a9eeee64b55d39a2192992a274fc1a836ba3c23a3feebbd454d4423643ce80e2a9ac94fa54ca49f"
    );
}

#[test]
fn hmac_sha512_rfc4231_test_case_1() {
    let key = [0x0bu8; 20];
    let mac = hmac_sha512(&key, b"Hi There");
    assert_eq!(
        hex::encode(mac),
        "87aa7cdea5ef619d4ff0b4241a1d6cb02379f4e2ce4ec2787ad0b30545e17cdedaa833b7d6b8a702038b274eaea3f4e4be9d914eeb61f1702e696c203a126854"
    );
}
