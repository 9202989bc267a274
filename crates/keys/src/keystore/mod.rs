//! Password-encryption backend for key exports
//!
//! Implements the `encrypt(plaintext, password, params) -> CryptoJson` /
//! `decrypt(&CryptoJson, password) -> plaintext` capability the export and
//! import engines consume:
//!
//! - scrypt key derivation with an enforced minimum cost floor
//! - AES-128-CTR encryption under the first half of the derived key
//! - SHA-256 MAC over the second half of the derived key and the ciphertext
//!
//! # Security Properties
//!
//! - Fresh salt and IV are generated inside every encrypt call; callers
//!   cannot supply or reuse randomness
//! - The MAC binds the ciphertext to the password-derived key, so a wrong
//!   password and a corrupted blob fail identically
//! - Derived keys and recovered plaintext only exist inside zeroize-on-drop
//!   containers

mod cipher;
mod crypto_json;
mod error;
mod kdf;
mod mac;

pub use cipher::{decrypt_secret, encrypt_secret, generate_iv, AES_KEY_LENGTH, IV_LENGTH};
pub use crypto_json::{
    decrypt_data, encrypt_data, CipherParams, CryptoJson, CIPHER_AES_128_CTR, CRYPTO_VERSION,
    KDF_SCRYPT,
};
pub use error::{KeystoreError, KeystoreResult};
pub use kdf::{
    generate_salt, scrypt_derive_key, KdfParams, ScryptParams, DK_LEN, SALT_LENGTH, SCRYPT_MIN_N,
    SCRYPT_MIN_P, SCRYPT_MIN_R,
};
pub use mac::{compute_mac, verify_mac};
