//! The `crypto` blob of an export and the encrypt/decrypt entry points
//!
//! [`CryptoJson`] is the opaque payload the export envelope carries: cipher
//! name, ciphertext, IV, KDF name and parameters, MAC, and a format version.
//! [`encrypt_data`] and [`decrypt_data`] are the only two operations the
//! export/import engines invoke on this module.

use secrecy::ExposeSecret;
use serde::{Deserialize, Serialize};

use super::cipher::{decrypt_secret, encrypt_secret, generate_iv};
use super::error::{KeystoreError, KeystoreResult};
use super::kdf::{generate_salt, scrypt_derive_key, KdfParams, ScryptParams, DK_LEN};
use super::mac::{compute_mac, verify_mac};
use crate::secure::SecretBytes;

/// Format version written into every new crypto blob
pub const CRYPTO_VERSION: u32 = 1;

/// Cipher identifier recorded in the blob
pub const CIPHER_AES_128_CTR: &str = "aes-128-ctr";

/// KDF identifier recorded in the blob
pub const KDF_SCRYPT: &str = "scrypt";

/// Password-encryption payload persisted inside an export envelope.
///
/// Every field is required at parse time; a blob missing its KDF parameters
/// or MAC is malformed, never defaulted.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CryptoJson {
    /// Cipher identifier (e.g. "aes-128-ctr")
    pub cipher: String,
    /// Ciphertext as hex string
    pub ciphertext: String,
    /// Cipher parameters
    pub cipherparams: CipherParams,
    /// KDF identifier (e.g. "scrypt")
    pub kdf: String,
    /// KDF cost parameters and salt
    pub kdfparams: KdfParams,
    /// MAC over the derived key and ciphertext, as hex string
    pub mac: String,
    /// Blob format version
    pub version: u32,
}

/// Cipher parameters
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CipherParams {
    /// Initialization vector as hex string
    pub iv: String,
}

/// Encrypt raw key material under a password.
///
/// Validates `params` against the cost floor, generates a fresh salt and IV,
/// derives the key, encrypts, and MACs. Salt and IV are never accepted from
/// the caller, so no two exports share randomness.
pub fn encrypt_data(
    plaintext: &[u8],
    password: &str,
    params: ScryptParams,
) -> KeystoreResult<CryptoJson> {
    params.validate()?;

    let salt = generate_salt();
    let iv = generate_iv();

    let derived_key = scrypt_derive_key(password, &salt, params.n, params.r, params.p, DK_LEN)?;
    let dk = derived_key.expose_secret();

    let ciphertext = encrypt_secret(plaintext, dk, &iv)?;
    let mac = compute_mac(dk, &ciphertext)?;

    Ok(CryptoJson {
        cipher: CIPHER_AES_128_CTR.to_string(),
        ciphertext: hex::encode(&ciphertext),
        cipherparams: CipherParams {
            iv: hex::encode(&iv),
        },
        kdf: KDF_SCRYPT.to_string(),
        kdfparams: KdfParams::new(params, salt),
        mac: hex::encode(&mac),
        version: CRYPTO_VERSION,
    })
}

/// Decrypt a crypto blob under a password.
///
/// The MAC is verified before any plaintext is produced; a wrong password
/// and a corrupted blob are the same [`KeystoreError::MacMismatch`].
pub fn decrypt_data(crypto: &CryptoJson, password: &str) -> KeystoreResult<SecretBytes> {
    if crypto.version != CRYPTO_VERSION {
        return Err(KeystoreError::UnsupportedVersion(crypto.version));
    }
    if crypto.kdf != KDF_SCRYPT {
        return Err(KeystoreError::UnsupportedKdf(crypto.kdf.clone()));
    }
    if crypto.cipher != CIPHER_AES_128_CTR {
        return Err(KeystoreError::UnsupportedCipher(crypto.cipher.clone()));
    }
    crypto.kdfparams.validate()?;

    let derived_key = crypto.kdfparams.derive_key(password)?;
    let dk = derived_key.expose_secret();

    let ciphertext = hex::decode(&crypto.ciphertext)
        .map_err(|e| KeystoreError::Hex(format!("invalid ciphertext hex: {}", e)))?;
    let expected_mac = hex::decode(&crypto.mac)
        .map_err(|e| KeystoreError::Hex(format!("invalid mac hex: {}", e)))?;

    verify_mac(dk, &ciphertext, &expected_mac)?;

    let iv = hex::decode(&crypto.cipherparams.iv)
        .map_err(|e| KeystoreError::Hex(format!("invalid iv hex: {}", e)))?;

    decrypt_secret(&ciphertext, dk, &iv)
}
