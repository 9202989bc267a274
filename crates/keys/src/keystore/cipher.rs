//! AES-128-CTR encryption of raw key material
//!
//! CTR mode keeps ciphertext the same length as the plaintext and needs no
//! padding, so exports do not leak rounded-up key sizes. Confidentiality
//! only; integrity comes from the MAC computed over the ciphertext.

use aes::Aes128;
use cipher::{KeyIvInit, StreamCipher};
use ctr::Ctr128BE;

use super::error::{KeystoreError, KeystoreResult};
use crate::secure::SecretBytes;

/// IV length for AES-128-CTR
pub const IV_LENGTH: usize = 16;

/// AES-128 key length; the cipher key is the first half of the derived key
pub const AES_KEY_LENGTH: usize = 16;

type Aes128Ctr = Ctr128BE<Aes128>;

fn keystream(data: &mut [u8], derived_key: &[u8], iv: &[u8]) -> KeystoreResult<()> {
    if derived_key.len() < AES_KEY_LENGTH {
        return Err(KeystoreError::InvalidCipherParams(format!(
            "cipher key must be at least {} bytes, got {}",
            AES_KEY_LENGTH,
            derived_key.len()
        )));
    }
    if iv.len() != IV_LENGTH {
        return Err(KeystoreError::InvalidCipherParams(format!(
            "iv must be {} bytes, got {}",
            IV_LENGTH,
            iv.len()
        )));
    }

    let key: [u8; AES_KEY_LENGTH] = derived_key[..AES_KEY_LENGTH]
        .try_into()
        .map_err(|_| KeystoreError::Cipher("key conversion failed".to_string()))?;
    let iv_arr: [u8; IV_LENGTH] = iv
        .try_into()
        .map_err(|_| KeystoreError::Cipher("iv conversion failed".to_string()))?;

    let mut cipher = Aes128Ctr::new(&key.into(), &iv_arr.into());
    cipher.apply_keystream(data);
    Ok(())
}

/// Encrypt raw key material under the first half of the derived key
pub fn encrypt_secret(secret: &[u8], derived_key: &[u8], iv: &[u8]) -> KeystoreResult<Vec<u8>> {
    let mut ciphertext = secret.to_vec();
    keystream(&mut ciphertext, derived_key, iv)?;
    Ok(ciphertext)
}

/// Decrypt ciphertext back into raw key material.
///
/// Returns [`SecretBytes`] so the recovered plaintext is zeroized once the
/// caller is done with it.
pub fn decrypt_secret(
    ciphertext: &[u8],
    derived_key: &[u8],
    iv: &[u8],
) -> KeystoreResult<SecretBytes> {
    let mut plaintext = ciphertext.to_vec();
    keystream(&mut plaintext, derived_key, iv)?;
    Ok(secrecy::SecretBox::new(Box::new(plaintext)))
}

/// Generate a fresh random IV
pub fn generate_iv() -> Vec<u8> {
    use rand::RngCore;
    let mut iv = vec![0u8; IV_LENGTH];
    rand::thread_rng().fill_bytes(&mut iv);
    iv
}
