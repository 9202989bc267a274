//! scrypt key derivation for password-encrypted exports
//!
//! Export-time cost parameters are validated against an explicit minimum
//! floor so no caller can produce an export that is cheap to brute-force.
//! The parameters recorded in an export are reproduced bit-for-bit at import
//! time; the floor applies only when new exports are created.

use serde::{Deserialize, Serialize};

use super::error::{KeystoreError, KeystoreResult};
use crate::secure::SecretBytes;

/// Default scrypt cost for new exports (2^18, interactive-use hostile)
pub const SCRYPT_N_DEFAULT: u32 = 262_144;
/// Default scrypt block size
pub const SCRYPT_R_DEFAULT: u32 = 8;
/// Default scrypt parallelism
pub const SCRYPT_P_DEFAULT: u32 = 1;

/// Minimum cost floor enforced on every export
pub const SCRYPT_MIN_N: u32 = 16_384;
/// Minimum block size enforced on every export
pub const SCRYPT_MIN_R: u32 = 8;
/// Minimum parallelism enforced on every export
pub const SCRYPT_MIN_P: u32 = 1;

/// Derived key length in bytes: 16 for the cipher key, 16 for the MAC key
pub const DK_LEN: usize = 32;

/// Salt length in bytes
pub const SALT_LENGTH: usize = 32;

/// scrypt cost parameters chosen by the exporter.
///
/// `dklen` is not configurable: the backend always derives [`DK_LEN`] bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScryptParams {
    /// CPU/memory cost (must be a power of two)
    pub n: u32,
    /// Block size
    pub r: u32,
    /// Parallelism
    pub p: u32,
}

impl ScryptParams {
    /// Default profile for production exports
    pub const DEFAULT: Self = Self {
        n: SCRYPT_N_DEFAULT,
        r: SCRYPT_R_DEFAULT,
        p: SCRYPT_P_DEFAULT,
    };

    /// Cheapest profile the floor admits; intended for tests and dev tooling
    pub const FAST: Self = Self {
        n: SCRYPT_MIN_N,
        r: SCRYPT_MIN_R,
        p: SCRYPT_MIN_P,
    };

    /// Validate structure and enforce the export-time cost floor
    pub fn validate(&self) -> KeystoreResult<()> {
        if self.n == 0 || (self.n & (self.n - 1)) != 0 {
            return Err(KeystoreError::InvalidKdfParams(
                "n must be a power of 2".to_string(),
            ));
        }
        if self.n < SCRYPT_MIN_N {
            return Err(KeystoreError::WeakKdfParams(format!(
                "n must be at least {}, got {}",
                SCRYPT_MIN_N, self.n
            )));
        }
        if self.r < SCRYPT_MIN_R {
            return Err(KeystoreError::WeakKdfParams(format!(
                "r must be at least {}, got {}",
                SCRYPT_MIN_R, self.r
            )));
        }
        if self.p < SCRYPT_MIN_P {
            return Err(KeystoreError::WeakKdfParams(format!(
                "p must be at least {}, got {}",
                SCRYPT_MIN_P, self.p
            )));
        }
        Ok(())
    }
}

impl Default for ScryptParams {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// KDF parameters as persisted inside an export.
///
/// Everything an importer needs to reproduce the derived key from the
/// password alone. No field has a serde default: a blob missing any of them
/// is rejected at parse time rather than silently patched.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct KdfParams {
    /// Derived key length in bytes
    pub dklen: u32,
    /// CPU/memory cost (power of two)
    pub n: u32,
    /// Block size
    pub r: u32,
    /// Parallelism
    pub p: u32,
    /// Salt as hex string
    pub salt: String,
}

impl KdfParams {
    /// Persistable form of export-time parameters plus a fresh salt
    pub fn new(params: ScryptParams, salt: Vec<u8>) -> Self {
        Self {
            dklen: DK_LEN as u32,
            n: params.n,
            r: params.r,
            p: params.p,
            salt: hex::encode(salt),
        }
    }

    /// Structural validation of recorded parameters.
    ///
    /// Import-side: the cost floor is not re-checked here, only that the
    /// values can drive a derivation at all.
    pub fn validate(&self) -> KeystoreResult<()> {
        if (self.dklen as usize) < DK_LEN {
            return Err(KeystoreError::InvalidKdfParams(format!(
                "dklen must be at least {}, got {}",
                DK_LEN, self.dklen
            )));
        }
        if self.n == 0 || (self.n & (self.n - 1)) != 0 {
            return Err(KeystoreError::InvalidKdfParams(
                "n must be a power of 2".to_string(),
            ));
        }
        if self.r == 0 {
            return Err(KeystoreError::InvalidKdfParams(
                "r must be positive".to_string(),
            ));
        }
        if self.p == 0 {
            return Err(KeystoreError::InvalidKdfParams(
                "p must be positive".to_string(),
            ));
        }
        hex::decode(&self.salt)
            .map_err(|e| KeystoreError::InvalidKdfParams(format!("invalid salt hex: {}", e)))?;
        Ok(())
    }

    /// Reproduce the derived key from the recorded parameters
    pub fn derive_key(&self, password: &str) -> KeystoreResult<SecretBytes> {
        let salt = hex::decode(&self.salt).map_err(|e| KeystoreError::Hex(e.to_string()))?;
        scrypt_derive_key(password, &salt, self.n, self.r, self.p, self.dklen as usize)
    }
}

/// Derive a key from a password using scrypt
pub fn scrypt_derive_key(
    password: &str,
    salt: &[u8],
    n: u32,
    r: u32,
    p: u32,
    dklen: usize,
) -> KeystoreResult<SecretBytes> {
    let log_n = (n as f64).log2() as u8;

    let params = scrypt::Params::new(log_n, r, p, dklen)
        .map_err(|e| KeystoreError::InvalidKdfParams(e.to_string()))?;

    let mut output = vec![0u8; dklen];
    scrypt::scrypt(password.as_bytes(), salt, &params, &mut output)
        .map_err(|e| KeystoreError::Kdf(e.to_string()))?;

    Ok(secrecy::SecretBox::new(Box::new(output)))
}

/// Generate a fresh random salt
pub fn generate_salt() -> Vec<u8> {
    use rand::RngCore;
    let mut salt = vec![0u8; SALT_LENGTH];
    rand::thread_rng().fill_bytes(&mut salt);
    salt
}
