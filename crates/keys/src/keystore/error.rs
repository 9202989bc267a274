//! Keystore backend error types

use thiserror::Error;

/// Errors that can occur in the password-encryption backend
#[derive(Error, Debug)]
pub enum KeystoreError {
    /// MAC verification failed: wrong password or corrupted ciphertext.
    ///
    /// The two causes are deliberately indistinguishable.
    #[error("mac verification failed: wrong password or corrupted data")]
    MacMismatch,

    /// Unrecognized crypto blob format version
    #[error("unsupported crypto format version: {0}")]
    UnsupportedVersion(u32),

    /// Unsupported KDF function
    #[error("unsupported kdf function: {0}")]
    UnsupportedKdf(String),

    /// Unsupported cipher function
    #[error("unsupported cipher function: {0}")]
    UnsupportedCipher(String),

    /// Invalid KDF parameters
    #[error("invalid kdf parameters: {0}")]
    InvalidKdfParams(String),

    /// KDF parameters below the enforced minimum cost floor
    #[error("kdf parameters below minimum cost floor: {0}")]
    WeakKdfParams(String),

    /// Invalid cipher parameters
    #[error("invalid cipher parameters: {0}")]
    InvalidCipherParams(String),

    /// Key derivation failed
    #[error("key derivation failed: {0}")]
    Kdf(String),

    /// Encryption/decryption failed
    #[error("cipher operation failed: {0}")]
    Cipher(String),

    /// Invalid hex encoding
    #[error("invalid hex encoding: {0}")]
    Hex(String),
}

/// Result type for keystore operations
pub type KeystoreResult<T> = Result<T, KeystoreError>;
