//! Key-material error types

use thiserror::Error;

/// Errors validating raw key material for the concrete key types
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CryptoError {
    /// Bytes do not encode a valid secret key for the curve
    #[error("invalid secret key bytes")]
    InvalidSecretKey,

    /// Wrong number of raw bytes
    #[error("invalid secret key length: expected {expected}, got {actual}")]
    InvalidKeyLength {
        /// Required raw length
        expected: usize,
        /// Length actually supplied
        actual: usize,
    },
}
