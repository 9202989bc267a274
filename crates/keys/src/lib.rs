//! Password-encrypted key export/import for heterogeneous key types
//!
//! This crate provides:
//! - Generic export/import engines producing MAC-verified, password-encrypted
//!   JSON envelopes, parameterized per key type by a domain separator and a
//!   pair of builder/constructor callbacks
//! - Per-key-type password domain separation, so a password compromised for
//!   one key type cannot decrypt another type's exports
//! - The encryption backend: scrypt KDF (with an enforced minimum cost
//!   floor), AES-128-CTR, SHA-256 MAC
//! - Two concrete key types consuming the framework: [`csa::CsaKey`]
//!   (Ed25519) and [`evm::EvmKey`] (secp256k1)
//! - Zeroize-on-drop containers for every piece of secret material
//!
//! # Example
//!
//! ```rust
//! use keyport_keys::csa::CsaKey;
//! use keyport_keys::keystore::ScryptParams;
//!
//! let key = CsaKey::generate(&mut rand::thread_rng());
//! let exported = key.to_encrypted_json("correct-password", ScryptParams::FAST)?;
//!
//! let restored = CsaKey::from_encrypted_json(&exported, "correct-password")?;
//! assert_eq!(key.public_key_string(), restored.public_key_string());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod csa;
pub mod error;
pub mod evm;
pub mod export;
pub mod keystore;
pub mod secure;

// Engine and envelope exports
pub use export::{
    from_encrypted_json, to_encrypted_json, Encrypted, EncryptedKeyExport, ExportError,
    ImportError,
};

// Backend exports
pub use keystore::{decrypt_data, encrypt_data, CryptoJson, KeystoreError, ScryptParams};

// Concrete key type exports
pub use csa::CsaKey;
pub use evm::EvmKey;

// Error exports
pub use error::CryptoError;

// Secure memory exports
pub use secure::{IntoSecret, SecretBytes, SecretString};
