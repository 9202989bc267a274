//! Encrypted-export envelope and its JSON codec
//!
//! The wire format is a JSON object carrying the key-type identifier, the
//! type-specific public identifier, and the opaque crypto blob:
//!
//! ```json
//! {
//!   "keyType": "CSA",
//!   "publicKey": "…",
//!   "crypto": { "cipher": "aes-128-ctr", "ciphertext": "…", … }
//! }
//! ```
//!
//! [`EncryptedKeyExport`] is the standard envelope; key types needing extra
//! public fields can define their own envelope struct and implement
//! [`Encrypted`], which is all the engines require.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use super::error::{ExportError, ImportError};
use crate::keystore::CryptoJson;

/// Capability the import engine needs from any envelope type: the recorded
/// key-type identifier and the crypto blob to decrypt.
pub trait Encrypted {
    /// Key-type identifier recorded in the envelope
    fn key_type(&self) -> &str;

    /// The password-encryption payload
    fn crypto(&self) -> &CryptoJson;
}

/// Standard encrypted-export envelope
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct EncryptedKeyExport {
    /// Key-type identifier, validated on import
    #[serde(rename = "keyType")]
    pub key_type: String,
    /// Type-specific public identifier (public key hex, address, …)
    #[serde(rename = "publicKey")]
    pub public_key: String,
    /// Encryption payload
    pub crypto: CryptoJson,
}

impl EncryptedKeyExport {
    /// Assemble an envelope from its parts
    pub fn new(key_type: &str, public_key: String, crypto: CryptoJson) -> Self {
        Self {
            key_type: key_type.to_string(),
            public_key,
            crypto,
        }
    }
}

impl Encrypted for EncryptedKeyExport {
    fn key_type(&self) -> &str {
        &self.key_type
    }

    fn crypto(&self) -> &CryptoJson {
        &self.crypto
    }
}

/// Serialize an envelope to its wire bytes. All-or-nothing.
pub fn encode<E: Serialize>(envelope: &E) -> Result<Vec<u8>, ExportError> {
    Ok(serde_json::to_vec(envelope)?)
}

/// Parse wire bytes into an envelope.
///
/// Malformed JSON and missing required fields both fail with
/// [`ImportError::Parse`]; no security-relevant field is ever defaulted.
pub fn decode<E: DeserializeOwned>(bytes: &[u8]) -> Result<E, ImportError> {
    serde_json::from_slice(bytes).map_err(|e| ImportError::Parse(e.to_string()))
}
