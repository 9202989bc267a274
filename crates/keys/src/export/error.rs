//! Export/import error taxonomy
//!
//! Every failure is returned to the immediate caller; the engines never
//! retry, recover, or degrade. Callback failures pass through unchanged in
//! their own variants so callers can tell their own faults from the
//! framework's.

use thiserror::Error;

use crate::keystore::KeystoreError;

/// Errors producing an encrypted key export
#[derive(Error, Debug)]
pub enum ExportError {
    /// Encryption backend fault (bad KDF parameters, cipher failure)
    #[error("key export encryption failed: {0}")]
    Backend(#[from] KeystoreError),

    /// Caller-supplied payload builder failed
    #[error("export payload builder failed: {0}")]
    Builder(String),

    /// Envelope serialization failed
    #[error("serializing key export failed: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Errors recovering a key from an encrypted export
#[derive(Error, Debug)]
pub enum ImportError {
    /// Malformed or unsupported envelope (bad JSON, missing fields,
    /// unrecognized format version)
    #[error("malformed key export: {0}")]
    Parse(String),

    /// The export was produced for a different key type.
    ///
    /// Hard rejection: accepting it would let one key type's export be
    /// misread as another's.
    #[error("key type mismatch: export contains \"{found}\", expected \"{expected}\"")]
    KeyTypeMismatch {
        /// Identifier the importer expected
        expected: String,
        /// Identifier recorded in the export
        found: String,
    },

    /// Wrong password or corrupted ciphertext; the two are indistinguishable
    /// by construction
    #[error("authentication failed: wrong password or corrupted key export")]
    AuthenticationFailed,

    /// Decryption backend fault other than authentication
    #[error("key export decryption failed: {0}")]
    Backend(#[source] KeystoreError),

    /// Caller-supplied constructor failed to rebuild the key
    #[error("key reconstruction failed: {0}")]
    Constructor(String),
}

impl From<KeystoreError> for ImportError {
    fn from(err: KeystoreError) -> Self {
        match err {
            KeystoreError::MacMismatch => ImportError::AuthenticationFailed,
            KeystoreError::UnsupportedVersion(v) => {
                ImportError::Parse(format!("unsupported crypto format version: {}", v))
            }
            other => ImportError::Backend(other),
        }
    }
}
