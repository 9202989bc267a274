//! Generic encrypted key export/import engines
//!
//! One pair of engines serves every key type. A concrete type supplies three
//! things and nothing else:
//!
//! - its key-type identifier (a short constant string, e.g. `"CSA"`)
//! - its domain separator: a pure function mixing a type constant into the
//!   password before it reaches the KDF, so a password compromised for one
//!   key type cannot decrypt another type's exports
//! - a payload-builder (export) or constructor (import) callback that maps
//!   between the concrete key and the envelope
//!
//! The engines are stateless free functions with no interior I/O; any number
//! of calls may run concurrently. Raw key material and derived passwords
//! live in zeroize-on-drop containers scoped to a single call.
//!
//! # Example
//!
//! ```rust
//! use keyport_keys::export::{self, EncryptedKeyExport};
//! use keyport_keys::keystore::ScryptParams;
//! use keyport_keys::secure::IntoSecret;
//!
//! let raw = vec![0x42u8; 32].into_secret();
//! let exported = export::to_encrypted_json(
//!     "Demo",
//!     &raw,
//!     &(),
//!     "password",
//!     ScryptParams::FAST,
//!     |password| format!("demokey{}", password),
//!     |id, _key, crypto| Ok(EncryptedKeyExport::new(id, "pub".to_string(), crypto)),
//! )
//! .unwrap();
//!
//! let recovered: Vec<u8> = export::from_encrypted_json(
//!     "Demo",
//!     &exported,
//!     "password",
//!     |password| format!("demokey{}", password),
//!     |_export: &EncryptedKeyExport, raw| Ok(raw.to_vec()),
//! )
//! .unwrap();
//! assert_eq!(recovered, vec![0x42u8; 32]);
//! ```

mod envelope;
mod error;

pub use envelope::{decode, encode, Encrypted, EncryptedKeyExport};
pub use error::{ExportError, ImportError};

use secrecy::ExposeSecret;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::keystore::{self, CryptoJson, ScryptParams};
use crate::secure::{IntoSecret, SecretBytes};

/// Encrypt raw key material into a serialized export envelope.
///
/// `adulterate` is the key type's domain separator; `build` attaches the
/// type-specific public identifier without this engine knowing the type's
/// shape. Backend and builder failures surface unchanged; no partial output
/// is ever returned.
pub fn to_encrypted_json<K, E, B>(
    identifier: &str,
    raw: &SecretBytes,
    key: &K,
    password: &str,
    params: ScryptParams,
    adulterate: fn(&str) -> String,
    build: B,
) -> Result<Vec<u8>, ExportError>
where
    E: Encrypted + Serialize,
    B: FnOnce(&str, &K, CryptoJson) -> Result<E, ExportError>,
{
    tracing::debug!(key_type = identifier, "encrypting key export");

    let effective = adulterate(password).into_secret();
    let crypto = keystore::encrypt_data(raw.expose_secret(), effective.expose_secret(), params)?;

    let export = build(identifier, key, crypto)?;
    encode(&export)
}

/// Recover a concrete key from a serialized export envelope.
///
/// The recorded key type must equal `identifier` before any cryptographic
/// work happens; a mismatch is a hard rejection. A wrong password and a
/// corrupted export both surface as [`ImportError::AuthenticationFailed`].
/// The recovered raw bytes are zeroized when this function returns,
/// whether `construct` succeeded or not.
pub fn from_encrypted_json<K, E, C>(
    identifier: &str,
    exported: &[u8],
    password: &str,
    adulterate: fn(&str) -> String,
    construct: C,
) -> Result<K, ImportError>
where
    E: Encrypted + DeserializeOwned,
    C: FnOnce(&E, &[u8]) -> Result<K, ImportError>,
{
    let export: E = decode(exported)?;

    if export.key_type() != identifier {
        return Err(ImportError::KeyTypeMismatch {
            expected: identifier.to_string(),
            found: export.key_type().to_string(),
        });
    }

    tracing::debug!(key_type = identifier, "decrypting key export");

    let effective = adulterate(password).into_secret();
    let raw = keystore::decrypt_data(export.crypto(), effective.expose_secret())?;

    construct(&export, raw.expose_secret())
}

#[cfg(test)]
mod tests {
    use super::*;

    // Minimal key type standing in for a concrete consumer
    #[derive(Debug, Clone, PartialEq)]
    struct TestKey(Vec<u8>);

    const TEST_KEY_TYPE: &str = "Test";

    fn test_adulterate(password: &str) -> String {
        format!("testkey{}", password)
    }

    fn export_test_key(key: &TestKey, password: &str) -> Vec<u8> {
        to_encrypted_json(
            TEST_KEY_TYPE,
            &key.0.clone().into_secret(),
            key,
            password,
            ScryptParams::FAST,
            test_adulterate,
            |id, _key, crypto| {
                Ok(EncryptedKeyExport::new(id, "test-public".to_string(), crypto))
            },
        )
        .unwrap()
    }

    fn import_test_key(exported: &[u8], password: &str) -> Result<TestKey, ImportError> {
        from_encrypted_json(
            TEST_KEY_TYPE,
            exported,
            password,
            test_adulterate,
            |_export: &EncryptedKeyExport, raw| Ok(TestKey(raw.to_vec())),
        )
    }

    #[test]
    fn test_round_trip() {
        let key = TestKey(vec![0x42; 32]);
        let exported = export_test_key(&key, "password");

        let recovered = import_test_key(&exported, "password").unwrap();
        assert_eq!(recovered, key);
    }

    #[test]
    fn test_wrong_password_is_authentication_failure() {
        let exported = export_test_key(&TestKey(vec![0x01; 32]), "correct");

        let result = import_test_key(&exported, "wrong");
        assert!(matches!(result, Err(ImportError::AuthenticationFailed)));
    }

    #[test]
    fn test_key_type_mismatch_rejected_before_decryption() {
        let exported = export_test_key(&TestKey(vec![0x01; 32]), "password");

        // Expecting a different identifier, with the *correct* password
        let result: Result<TestKey, _> = from_encrypted_json(
            "Other",
            &exported,
            "password",
            test_adulterate,
            |_export: &EncryptedKeyExport, raw| Ok(TestKey(raw.to_vec())),
        );
        match result {
            Err(ImportError::KeyTypeMismatch { expected, found }) => {
                assert_eq!(expected, "Other");
                assert_eq!(found, TEST_KEY_TYPE);
            }
            other => panic!("expected KeyTypeMismatch, got {:?}", other.err()),
        }
    }

    #[test]
    fn test_builder_failure_surfaces_unchanged() {
        let key = TestKey(vec![0x05; 32]);
        let result = to_encrypted_json(
            TEST_KEY_TYPE,
            &key.0.clone().into_secret(),
            &key,
            "password",
            ScryptParams::FAST,
            test_adulterate,
            |_id, _key: &TestKey, _crypto| -> Result<EncryptedKeyExport, ExportError> {
                Err(ExportError::Builder("no public identifier".to_string()))
            },
        );
        assert!(matches!(result, Err(ExportError::Builder(_))));
    }

    #[test]
    fn test_constructor_failure_surfaces_unchanged() {
        let exported = export_test_key(&TestKey(vec![0x06; 32]), "password");

        let result: Result<TestKey, _> = from_encrypted_json(
            TEST_KEY_TYPE,
            &exported,
            "password",
            test_adulterate,
            |_export: &EncryptedKeyExport, _raw| {
                Err(ImportError::Constructor("bad key length".to_string()))
            },
        );
        assert!(matches!(result, Err(ImportError::Constructor(_))));
    }

    #[test]
    fn test_weak_params_rejected() {
        let key = TestKey(vec![0x07; 32]);
        let result = to_encrypted_json(
            TEST_KEY_TYPE,
            &key.0.clone().into_secret(),
            &key,
            "password",
            ScryptParams { n: 2, r: 1, p: 1 },
            test_adulterate,
            |id, _key, crypto| {
                Ok(EncryptedKeyExport::new(id, "test-public".to_string(), crypto))
            },
        );
        assert!(matches!(result, Err(ExportError::Backend(_))));
    }

    #[test]
    fn test_malformed_input_is_parse_error() {
        for bad in [&b"{"[..], &b"[1,2,3]"[..], &[0xFF, 0xFE][..]] {
            let result = import_test_key(bad, "password");
            assert!(matches!(result, Err(ImportError::Parse(_))));
        }
    }

    #[test]
    fn test_two_exports_of_same_key_differ() {
        let key = TestKey(vec![0x09; 32]);
        let a = export_test_key(&key, "password");
        let b = export_test_key(&key, "password");
        // Fresh salt and IV per call
        assert_ne!(a, b);
    }
}
