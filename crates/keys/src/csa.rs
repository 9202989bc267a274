//! CSA key: the general-purpose Ed25519 signing key
//!
//! Raw form is the 32-byte Ed25519 seed; the public identifier recorded in
//! exports is the hex-encoded verification key.

use ed25519_consensus::{Signature, SigningKey, VerificationKey};
use rand::{CryptoRng, RngCore};
use zeroize::Zeroizing;

use crate::error::CryptoError;
use crate::export::{self, EncryptedKeyExport, ExportError, ImportError};
use crate::keystore::ScryptParams;
use crate::secure::{IntoSecret, SecretBytes};

/// Identifier recorded in every CSA export
pub const KEY_TYPE: &str = "CSA";

/// Raw seed length in bytes
pub const RAW_LENGTH: usize = 32;

/// Domain separator: mixes the CSA type constant into the password before it
/// reaches the KDF, so a CSA export password cannot decrypt other key types.
pub fn adulterated_password(password: &str) -> String {
    format!("csakey{}", password)
}

/// General-purpose Ed25519 signing key
#[derive(Clone)]
pub struct CsaKey(SigningKey);

impl CsaKey {
    /// Generate a new random key
    pub fn generate<R: CryptoRng + RngCore>(rng: &mut R) -> Self {
        let mut seed = [0u8; RAW_LENGTH];
        rng.fill_bytes(&mut seed);
        Self(SigningKey::from(seed))
    }

    /// Rebuild a key from its raw seed bytes
    pub fn from_raw(raw: &[u8]) -> Result<Self, CryptoError> {
        let seed: [u8; RAW_LENGTH] =
            raw.try_into().map_err(|_| CryptoError::InvalidKeyLength {
                expected: RAW_LENGTH,
                actual: raw.len(),
            })?;
        Ok(Self(SigningKey::from(seed)))
    }

    /// Raw seed bytes, zeroized on drop
    pub fn raw(&self) -> SecretBytes {
        // The intermediate stack copy is wiped too
        let seed = Zeroizing::new(self.0.to_bytes());
        seed.to_vec().into_secret()
    }

    /// The verification key
    pub fn public_key(&self) -> VerificationKey {
        self.0.verification_key()
    }

    /// Hex-encoded verification key; the export's public identifier
    pub fn public_key_string(&self) -> String {
        hex::encode(self.0.verification_key().to_bytes())
    }

    /// Sign a message
    pub fn sign(&self, msg: &[u8]) -> Signature {
        self.0.sign(msg)
    }

    /// Export this key as a password-encrypted JSON envelope
    pub fn to_encrypted_json(
        &self,
        password: &str,
        params: ScryptParams,
    ) -> Result<Vec<u8>, ExportError> {
        export::to_encrypted_json(
            KEY_TYPE,
            &self.raw(),
            self,
            password,
            params,
            adulterated_password,
            |id, key: &CsaKey, crypto| {
                Ok(EncryptedKeyExport::new(id, key.public_key_string(), crypto))
            },
        )
    }

    /// Recover a key from a password-encrypted JSON envelope
    pub fn from_encrypted_json(exported: &[u8], password: &str) -> Result<Self, ImportError> {
        export::from_encrypted_json(
            KEY_TYPE,
            exported,
            password,
            adulterated_password,
            |_export: &EncryptedKeyExport, raw| {
                Self::from_raw(raw).map_err(|e| ImportError::Constructor(e.to_string()))
            },
        )
    }
}

impl std::fmt::Debug for CsaKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CsaKey")
            .field("public_key", &self.public_key_string())
            .field("secret", &"[REDACTED]")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;

    #[test]
    fn test_from_raw_roundtrip() {
        let key = CsaKey::generate(&mut rand::thread_rng());
        let raw = key.raw();

        let restored = CsaKey::from_raw(raw.expose_secret()).unwrap();
        assert_eq!(key.public_key_string(), restored.public_key_string());
    }

    #[test]
    fn test_from_raw_wrong_length() {
        let result = CsaKey::from_raw(&[0x01; 20]);
        assert_eq!(
            result.err(),
            Some(CryptoError::InvalidKeyLength {
                expected: 32,
                actual: 20
            })
        );
    }

    #[test]
    fn test_encrypted_json_roundtrip() {
        let key = CsaKey::generate(&mut rand::thread_rng());
        let exported = key.to_encrypted_json("password", ScryptParams::FAST).unwrap();

        let restored = CsaKey::from_encrypted_json(&exported, "password").unwrap();
        assert_eq!(
            key.raw().expose_secret(),
            restored.raw().expose_secret()
        );

        // The re-imported key still signs correctly
        let msg = b"post-import signing check";
        let sig = restored.sign(msg);
        assert!(key.public_key().verify(&sig, msg).is_ok());
    }

    #[test]
    fn test_export_records_identifier_and_public_key() {
        let key = CsaKey::generate(&mut rand::thread_rng());
        let exported = key.to_encrypted_json("password", ScryptParams::FAST).unwrap();

        let value: serde_json::Value = serde_json::from_slice(&exported).unwrap();
        assert_eq!(value["keyType"], KEY_TYPE);
        assert_eq!(value["publicKey"], key.public_key_string());
    }

    #[test]
    fn test_wrong_password_fails() {
        let key = CsaKey::generate(&mut rand::thread_rng());
        let exported = key.to_encrypted_json("correct", ScryptParams::FAST).unwrap();

        let result = CsaKey::from_encrypted_json(&exported, "wrong");
        assert!(matches!(result, Err(ImportError::AuthenticationFailed)));
    }

    #[test]
    fn test_adulterated_password_prefix() {
        assert_eq!(adulterated_password("secret"), "csakeysecret");
    }

    #[test]
    fn test_debug_redacts_secret() {
        let key = CsaKey::generate(&mut rand::thread_rng());
        let debug = format!("{:?}", key);
        assert!(debug.contains("[REDACTED]"));
        let raw_hex = hex::encode(key.raw().expose_secret());
        assert!(!debug.contains(&raw_hex));
    }
}
