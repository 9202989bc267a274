//! EVM key: the network-specific secp256k1 key
//!
//! Raw form is the 32-byte scalar; the public identifier recorded in exports
//! is the checksummed EVM address (`keccak256(uncompressed_pubkey[1..])[12..]`).
//! Unlike Ed25519 seeds, not every 32-byte string is a valid scalar, so
//! reconstruction can genuinely fail.

use alloy_primitives::{keccak256, Address};
use k256::ecdsa::signature::{Signer, Verifier};
use k256::ecdsa::{Signature, SigningKey, VerifyingKey};
use k256::elliptic_curve::sec1::ToEncodedPoint;
use k256::SecretKey as K256SecretKey;
use rand::{CryptoRng, RngCore};
use zeroize::Zeroizing;

use crate::error::CryptoError;
use crate::export::{self, EncryptedKeyExport, ExportError, ImportError};
use crate::keystore::ScryptParams;
use crate::secure::{IntoSecret, SecretBytes};

/// Identifier recorded in every EVM export
pub const KEY_TYPE: &str = "EVM";

/// Raw scalar length in bytes
pub const RAW_LENGTH: usize = 32;

/// Domain separator: mixes the EVM type constant into the password before it
/// reaches the KDF.
pub fn adulterated_password(password: &str) -> String {
    format!("evmkey{}", password)
}

/// Network-specific secp256k1 key
#[derive(Clone)]
pub struct EvmKey(K256SecretKey);

impl EvmKey {
    /// Generate a new random key
    pub fn generate<R: CryptoRng + RngCore>(rng: &mut R) -> Self {
        Self(K256SecretKey::random(rng))
    }

    /// Rebuild a key from its raw scalar bytes.
    ///
    /// Fails on a wrong length and on byte strings that are not valid
    /// scalars (zero, or at least the group order).
    pub fn from_raw(raw: &[u8]) -> Result<Self, CryptoError> {
        if raw.len() != RAW_LENGTH {
            return Err(CryptoError::InvalidKeyLength {
                expected: RAW_LENGTH,
                actual: raw.len(),
            });
        }
        K256SecretKey::from_slice(raw)
            .map(Self)
            .map_err(|_| CryptoError::InvalidSecretKey)
    }

    /// Raw scalar bytes, zeroized on drop
    pub fn raw(&self) -> SecretBytes {
        // The intermediate stack copy is wiped too
        let scalar = Zeroizing::new(<[u8; RAW_LENGTH]>::from(self.0.to_bytes()));
        scalar.to_vec().into_secret()
    }

    /// The EVM address derived from the public key
    pub fn address(&self) -> Address {
        let uncompressed = self.0.public_key().to_encoded_point(false);
        let hash = keccak256(&uncompressed.as_bytes()[1..]);
        Address::from_slice(&hash[12..])
    }

    /// Checksummed address string; the export's public identifier
    pub fn public_key_string(&self) -> String {
        self.address().to_checksum(None)
    }

    /// Sign a message (keccak256-hashed first, EVM style)
    pub fn sign(&self, msg: &[u8]) -> Signature {
        let signing_key = SigningKey::from(&self.0);
        let digest = keccak256(msg);
        signing_key.sign(digest.as_slice())
    }

    /// Verify a signature against this key's public key
    pub fn verify(&self, msg: &[u8], signature: &Signature) -> bool {
        let verifying_key = VerifyingKey::from(self.0.public_key());
        let digest = keccak256(msg);
        verifying_key.verify(digest.as_slice(), signature).is_ok()
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
            |id, key: &EvmKey, crypto| {
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

impl std::fmt::Debug for EvmKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EvmKey")
            .field("address", &self.address())
            .field("secret", &"[REDACTED]")
            .finish()
    }
}
