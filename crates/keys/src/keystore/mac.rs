//! MAC computation for export integrity
//!
//! The MAC is SHA-256 over `derived_key[16..32] || ciphertext`: verifying it
//! requires the password-derived key, so a single check covers both "wrong
//! password" and "tampered ciphertext" without distinguishing them.

use sha2::{Digest, Sha256};

use super::error::{KeystoreError, KeystoreResult};

/// Compute the MAC over the second half of the derived key and the ciphertext
pub fn compute_mac(derived_key: &[u8], ciphertext: &[u8]) -> KeystoreResult<Vec<u8>> {
    if derived_key.len() < 32 {
        return Err(KeystoreError::InvalidKdfParams(format!(
            "derived key must be at least 32 bytes, got {}",
            derived_key.len()
        )));
    }

    let mut hasher = Sha256::new();
    hasher.update(&derived_key[16..32]);
    hasher.update(ciphertext);

    Ok(hasher.finalize().to_vec())
}

/// Verify a recorded MAC.
///
/// Fails with [`KeystoreError::MacMismatch`] on any difference; the caller
/// cannot tell a wrong password from corruption.
pub fn verify_mac(derived_key: &[u8], ciphertext: &[u8], expected: &[u8]) -> KeystoreResult<()> {
    let computed = compute_mac(derived_key, ciphertext)?;

    if constant_time_eq(&computed, expected) {
        Ok(())
    } else {
        Err(KeystoreError::MacMismatch)
    }
}

/// Constant-time comparison to prevent timing attacks
fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }

    let mut result = 0u8;
    for (x, y) in a.iter().zip(b.iter()) {
        result |= x ^ y;
    }
    result == 0
}
