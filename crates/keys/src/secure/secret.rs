//! Secret wrapper utilities for consistent secret handling
//!
//! Type aliases and conversions around the `secrecy` crate for the two kinds
//! of sensitive value this crate touches: raw/derived key bytes and
//! passwords.

use secrecy::{SecretBox, SecretString as SecrecySecretString};

/// A secret byte buffer that is zeroized on drop.
///
/// Used for raw private key material and KDF-derived keys. The inner value
/// can only be accessed via `expose_secret()`.
///
/// # Example
///
/// ```rust
/// use keyport_keys::secure::SecretBytes;
/// use secrecy::ExposeSecret;
///
/// let secret = SecretBytes::new(Box::new(vec![1, 2, 3, 4]));
/// assert_eq!(secret.expose_secret(), &vec![1, 2, 3, 4]);
/// // Memory is zeroized when `secret` goes out of scope
/// ```
pub type SecretBytes = SecretBox<Vec<u8>>;

/// A secret string that is zeroized on drop.
///
/// Used for passwords, including domain-separated ("adulterated") passwords.
pub type SecretString = SecrecySecretString;

/// Extension trait for moving plain values into secret containers.
pub trait IntoSecret {
    /// The secret type this converts into.
    type Secret;

    /// Convert into a secret value.
    fn into_secret(self) -> Self::Secret;
}

impl IntoSecret for String {
    type Secret = SecretString;

    fn into_secret(self) -> Self::Secret {
        self.into()
    }
}

impl IntoSecret for Vec<u8> {
    type Secret = SecretBytes;

    fn into_secret(self) -> Self::Secret {
        SecretBox::new(Box::new(self))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;

    #[test]
    fn test_secret_string() {
        let secret: SecretString = "correct-password".to_string().into();
        let exposed: &str = secret.expose_secret();
        assert_eq!(exposed, "correct-password");
    }

    #[test]
    fn test_secret_bytes() {
        let data = vec![1, 2, 3, 4, 5];
        let secret = SecretBox::new(Box::new(data));
        assert_eq!(secret.expose_secret(), &vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_into_secret_string() {
        let secret = "hunter2".to_string().into_secret();
        let exposed: &str = secret.expose_secret();
        assert_eq!(exposed, "hunter2");
    }

    #[test]
    fn test_into_secret_bytes() {
        let secret = vec![9, 9, 9].into_secret();
        assert_eq!(secret.expose_secret(), &vec![9, 9, 9]);
    }

    #[test]
    fn test_secret_bytes_debug_is_masked() {
        let secret = vec![0xAB; 4].into_secret();
        let debug = format!("{:?}", secret);
        assert!(!debug.contains("171")); // 0xAB = 171
        assert!(!debug.contains("0xAB"));
    }
}
