//! Secure memory handling for raw key material
//!
//! Raw private keys and scrypt-derived keys pass through this crate only as
//! containers from this module:
//! - Automatic zeroing on drop via `zeroize` (even on panic / error paths)
//! - Debug output masking to prevent log exposure
//!
//! An export or import call owns its raw bytes for the duration of that call
//! alone; the containers here guarantee the bytes do not outlive it.

mod secret;

pub use secret::{IntoSecret, SecretBytes, SecretString};
