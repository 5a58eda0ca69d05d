//! Ed25519 key material in the wallet's string encoding.

use ed25519_dalek::SigningKey;
use rand::{Rng, rng};

/// Prefix of an encoded public key.
pub const KEY_TYPE_PREFIX: &str = "ed25519:";

/// A freshly generated account keypair, already encoded.
///
/// - `public_key` is `ed25519:` followed by the base58 public key.
/// - `secret_key` is the base58 encoding of the 64-byte keypair
///   (secret seed followed by public key).
#[derive(Clone, PartialEq, Eq)]
pub struct Keypair {
    pub public_key: String,
    pub secret_key: String,
}

impl Keypair {
    /// Generates a keypair from 32 bytes of thread-local randomness.
    pub fn generate() -> Self {
        let mut seed = [0u8; 32];
        rng().fill(&mut seed);
        Self::from_seed(&seed)
    }

    /// Derives the keypair for a known 32-byte seed.
    pub fn from_seed(seed: &[u8; 32]) -> Self {
        let signing_key = SigningKey::from_bytes(seed);
        let public = signing_key.verifying_key().to_bytes();
        Self {
            public_key: format!("{KEY_TYPE_PREFIX}{}", bs58::encode(public).into_string()),
            secret_key: bs58::encode(signing_key.to_keypair_bytes()).into_string(),
        }
    }
}

impl core::fmt::Debug for Keypair {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Keypair")
            .field("public_key", &self.public_key)
            .field("secret_key", &"<redacted>")
            .finish()
    }
}
