//! PKCE (Proof Key for Code Exchange) implementation per RFC 7636
//!
//! Generates the anti-CSRF `state` value and the code verifier / S256
//! challenge pair used during the authorization flow. The verifier stays
//! with the caller and is sent during token exchange; the challenge goes
//! into the authorization URL so the server can bind the code to it.

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use rand::RngExt;
use sha2::{Digest, Sha256};

/// Random bytes behind both the state and the verifier.
const ENTROPY_BYTES: usize = 32;

/// A verifier and the challenge derived from it.
///
/// Always produced together by [`generate_pkce`]; never reuse a pair
/// across authorization attempts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PkcePair {
    pub verifier: String,
    pub challenge: String,
}

impl PkcePair {
    /// Whether `challenge` is the S256 transform of `verifier`.
    pub fn verify(&self) -> bool {
        compute_challenge(&self.verifier) == self.challenge
    }
}

/// Generate an opaque state token: 32 random bytes, lowercase hex (64 chars).
pub fn generate_state() -> String {
    random_bytes().iter().map(|b| format!("{b:02x}")).collect()
}

/// Generate a fresh verifier and its S256 challenge.
///
/// The verifier is 32 random bytes encoded as URL-safe base64 without
/// padding, which yields 43 characters (the RFC 7636 minimum).
pub fn generate_pkce() -> PkcePair {
    let verifier = URL_SAFE_NO_PAD.encode(random_bytes());
    let challenge = compute_challenge(&verifier);
    PkcePair {
        verifier,
        challenge,
    }
}

/// Compute the S256 code challenge from a verifier.
///
/// `challenge = BASE64URL(SHA256(verifier))`
pub fn compute_challenge(verifier: &str) -> String {
    let hash = Sha256::digest(verifier.as_bytes());
    URL_SAFE_NO_PAD.encode(hash)
}

fn random_bytes() -> [u8; ENTROPY_BYTES] {
    let mut bytes = [0u8; ENTROPY_BYTES];
    rand::rng().fill(&mut bytes);
    bytes
}
