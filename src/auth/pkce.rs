use base64::prelude::BASE64_URL_SAFE_NO_PAD;
use base64::Engine;
use rand::distr::Alphanumeric;
use rand::Rng;
use sha2::{Digest, Sha256};

const VERIFIER_LEN: usize = 64;

/// # new_verifier
///
/// Random code verifier for one sign-in attempt, drawn from the unreserved
/// alphanumeric range of RFC 7636.
pub fn new_verifier() -> String {
    random_alphanumeric(VERIFIER_LEN)
}

/// # challenge_of
///
/// S256 code challenge of a verifier: the url-safe unpadded base64 of its
/// SHA-256 digest.
pub fn challenge_of(verifier: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(verifier.as_bytes());

    BASE64_URL_SAFE_NO_PAD.encode(hasher.finalize())
}

pub(crate) fn random_alphanumeric(len: usize) -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(len)
        .map(char::from)
        .collect()
}
