//! Deterministic identifier derivation. Every id is a pure function of its
//! inputs: same inputs within a run, same id.

use sha2::{Digest, Sha256};

/// Full 64-character hex digest, used for image shas.
#[must_use]
pub fn hex_digest(input: &str) -> String {
    let digest = Sha256::digest(input.as_bytes());
    digest.iter().map(|b| format!("{b:02x}")).collect()
}

/// Git-style 40-character identifier.
#[must_use]
pub fn commit_sha(seed: &str) -> String {
    let mut digest = hex_digest(seed);
    digest.truncate(40);
    digest
}

/// The chain identifier seeding every hash derived for one chain.
#[must_use]
pub fn chain_id(service: &str, file: &str) -> String {
    commit_sha(&format!("chain:{service}:{file}"))
}

/// Image digest tied to the chain that "built" it.
#[must_use]
pub fn image_sha(image: &str, chain_id: &str) -> String {
    hex_digest(&format!("image:{image}:{chain_id}"))
}

#[must_use]
pub fn file_commit_sha(file: &str) -> String {
    commit_sha(&format!("file:{file}"))
}

#[must_use]
pub fn chain_finding_id(slug: &str, service: &str, chain_id: &str) -> String {
    format!("{slug}-{service}-{chain_id}")
}

#[must_use]
pub fn standalone_finding_id(slug: &str, service: &str, index: usize) -> String {
    format!("{slug}-{service}-standalone-{index}")
}
