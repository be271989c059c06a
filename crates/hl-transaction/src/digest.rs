use sha2::{Digest, Sha256};

/// Length of a hex-encoded SHA-256 digest.
pub const HEX_DIGEST_LEN: usize = 64;

/// SHA-256 of `data`, lowercase hex.
///
/// Every hash in the ledger goes through this function: transaction hashes,
/// Merkle parents and block hashes are all digests of UTF-8 text built by
/// plain concatenation.
pub fn sha256_hex(data: impl AsRef<[u8]>) -> String {
    hex::encode(Sha256::digest(data.as_ref()))
}

/// True when `s` looks like a [`sha256_hex`] output.
pub fn is_hex_digest(s: &str) -> bool {
    s.len() == HEX_DIGEST_LEN && s.bytes().all(|b| matches!(b, b'0'..=b'9' | b'a'..=b'f'))
}
