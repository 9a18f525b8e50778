//! Blob framing: `nonce || ciphertext || tag`.
//!
//! The nonce travels in front of the AEAD output so that a blob can be
//! opened with nothing but the key. There is no version byte and no
//! associated data; both sides agree on AES-GCM out of band.

use crate::Error;

/// Size in bytes of the GCM nonce prefix.
pub const NONCE_LEN: usize = 12;

/// Size in bytes of the GCM authentication tag suffix.
pub const TAG_LEN: usize = 16;

/// Bytes added to a plaintext by sealing it.
pub const OVERHEAD: usize = NONCE_LEN + TAG_LEN;

/// Returns the blob length produced by sealing `plaintext_len` bytes.
pub fn sealed_len(plaintext_len: usize) -> usize {
    plaintext_len + OVERHEAD
}

/// Prepends `nonce` to the AEAD output (`ciphertext || tag`).
pub fn join(nonce: &[u8; NONCE_LEN], sealed: &[u8]) -> Vec<u8> {
    let mut blob = Vec::with_capacity(NONCE_LEN + sealed.len());
    blob.extend_from_slice(nonce);
    blob.extend_from_slice(sealed);
    blob
}

/// Splits a blob into its nonce and the AEAD output that follows it.
///
/// Only the nonce prefix is checked here. A remainder too short to hold a
/// tag is left for the AEAD to reject, so it surfaces as an authentication
/// failure like any other damaged blob.
pub fn split(blob: &[u8]) -> Result<(&[u8; NONCE_LEN], &[u8]), Error> {
    blob.split_first_chunk::<NONCE_LEN>().ok_or(Error::TruncatedInput { len: blob.len() })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_join_prefixes_nonce() {
        let nonce = [7u8; NONCE_LEN];
        let blob = join(&nonce, b"sealed");
        assert_eq!(&blob[..NONCE_LEN], &nonce[..]);
        assert_eq!(&blob[NONCE_LEN..], b"sealed");
    }

    #[test]
    fn test_split_short_blob() {
        let blob = [0u8; NONCE_LEN - 1];
        match split(&blob) {
            Err(Error::TruncatedInput { len }) => assert_eq!(len, NONCE_LEN - 1),
            other => panic!("expected truncated input, got {:?}", other),
        }
    }

    #[test]
    fn test_split_empty_blob() {
        assert!(matches!(split(&[]), Err(Error::TruncatedInput { len: 0 })));
    }

    #[test]
    fn test_split_nonce_only() {
        let blob = [3u8; NONCE_LEN];
        let (nonce, rest) = split(&blob).unwrap();
        assert_eq!(nonce, &[3u8; NONCE_LEN]);
        assert!(rest.is_empty());
    }

    #[test]
    fn test_split_undoes_join() {
        let nonce = [0xa5u8; NONCE_LEN];
        let sealed = [0x5au8; 21];
        let blob = join(&nonce, &sealed);
        let (n, rest) = split(&blob).unwrap();
        assert_eq!(n, &nonce);
        assert_eq!(rest, &sealed[..]);
    }

    #[test]
    fn test_sealed_len() {
        assert_eq!(sealed_len(0), 28);
        assert_eq!(sealed_len(5), 33);
    }
}
