//! # blobseal
//!
//! Seal and open self-contained AES-GCM blobs.
//!
//! [`seal`] encrypts a plaintext under a raw 16, 24 or 32 byte key with a
//! freshly drawn random nonce and returns `nonce || ciphertext || tag`.
//! [`open`] takes that blob and the same key back to the plaintext, or
//! fails without releasing any plaintext if the tag does not verify.
//!
//! The key is used as given. There is no padding, truncation or password
//! derivation; producing a key of the right length is the caller's job.

#![deny(missing_docs)]

use aes_gcm::aead::consts::U12;
use aes_gcm::aead::{Aead, KeyInit};
use aes_gcm::aes::Aes192;
use aes_gcm::{Aes128Gcm, Aes256Gcm, AesGcm, Nonce};

use rand_core::{CryptoRngCore, OsRng};

use thiserror::Error;

pub mod frame;

pub use frame::{NONCE_LEN, OVERHEAD, TAG_LEN};

/// Key lengths in bytes accepted by [`seal`] and [`open`]: AES-128, AES-192
/// and AES-256.
pub const KEY_SIZES: [usize; 3] = [16, 24, 32];

type Aes192Gcm = AesGcm<Aes192, U12>;

/// Errors returned by [`seal`] and [`open`].
#[derive(Debug, Error)]
pub enum Error {
    /// The key is not 16, 24 or 32 bytes long.
    #[error("invalid key size: got {len} bytes, expected 16, 24 or 32")]
    InvalidKeySize {
        /// Length of the rejected key.
        len: usize,
    },

    /// The AEAD could not be constructed from an otherwise valid key.
    #[error("failed to initialise AES-GCM")]
    CipherInit,

    /// The random source could not supply a nonce.
    #[error("failed to gather entropy for nonce")]
    Entropy,

    /// The blob is too short to contain a nonce.
    #[error("ciphertext too short: got {len} bytes, need at least 12")]
    TruncatedInput {
        /// Length of the rejected blob.
        len: usize,
    },

    /// The tag did not verify. Wrong key, corruption and tampering all look
    /// the same from here.
    #[error("authentication failure trying to decrypt ciphertext")]
    AuthenticationFailed,

    /// The plaintext exceeds what GCM can encrypt under a single nonce.
    #[error("plaintext too long for AES-GCM")]
    MessageTooLong,
}

enum Cipher {
    Aes128(Aes128Gcm),
    Aes192(Aes192Gcm),
    Aes256(Aes256Gcm),
}

impl Cipher {
    fn new(key: &[u8]) -> Result<Self, Error> {
        let cipher = match key.len() {
            16 => Aes128Gcm::new_from_slice(key).map(Cipher::Aes128),
            24 => Aes192Gcm::new_from_slice(key).map(Cipher::Aes192),
            32 => Aes256Gcm::new_from_slice(key).map(Cipher::Aes256),
            len => return Err(Error::InvalidKeySize { len }),
        };

        cipher.map_err(|_| Error::CipherInit)
    }

    fn encrypt(&self, nonce: &[u8; NONCE_LEN], plaintext: &[u8]) -> Result<Vec<u8>, Error> {
        let nonce = Nonce::<U12>::from_slice(nonce);
        let sealed = match self {
            Cipher::Aes128(c) => c.encrypt(nonce, plaintext),
            Cipher::Aes192(c) => c.encrypt(nonce, plaintext),
            Cipher::Aes256(c) => c.encrypt(nonce, plaintext),
        };

        sealed.map_err(|_| Error::MessageTooLong)
    }

    fn decrypt(&self, nonce: &[u8; NONCE_LEN], sealed: &[u8]) -> Result<Vec<u8>, Error> {
        let nonce = Nonce::<U12>::from_slice(nonce);
        let plaintext = match self {
            Cipher::Aes128(c) => c.decrypt(nonce, sealed),
            Cipher::Aes192(c) => c.decrypt(nonce, sealed),
            Cipher::Aes256(c) => c.decrypt(nonce, sealed),
        };

        plaintext.map_err(|_| Error::AuthenticationFailed)
    }
}

/// Encrypts `plaintext` under `key` and returns `nonce || ciphertext || tag`.
///
/// The nonce is 12 bytes from the operating system's secure random source,
/// drawn fresh on every call. The returned blob is [`OVERHEAD`] bytes
/// longer than `plaintext`.
///
/// # Examples
///
/// ```
/// let key = [0u8; 32];
/// let blob = blobseal::seal(b"hello", &key).unwrap();
/// assert_eq!(blob.len(), 12 + 5 + 16);
///
/// let plaintext = blobseal::open(&blob, &key).unwrap();
/// assert_eq!(plaintext, b"hello");
/// ```
///
/// # Errors
///
/// [`Error::InvalidKeySize`] if `key` is not 16, 24 or 32 bytes,
/// [`Error::Entropy`] if no nonce could be drawn, and
/// [`Error::MessageTooLong`] if the plaintext exceeds the GCM limit.
pub fn seal(plaintext: &[u8], key: &[u8]) -> Result<Vec<u8>, Error> {
    seal_with_rng(&mut OsRng, plaintext, key)
}

/// Same as [`seal`], drawing the nonce from `rng` instead of [`OsRng`].
///
/// `rng` must be a cryptographically secure generator. Anything that can
/// repeat a nonce under the same key breaks both confidentiality and
/// integrity of every blob sealed with it.
///
/// The key is validated before `rng` is touched.
pub fn seal_with_rng(
    rng: &mut impl CryptoRngCore,
    plaintext: &[u8],
    key: &[u8],
) -> Result<Vec<u8>, Error> {
    let cipher = Cipher::new(key)?;

    let mut nonce = [0u8; NONCE_LEN];
    rng.try_fill_bytes(&mut nonce).map_err(|_| Error::Entropy)?;

    let sealed = cipher.encrypt(&nonce, plaintext)?;
    let blob = frame::join(&nonce, &sealed);
    debug_assert_eq!(blob.len(), frame::sealed_len(plaintext.len()));

    Ok(blob)
}

/// Decrypts a blob produced by [`seal`] under the same `key`.
///
/// No plaintext is returned unless the tag verifies.
///
/// # Errors
///
/// [`Error::InvalidKeySize`] if `key` is not 16, 24 or 32 bytes,
/// [`Error::TruncatedInput`] if `blob` is shorter than a nonce, and
/// [`Error::AuthenticationFailed`] for anything else that does not verify,
/// including a wrong key.
pub fn open(blob: &[u8], key: &[u8]) -> Result<Vec<u8>, Error> {
    let cipher = Cipher::new(key)?;
    let (nonce, sealed) = frame::split(blob)?;

    cipher.decrypt(nonce, sealed)
}
