use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use thiserror::Error;

use tracing::debug;

use zeroize::Zeroizing;

/// Failures of a single encrypt/decrypt run.
#[derive(Debug, Error)]
pub enum CliError {
    #[error("error opening file ({}): {source}", path.display())]
    Read { path: PathBuf, source: io::Error },

    #[error("error writing output ({}): {source}", path.display())]
    Write { path: PathBuf, source: io::Error },

    #[error("error writing to stdout: {0}")]
    Stdout(#[source] io::Error),

    #[error("key must be 16, 24 or 32 bytes long, got {len}")]
    InvalidKey { len: usize },

    // Malformed hex, a short blob, a wrong key and a forged tag all end up
    // here so the message gives nothing away.
    #[error("unable to decrypt: invalid ciphertext or key")]
    Undecryptable,

    #[error("cipher failure: {0}")]
    Cipher(blobseal::Error),
}

impl CliError {
    /// Process exit status for this failure.
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Read { .. } | CliError::Write { .. } | CliError::Stdout(_) => 2,
            _ => 1,
        }
    }
}

impl From<blobseal::Error> for CliError {
    fn from(e: blobseal::Error) -> Self {
        match e {
            blobseal::Error::InvalidKeySize { len } => CliError::InvalidKey { len },
            blobseal::Error::TruncatedInput { .. } | blobseal::Error::AuthenticationFailed => {
                CliError::Undecryptable
            }
            e => CliError::Cipher(e),
        }
    }
}

pub fn read_input(path: &Path) -> Result<Zeroizing<Vec<u8>>, CliError> {
    let contents = fs::read(path).map_err(|source| CliError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    debug!("Read {} bytes from {}", contents.len(), path.display());

    Ok(Zeroizing::new(contents))
}

/// Seals `contents` and renders the blob as lowercase hex.
pub fn encrypt_contents(contents: &[u8], key: &[u8]) -> Result<String, CliError> {
    let blob = blobseal::seal(contents, key)?;
    Ok(hex::encode(blob))
}

/// Decodes hex text produced by [`encrypt_contents`] and opens it.
///
/// Surrounding ASCII whitespace is ignored, so a blob saved with its
/// trailing newline still decodes.
pub fn decrypt_contents(contents: &[u8], key: &[u8]) -> Result<Zeroizing<Vec<u8>>, CliError> {
    // Validate the key first so a bad key is reported as such even when the
    // input is garbage.
    if !blobseal::KEY_SIZES.contains(&key.len()) {
        return Err(CliError::InvalidKey { len: key.len() });
    }

    let text = std::str::from_utf8(contents).map_err(|_| CliError::Undecryptable)?;
    let text = text.trim_matches(|c: char| c.is_ascii_whitespace());
    let blob = hex::decode(text).map_err(|_| CliError::Undecryptable)?;

    let plaintext = blobseal::open(&blob, key)?;
    Ok(Zeroizing::new(plaintext))
}

/// Writes `bytes` to `path`, or to stdout followed by a newline.
pub fn write_output(path: Option<&Path>, bytes: &[u8]) -> Result<(), CliError> {
    match path {
        Some(path) => {
            fs::write(path, bytes).map_err(|source| CliError::Write {
                path: path.to_path_buf(),
                source,
            })?;
            debug!("Wrote {} bytes to {}", bytes.len(), path.display());
            Ok(())
        }
        None => {
            let mut stdout = io::stdout().lock();
            stdout
                .write_all(bytes)
                .and_then(|_| stdout.write_all(b"\n"))
                .and_then(|_| stdout.flush())
                .map_err(CliError::Stdout)
        }
    }
}
