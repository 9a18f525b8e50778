use std::path::Path;
use std::process;

use tracing::{error, info};

use clap::{ArgGroup, Parser};

use zeroize::{Zeroize, Zeroizing};

use crate::cmd::{decrypt_contents, encrypt_contents, read_input, write_output, CliError};
use crate::utils::expand_path;

mod cmd;
mod utils;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
#[clap(group(
            ArgGroup::new("mode")
                .required(true)
                .args(&["encrypt", "decrypt"]),
        ))]
struct Args {
    /// Encrypt the file and print the sealed blob as hex
    #[arg(short, long)]
    encrypt: bool,

    /// Decrypt a hex blob produced by --encrypt and print the plaintext
    #[arg(short, long)]
    decrypt: bool,

    /// File to encrypt or decrypt (`~` and `$VAR` are expanded)
    #[arg(short, long, value_name = "FILE")]
    file: String,

    /// Key of exactly 16, 24 or 32 bytes (AES-128, AES-192 or AES-256)
    #[arg(short, long, value_name = "KEY")]
    key: String,

    /// Write the result to a file instead of stdout
    #[arg(short, long, value_name = "FILE")]
    output: Option<String>,
}

use tracing_subscriber::filter::{EnvFilter, LevelFilter};

fn main() {
    let default_env = || {
        EnvFilter::builder()
            .with_default_directive(LevelFilter::WARN.into())
            .from_env_lossy()
    };

    // stdout is reserved for the hex or plaintext result
    tracing_subscriber::fmt()
        .compact()
        .with_target(false)
        .with_thread_ids(false)
        .with_env_filter(default_env())
        .with_writer(std::io::stderr)
        .init();

    let mut args = Args::parse();

    let key = Zeroizing::new(args.key.as_bytes().to_vec());
    args.key.zeroize();

    let input = expand_path(&args.file);
    let output = args.output.as_deref().map(expand_path);

    if let Err(e) = run(args.encrypt, &input, output.as_deref(), &key) {
        error!("{}", e);
        process::exit(e.exit_code());
    }
}

fn run(encrypt: bool, input: &Path, output: Option<&Path>, key: &[u8]) -> Result<(), CliError> {
    let contents = read_input(input)?;

    if encrypt {
        let text = encrypt_contents(&contents, key)?;
        info!("Encrypted {} bytes from {}", contents.len(), input.display());
        write_output(output, text.as_bytes())
    } else {
        let plaintext = decrypt_contents(&contents, key)?;
        info!("Decrypted {} bytes from {}", plaintext.len(), input.display());
        write_output(output, &plaintext)
    }
}
