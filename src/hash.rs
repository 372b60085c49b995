//! BLAKE3 fingerprints of installed files

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use blake3::Hasher;

use crate::error::{Result, fs as fs_error};

/// Prefix of every fingerprint
pub const HASH_PREFIX: &str = "blake3:";

/// Hex digits shown in short fingerprints
const SHORT_LEN: usize = 12;

/// Calculate the BLAKE3 fingerprint of a file
pub fn hash_file(path: &Path) -> Result<String> {
    let read_failed = |e: std::io::Error| fs_error::io_error(format!("{}: {e}", path.display()));

    let mut reader = BufReader::new(File::open(path).map_err(read_failed)?);
    let mut hasher = Hasher::new();
    let mut buffer = [0u8; 8192];

    loop {
        let bytes_read = reader.read(&mut buffer).map_err(read_failed)?;
        if bytes_read == 0 {
            break;
        }
        hasher.update(&buffer[..bytes_read]);
    }

    Ok(format!("{}{}", HASH_PREFIX, hasher.finalize().to_hex()))
}

/// Shorten a fingerprint for display, keeping the prefix
pub fn short(hash: &str) -> &str {
    let end = HASH_PREFIX.len() + SHORT_LEN;
    hash.get(..end).unwrap_or(hash)
}
