// src/checksum.rs

//! SHA-256 integrity verification for fetched source archives
//!
//! The upstream tarball is pinned to a 64-character hex SHA-256 digest. A
//! mismatch is a hard stop: a corrupted or tampered source tree must never
//! reach the build step.

use crate::error::{Error, Result};
use sha2::{Digest, Sha256};
use std::fmt;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use std::str::FromStr;

/// A validated SHA-256 digest (64 lowercase hex characters).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sha256Digest(String);

impl Sha256Digest {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for Sha256Digest {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        if s.len() != 64 {
            return Err(Error::Parse(format!(
                "sha256 digest must be 64 hex characters, got {}",
                s.len()
            )));
        }
        if !s.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(Error::Parse(format!("invalid hex in sha256 digest: {s}")));
        }
        Ok(Self(s.to_lowercase()))
    }
}

impl fmt::Display for Sha256Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Compute the SHA-256 digest of a byte slice as lowercase hex.
pub fn digest_bytes(data: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(data);
    hex::encode(hasher.finalize())
}

/// Compute the SHA-256 digest of a file, streaming its content.
pub fn digest_file(path: &Path) -> Result<String> {
    let mut file = File::open(path)?;
    let mut hasher = Sha256::new();
    let mut buffer = [0u8; 8192];

    loop {
        let n = file.read(&mut buffer)?;
        if n == 0 {
            break;
        }
        hasher.update(&buffer[..n]);
    }

    Ok(hex::encode(hasher.finalize()))
}

/// Verify a file against an expected digest.
pub fn verify_file(path: &Path, expected: &Sha256Digest) -> Result<()> {
    let actual = digest_file(path)?;
    if actual == expected.as_str() {
        Ok(())
    } else {
        Err(Error::ChecksumMismatch {
            expected: expected.as_str().to_string(),
            actual,
        })
    }
}
