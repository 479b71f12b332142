// src/source.rs

//! Source acquisition: download, verify, extract
//!
//! Fetches the upstream archive into a digest-keyed cache, verifies it
//! against the pinned SHA-256 before anything else touches it, and unpacks
//! it under the canonical `source_subfolder` name. A verification or
//! extraction failure never leaves a partial source subfolder behind.

use crate::checksum::{self, Sha256Digest};
use crate::error::{Error, Result};
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use tracing::{debug, info, warn};

/// Canonical directory name for the unpacked upstream tree.
pub const SOURCE_SUBFOLDER: &str = "source_subfolder";

/// Fetches and unpacks source archives with a local download cache.
#[derive(Debug, Clone)]
pub struct SourceFetcher {
    cache_dir: PathBuf,
}

impl SourceFetcher {
    pub fn new(cache_dir: impl Into<PathBuf>) -> Self {
        Self {
            cache_dir: cache_dir.into(),
        }
    }

    /// Obtain the archive at `url`, verified against `digest`.
    ///
    /// Cached archives are re-verified before reuse. Non-URL sources are
    /// treated as local file paths and copied into the cache. On checksum
    /// mismatch the downloaded file is removed before the error propagates.
    pub fn fetch(&self, url: &str, digest: &Sha256Digest) -> Result<PathBuf> {
        let slot = self.cache_dir.join(digest.as_str());
        fs::create_dir_all(&slot)?;

        let filename = url.rsplit('/').next().unwrap_or("source.tar.xz");
        let cached = slot.join(filename);

        if cached.exists() {
            match checksum::verify_file(&cached, digest) {
                Ok(()) => {
                    debug!("Using cached source: {}", cached.display());
                    return Ok(cached);
                }
                Err(_) => {
                    warn!("Cached archive failed verification, refetching");
                    fs::remove_file(&cached)?;
                }
            }
        }

        let tmp = slot.join(format!("{filename}.tmp"));
        if url.starts_with("http://") || url.starts_with("https://") {
            info!("Downloading {}", url);
            download(url, &tmp)?;
        } else {
            debug!("Copying local source: {}", url);
            fs::copy(url, &tmp).map_err(|e| Error::Download(format!("{url}: {e}")))?;
        }

        if let Err(e) = checksum::verify_file(&tmp, digest) {
            let _ = fs::remove_file(&tmp);
            return Err(e);
        }

        fs::rename(&tmp, &cached)?;
        Ok(cached)
    }

    /// Unpack `archive` into `workdir` and rename the extracted top-level
    /// directory `extracted_name` to [`SOURCE_SUBFOLDER`].
    ///
    /// Extraction happens in a staging directory that is removed on any
    /// failure, so the canonical subfolder only ever appears fully unpacked.
    pub fn unpack(&self, archive: &Path, workdir: &Path, extracted_name: &str) -> Result<PathBuf> {
        let subfolder = workdir.join(SOURCE_SUBFOLDER);
        let staging = workdir.join(".unpack");

        if staging.exists() {
            fs::remove_dir_all(&staging)?;
        }
        fs::create_dir_all(&staging)?;

        let result = extract_archive(archive, &staging).and_then(|()| {
            let extracted = staging.join(extracted_name);
            if !extracted.is_dir() {
                return Err(Error::Parse(format!(
                    "archive did not contain expected directory {extracted_name}"
                )));
            }
            if subfolder.exists() {
                fs::remove_dir_all(&subfolder)?;
            }
            fs::rename(&extracted, &subfolder)?;
            Ok(())
        });

        let _ = fs::remove_dir_all(&staging);
        result?;

        info!("Source unpacked to {}", subfolder.display());
        Ok(subfolder)
    }
}

fn download(url: &str, dest: &Path) -> Result<()> {
    let response = reqwest::blocking::get(url).map_err(|e| Error::Download(e.to_string()))?;
    if !response.status().is_success() {
        return Err(Error::Download(format!(
            "{url} returned HTTP {}",
            response.status()
        )));
    }
    let bytes = response.bytes().map_err(|e| Error::Download(e.to_string()))?;
    fs::write(dest, &bytes)?;
    Ok(())
}

/// Extract a tar archive, picking decompression flags by extension.
fn extract_archive(archive: &Path, dest: &Path) -> Result<()> {
    let filename = archive.file_name().and_then(|n| n.to_str()).unwrap_or("");

    let flags = if filename.ends_with(".tar.xz") || filename.ends_with(".txz") {
        "-xJf"
    } else if filename.ends_with(".tar.gz") || filename.ends_with(".tgz") {
        "-xzf"
    } else if filename.ends_with(".tar.bz2") {
        "-xjf"
    } else if filename.ends_with(".tar") {
        "-xf"
    } else {
        return Err(Error::Parse(format!("unknown archive format: {filename}")));
    };

    let output = Command::new("tar")
        .arg(flags)
        .arg(archive)
        .arg("-C")
        .arg(dest)
        .output()
        .map_err(|e| Error::Tool {
            step: "extract".to_string(),
            code: None,
            stderr: e.to_string(),
        })?;

    if !output.status.success() {
        return Err(Error::Tool {
            step: "extract".to_string(),
            code: output.status.code(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        });
    }

    Ok(())
}
