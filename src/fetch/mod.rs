//! Downloads with retry and checksum verification
//!
//! Archives come from the NNDC, OECD-NEA, and JAEA servers. Downloads stream
//! to a `.part` file and are renamed into place only once complete, so an
//! interrupted run never leaves a truncated archive behind. Where the release
//! tables carry an MD5 checksum (the format the data centers publish), the
//! finished file is verified and a mismatch is fatal. A file that is already
//! present and matches its checksum is not downloaded again.
//!
//! The JAEA server presents a certificate chain that fails verification, so
//! sources can be flagged to use a client that skips TLS verification.

use crate::util::format_bytes;
use crate::Result;
use anyhow::Context;
use md5::{Digest, Md5};
use std::fs::{self, File};
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

/// Typed download failures that callers may want to distinguish
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("checksum mismatch for {path}: expected {expected}, computed {actual}; delete the file and rerun")]
    ChecksumMismatch {
        path: PathBuf,
        expected: String,
        actual: String,
    },

    #[error("download failed after {attempts} attempts: {url}")]
    RetriesExhausted { url: String, attempts: u32 },
}

/// HTTP downloader with bounded retry
pub struct Downloader {
    client: reqwest::blocking::Client,
    insecure_client: reqwest::blocking::Client,
    attempts: u32,
    retry_delay: Duration,
    debug: bool,
}

impl Downloader {
    /// Create a downloader with the default retry policy (5 attempts)
    pub fn new(debug: bool) -> Result<Self> {
        let builder = || {
            reqwest::blocking::Client::builder()
                .connect_timeout(Duration::from_secs(30))
                // Archives run to hundreds of MB on slow mirrors
                .timeout(Duration::from_secs(3600))
        };

        Ok(Self {
            client: builder().build().context("Failed to build HTTP client")?,
            insecure_client: builder()
                .danger_accept_invalid_certs(true)
                .build()
                .context("Failed to build HTTP client")?,
            attempts: 5,
            retry_delay: Duration::from_secs(5),
            debug,
        })
    }

    /// Download `url` into `output_dir`, returning the path of the local file.
    ///
    /// The file name is the last path segment of the URL with any query
    /// stripped (`.../JEFF33-n.tgz?download=1` stores as `JEFF33-n.tgz`).
    pub fn download(
        &self,
        url: &str,
        output_dir: &Path,
        checksum: Option<&str>,
        insecure: bool,
    ) -> Result<PathBuf> {
        fs::create_dir_all(output_dir)
            .with_context(|| format!("Failed to create directory: {}", output_dir.display()))?;

        let target = output_dir.join(remote_file_name(url)?);

        if target.exists() {
            match checksum {
                Some(expected) if file_md5(&target)? == expected => {
                    println!("Skipping {}, already downloaded", target.display());
                    return Ok(target);
                }
                None => {
                    println!("Skipping {}, already downloaded", target.display());
                    return Ok(target);
                }
                Some(_) => {
                    // Stale or truncated from an earlier run; fetch again
                    if self.debug {
                        eprintln!("DEBUG: checksum stale for {}, re-downloading", target.display());
                    }
                }
            }
        }

        let client = if insecure { &self.insecure_client } else { &self.client };
        let part = target.with_extension("part");

        let mut last_error = None;
        for attempt in 1..=self.attempts {
            match self.fetch_once(client, url, &part) {
                Ok(bytes) => {
                    fs::rename(&part, &target).with_context(|| {
                        format!("Failed to move download into place: {}", target.display())
                    })?;
                    println!("Downloaded {} ({})", target.display(), format_bytes(bytes));

                    if let Some(expected) = checksum {
                        verify_md5(&target, expected)?;
                    }
                    return Ok(target);
                }
                Err(e) => {
                    eprintln!("Download attempt {}/{} failed for {}: {:#}", attempt, self.attempts, url, e);
                    last_error = Some(e);
                    if attempt < self.attempts {
                        std::thread::sleep(self.retry_delay);
                    }
                }
            }
        }

        let _ = fs::remove_file(&part);
        let exhausted = FetchError::RetriesExhausted {
            url: url.to_string(),
            attempts: self.attempts,
        };
        match last_error {
            Some(e) => Err(e.context(exhausted)),
            None => Err(exhausted.into()),
        }
    }

    fn fetch_once(&self, client: &reqwest::blocking::Client, url: &str, part: &Path) -> Result<u64> {
        if self.debug {
            eprintln!("DEBUG: GET {}", url);
        }
        let mut response = client
            .get(url)
            .send()
            .with_context(|| format!("Request failed: {}", url))?
            .error_for_status()
            .with_context(|| format!("Server rejected request: {}", url))?;

        let mut out = File::create(part)
            .with_context(|| format!("Failed to create file: {}", part.display()))?;
        let bytes = response
            .copy_to(&mut out)
            .with_context(|| format!("Transfer failed: {}", url))?;
        Ok(bytes)
    }
}

/// File name for a URL: last path segment, query stripped
pub fn remote_file_name(url: &str) -> Result<String> {
    let without_query = url.split('?').next().unwrap_or(url);
    let name = without_query
        .rsplit('/')
        .next()
        .filter(|n| !n.is_empty() && !n.contains(':'))
        .ok_or_else(|| anyhow::anyhow!("Cannot derive file name from URL: {}", url))?;
    Ok(name.to_string())
}

/// MD5 digest of a file as a lowercase hex string
pub fn file_md5(path: &Path) -> Result<String> {
    let mut file = File::open(path)
        .with_context(|| format!("Failed to open file for checksum: {}", path.display()))?;
    let mut hasher = Md5::new();
    io::copy(&mut file, &mut hasher)
        .with_context(|| format!("Failed to read file for checksum: {}", path.display()))?;
    Ok(format!("{:x}", hasher.finalize()))
}

/// Verify a file against an expected MD5 digest
pub fn verify_md5(path: &Path, expected: &str) -> Result<()> {
    let actual = file_md5(path)?;
    if actual != expected.to_lowercase() {
        return Err(FetchError::ChecksumMismatch {
            path: path.to_path_buf(),
            expected: expected.to_string(),
            actual,
        }
        .into());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_remote_file_name() {
        assert_eq!(
            remote_file_name("https://www.nndc.bnl.gov/endf-b8.0/zips/ENDF-B-VIII.0_neutrons.zip").unwrap(),
            "ENDF-B-VIII.0_neutrons.zip"
        );
        assert_eq!(
            remote_file_name("https://data.oecd-nea.org/files/JEFF33-n.tgz?download=1").unwrap(),
            "JEFF33-n.tgz"
        );
        assert!(remote_file_name("https://wwwndc.jaea.go.jp/").is_err());
    }

    #[test]
    fn test_file_md5() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("data.bin");
        fs::write(&path, b"abc").unwrap();
        // Known digest of "abc"
        assert_eq!(file_md5(&path).unwrap(), "900150983cd24fb0d6963f7d28e17f72");
    }

    #[test]
    fn test_verify_md5_mismatch() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("data.bin");
        fs::write(&path, b"abc").unwrap();

        assert!(verify_md5(&path, "900150983cd24fb0d6963f7d28e17f72").is_ok());
        let err = verify_md5(&path, "deadbeefdeadbeefdeadbeefdeadbeef").unwrap_err();
        assert!(matches!(
            err.downcast_ref::<FetchError>(),
            Some(FetchError::ChecksumMismatch { .. })
        ));
    }

    #[test]
    fn test_verify_md5_case_insensitive_expectation() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("data.bin");
        fs::write(&path, b"abc").unwrap();
        assert!(verify_md5(&path, "900150983CD24FB0D6963F7D28E17F72").is_ok());
    }
}
