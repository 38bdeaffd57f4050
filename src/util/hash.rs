//! SHA-256 digests of library files and resolution fingerprints.

use std::fs::File;
use std::io;
use std::path::Path;

use anyhow::{Context, Result};
use sha2::{Digest, Sha256};

/// Length of the abbreviated hex digests shown to users.
pub const SHORT_DIGEST_LEN: usize = 16;

/// Hex SHA-256 of a file's contents.
pub fn sha256_file(path: &Path) -> Result<String> {
    let mut file =
        File::open(path).with_context(|| format!("failed to open {}", path.display()))?;

    let mut hasher = Sha256::new();
    io::copy(&mut file, &mut hasher)
        .with_context(|| format!("failed to read {}", path.display()))?;

    Ok(hex::encode(hasher.finalize()))
}

/// Abbreviated hex SHA-256 of a file's contents.
pub fn short_file_digest(path: &Path) -> Result<String> {
    let mut digest = sha256_file(path)?;
    digest.truncate(SHORT_DIGEST_LEN);
    Ok(digest)
}

/// Incremental hash over labelled components.
///
/// Every component is written as `label=value` followed by a NUL byte, so
/// moving characters between adjacent components changes the result.
#[derive(Default)]
pub struct Fingerprint {
    hasher: Sha256,
}

impl Fingerprint {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a labelled string component.
    pub fn field(&mut self, label: &str, value: &str) -> &mut Self {
        self.hasher.update(label.as_bytes());
        self.hasher.update(b"=");
        self.hasher.update(value.as_bytes());
        self.hasher.update(b"\0");
        self
    }

    /// Add one component per item, all under the same label.
    pub fn fields<'a>(&mut self, label: &str, values: impl IntoIterator<Item = &'a str>) -> &mut Self {
        for value in values {
            self.field(label, value);
        }
        self
    }

    /// Add a labelled boolean component.
    pub fn flag(&mut self, label: &str, set: bool) -> &mut Self {
        self.field(label, if set { "1" } else { "0" })
    }

    /// Full hex digest.
    pub fn finish(self) -> String {
        hex::encode(self.hasher.finalize())
    }

    /// Digest abbreviated to [`SHORT_DIGEST_LEN`] characters.
    pub fn finish_short(self) -> String {
        let mut digest = self.finish();
        digest.truncate(SHORT_DIGEST_LEN);
        digest
    }
}
