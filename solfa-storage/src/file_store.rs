//! Tier-2 storage: one file per key.
//!
//! The plain fallback when the database engine is unusable, and the
//! home of the identity key, which must survive independently of the
//! main document. Writes go through a temp file and a rename so a
//! crash mid-write leaves the previous value intact.

use crate::{KeyValueStore, StorageResult};
use async_trait::async_trait;
use std::io::ErrorKind;
use std::path::PathBuf;

/// Key-value store that keeps each key in its own file.
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Creates a store rooted at `dir`.
    ///
    /// No I/O happens here; the directory is created lazily on the
    /// first write, so constructing the fallback can never fail.
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn path_for(&self, name: &str) -> PathBuf {
        self.dir.join(encode_key(name))
    }
}

/// Escapes a key into a safe file name. Alphanumerics, `.`, `-` and
/// `_` pass through; everything else becomes `%XX`.
fn encode_key(name: &str) -> String {
    let mut encoded = String::with_capacity(name.len());
    for byte in name.bytes() {
        match byte {
            b'a'..=b'z' | b'A'..=b'Z' | b'0'..=b'9' | b'.' | b'-' | b'_' => {
                encoded.push(byte as char);
            }
            _ => encoded.push_str(&format!("%{byte:02X}")),
        }
    }
    encoded
}

#[async_trait]
impl KeyValueStore for FileStore {
    async fn get(&self, name: &str) -> StorageResult<Option<Vec<u8>>> {
        match tokio::fs::read(self.path_for(name)).await {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    async fn set(&self, name: &str, value: &[u8]) -> StorageResult<()> {
        tokio::fs::create_dir_all(&self.dir).await?;
        let path = self.path_for(name);
        // "%" never comes out of encode_key bare, so ".tmp%" cannot
        // collide with another key's file.
        let tmp = self.dir.join(format!("{}.tmp%", encode_key(name)));
        tokio::fs::write(&tmp, value).await?;
        tokio::fs::rename(&tmp, &path).await?;
        Ok(())
    }

    async fn remove(&self, name: &str) -> StorageResult<()> {
        match tokio::fs::remove_file(self.path_for(name)).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}
