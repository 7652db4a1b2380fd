// src/store/mod.rs
// =============================================================================
// This module persists rendered HTML to disk.
//
// Layout: one flat directory, one file per page. The filename is derived
// from the URL so a later pipeline stage can recover which page a file
// came from:
//
//   https://x.test/docs/a.html  ->  https%3A%2F%2Fx.test%2Fdocs%2Fa.html.html
//
// The derivation is deterministic (same URL = same filename, always) and
// filesystem-safe (percent-encoding leaves only [A-Za-z0-9-_.!~*'()]).
// Very long URLs are truncated to 200 bytes before the extension, which
// means two very long URLs CAN collide and silently overwrite each other.
// That is an accepted limitation of the flat-file layout.
//
// Rust concepts:
// - Traits: The controller saves through `Store`, tests use an in-memory one
// - AsciiSet: percent-encoding is configured by the set of bytes to escape
// =============================================================================

use async_trait::async_trait;
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use std::path::{Path, PathBuf};
use thiserror::Error;

// Everything except alphanumerics and - _ . ! ~ * ' ( ) gets escaped.
// This is exactly the character set JavaScript's encodeURIComponent keeps,
// so filenames stay interchangeable with earlier tooling.
const COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

// Filenames are capped at this many bytes before ".html" is appended
const MAX_IDENTIFIER_LEN: usize = 200;

// Errors a save can produce
//
// Both variants are recoverable from the crawl's point of view: the page
// is counted as failed and the run continues.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Could not create the output directory
    #[error("failed to create output directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Could not write a page file
    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
}

// The persistence interface the crawl controller consumes
#[async_trait]
pub trait Store {
    async fn save(&self, identifier: &str, html: &str) -> Result<(), StoreError>;
}

// Derives a filesystem-safe identifier from a URL
//
// Percent-encode the whole URL, cap the length, append ".html".
// Deterministic and collision-resistant for realistic URL lengths.
pub fn safe_identifier(url: &str) -> String {
    let mut encoded = utf8_percent_encode(url, COMPONENT).to_string();

    if encoded.len() > MAX_IDENTIFIER_LEN {
        // The encoded form is pure ASCII, so truncating on a byte
        // boundary is safe. Back off so we never cut a %XX escape in half.
        let mut cut = MAX_IDENTIFIER_LEN;
        while cut > 0 && !encoded.is_char_boundary(cut) {
            cut -= 1;
        }
        // A '%' within the last two bytes means a split escape sequence
        if let Some(pos) = encoded[..cut].rfind('%') {
            if pos + 3 > cut {
                cut = pos;
            }
        }
        encoded.truncate(cut);
    }

    encoded.push_str(".html");
    encoded
}

// Writes pages as flat files under one output directory
pub struct DiskStore {
    dir: PathBuf,
}

impl DiskStore {
    // Creates the store, making the output directory if needed
    //
    // Failing here is fatal to the run (nothing could be saved anyway),
    // so it happens up front, before the browser is even launched.
    pub async fn new(dir: impl AsRef<Path>) -> Result<Self, StoreError> {
        let dir = dir.as_ref().to_path_buf();
        tokio::fs::create_dir_all(&dir)
            .await
            .map_err(|source| StoreError::CreateDir {
                path: dir.clone(),
                source,
            })?;
        Ok(Self { dir })
    }
}

#[async_trait]
impl Store for DiskStore {
    async fn save(&self, identifier: &str, html: &str) -> Result<(), StoreError> {
        let path = self.dir.join(identifier);
        tokio::fs::write(&path, html)
            .await
            .map_err(|source| StoreError::Write {
                path: path.clone(),
                source,
            })
    }
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. What is an AsciiSet?
//    - percent-encoding's way of saying WHICH bytes get escaped
//    - We start from NON_ALPHANUMERIC (escape everything that isn't a
//      letter or digit) and remove() the few bytes we want to keep
//
// 2. Why derive the filename from the URL at all?
//    - A later pipeline stage reads these files offline; decoding the
//      filename tells it exactly which page it is looking at
//    - Hashing would be shorter but one-way
//
// 3. What is the "%XX backoff" in safe_identifier about?
//    - Percent escapes are three bytes: '%' plus two hex digits
//    - A naive truncation could cut one in half, leaving a filename that
//      no longer decodes back to a URL prefix
//
// 4. Why is save() async?
//    - The crawl loop is async anyway (browser protocol), and tokio::fs
//      keeps a slow disk from blocking the runtime's worker thread
// -----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identifier_is_deterministic() {
        let a = safe_identifier("https://x.test/docs/a.html");
        let b = safe_identifier("https://x.test/docs/a.html");
        assert_eq!(a, b);
    }

    #[test]
    fn test_identifier_encoding() {
        let id = safe_identifier("https://x.test/a.html?q=1&r=2");
        // Slashes, colon, query characters must all be escaped
        assert_eq!(
            id,
            "https%3A%2F%2Fx.test%2Fa.html%3Fq%3D1%26r%3D2.html"
        );
        assert!(!id.contains('/'));
    }

    #[test]
    fn test_identifier_truncation() {
        let long_url = format!("https://x.test/{}", "a".repeat(500));
        let id = safe_identifier(&long_url);
        // 200 bytes of identifier plus ".html"
        assert!(id.len() <= MAX_IDENTIFIER_LEN + ".html".len());
        assert!(id.ends_with(".html"));
    }

    #[test]
    fn test_truncation_never_splits_an_escape() {
        // Stack percent escapes right around the cut point
        let long_url = format!("https://x.test/{}", "/".repeat(300));
        let id = safe_identifier(&long_url);
        let stem = id.trim_end_matches(".html");
        // Every '%' in the stem must be followed by two characters
        for (pos, ch) in stem.char_indices() {
            if ch == '%' {
                assert!(pos + 3 <= stem.len(), "split escape at end of {}", stem);
            }
        }
    }

    #[tokio::test]
    async fn test_disk_store_writes_files() {
        let dir = tempfile::tempdir().unwrap();
        let store = DiskStore::new(dir.path()).await.unwrap();

        let id = safe_identifier("https://x.test/a.html");
        store.save(&id, "<html>hi</html>").await.unwrap();

        let content = std::fs::read_to_string(dir.path().join(&id)).unwrap();
        assert_eq!(content, "<html>hi</html>");
    }

    #[tokio::test]
    async fn test_disk_store_creates_nested_dir() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("raw").join("html");
        let store = DiskStore::new(&nested).await.unwrap();

        store.save("page.html", "<html></html>").await.unwrap();
        assert!(nested.join("page.html").exists());
    }
}
