//! Remembers the last reading position per book file.
//!
//! Files are stored under the configured cache directory using a hash of the
//! book path as the directory name to avoid filesystem issues. The format is
//! a tiny TOML file with a single `slot_index` field.

use flipbook_core::Bookmark;
use sha2::{Digest, Sha256};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

pub fn hash_dir(cache_dir: &Path, book_path: &Path) -> PathBuf {
    let mut hasher = Sha256::new();
    hasher.update(book_path.as_os_str().to_string_lossy().as_bytes());
    let hash = format!("{:x}", hasher.finalize());
    cache_dir.join(hash)
}

fn bookmark_path(cache_dir: &Path, book_path: &Path) -> PathBuf {
    hash_dir(cache_dir, book_path).join("bookmark.toml")
}

/// Load the cached position for a given book path, if present.
pub fn load_bookmark(cache_dir: &Path, book_path: &Path) -> Option<Bookmark> {
    let data = fs::read_to_string(bookmark_path(cache_dir, book_path)).ok()?;
    toml::from_str(&data).ok()
}

/// Persist the current position. Errors are ignored to keep the reader
/// responsive.
pub fn save_bookmark(cache_dir: &Path, book_path: &Path, bookmark: &Bookmark) {
    let path = bookmark_path(cache_dir, book_path);
    if let Some(parent) = path.parent() {
        let _ = fs::create_dir_all(parent);
    }
    if let Ok(contents) = toml::to_string(bookmark) {
        if fs::write(&path, contents).is_ok() {
            debug!(slot = bookmark.slot_index, "Saved bookmark");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{SystemTime, UNIX_EPOCH};

    fn unique_cache_dir() -> PathBuf {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("clock should be after epoch")
            .as_nanos();
        std::env::temp_dir().join(format!("flipbook_cache_{nanos}"))
    }

    #[test]
    fn bookmark_round_trips_per_book() {
        let cache_dir = unique_cache_dir();
        let book = Path::new("/books/diwan.toml");
        assert_eq!(load_bookmark(&cache_dir, book), None);

        save_bookmark(&cache_dir, book, &Bookmark { slot_index: 6 });
        assert_eq!(load_bookmark(&cache_dir, book), Some(Bookmark { slot_index: 6 }));
        assert_eq!(load_bookmark(&cache_dir, Path::new("/books/other.toml")), None);

        let _ = fs::remove_dir_all(&cache_dir);
    }

    #[test]
    fn hash_dir_is_stable() {
        let cache_dir = Path::new(".cache");
        let book = Path::new("a.toml");
        assert_eq!(hash_dir(cache_dir, book), hash_dir(cache_dir, book));
        assert_ne!(hash_dir(cache_dir, book), hash_dir(cache_dir, Path::new("b.toml")));
    }
}
