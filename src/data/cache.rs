use std::collections::hash_map::DefaultHasher;
use std::collections::HashMap;
use std::fs::File;
use std::hash::Hasher;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::SystemTime;

use super::loader::{self, LoadError};
use super::model::MovieDataset;

/// Identity of a source file: where it is and which version of it.
///
/// Length and mtime alone miss a same-length rewrite inside the
/// filesystem's timestamp resolution, so the content fingerprint is part of
/// the key too.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SourceKey {
    pub path: PathBuf,
    pub len: u64,
    pub modified: Option<SystemTime>,
    pub fingerprint: u64,
}

impl SourceKey {
    /// Stat and fingerprint the file. A missing file is reported as
    /// `SourceNotFound`.
    pub fn stat(path: &Path) -> Result<Self, LoadError> {
        let canonical = path.canonicalize().map_err(|e| LoadError::from_io(path, e))?;
        let meta = std::fs::metadata(&canonical).map_err(|e| LoadError::from_io(path, e))?;
        let fingerprint = content_fingerprint(&canonical).map_err(|e| LoadError::from_io(path, e))?;
        Ok(SourceKey {
            path: canonical,
            len: meta.len(),
            modified: meta.modified().ok(),
            fingerprint,
        })
    }
}

/// Session-local hash of the file bytes.
fn content_fingerprint(path: &Path) -> std::io::Result<u64> {
    let mut reader = BufReader::with_capacity(1 << 16, File::open(path)?);
    let mut hasher = DefaultHasher::new();
    loop {
        let chunk = reader.fill_buf()?;
        if chunk.is_empty() {
            break;
        }
        hasher.write(chunk);
        let n = chunk.len();
        reader.consume(n);
    }
    Ok(hasher.finish())
}

/// Loads each distinct source at most once per session.
///
/// Datasets are handed out as `Arc`s so every view reads the same
/// immutable table. A file that changes on disk gets a new key and replaces
/// the stale entry for its path.
#[derive(Debug, Default)]
pub struct DatasetCache {
    entries: HashMap<SourceKey, Arc<MovieDataset>>,
}

impl DatasetCache {
    pub fn get_or_load(&mut self, path: &Path) -> Result<Arc<MovieDataset>, LoadError> {
        self.get_or_load_with(path, loader::load_file)
    }

    fn get_or_load_with<F>(&mut self, path: &Path, load: F) -> Result<Arc<MovieDataset>, LoadError>
    where
        F: FnOnce(&Path) -> Result<MovieDataset, LoadError>,
    {
        let key = SourceKey::stat(path)?;
        if let Some(dataset) = self.entries.get(&key) {
            log::debug!("cache hit for {}", key.path.display());
            return Ok(Arc::clone(dataset));
        }

        let dataset = Arc::new(load(&key.path)?);
        self.entries.retain(|k, _| k.path != key.path);
        self.entries.insert(key, Arc::clone(&dataset));
        Ok(dataset)
    }

    #[cfg(test)]
    fn len(&self) -> usize {
        self.entries.len()
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::io::Write;

    use super::*;

    fn counting_loader(calls: &Cell<usize>) -> impl FnOnce(&Path) -> Result<MovieDataset, LoadError> + '_ {
        move |_| {
            calls.set(calls.get() + 1);
            Ok(MovieDataset::default())
        }
    }

    #[test]
    fn same_source_is_loaded_once() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        file.write_all(b"placeholder").expect("write");
        let calls = Cell::new(0);
        let mut cache = DatasetCache::default();

        let a = cache
            .get_or_load_with(file.path(), counting_loader(&calls))
            .expect("first");
        let b = cache
            .get_or_load_with(file.path(), counting_loader(&calls))
            .expect("second");

        assert_eq!(calls.get(), 1);
        assert!(Arc::ptr_eq(&a, &b));
    }

    #[test]
    fn changed_source_is_reloaded_and_replaces_stale_entry() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        file.write_all(b"v1").expect("write");
        let calls = Cell::new(0);
        let mut cache = DatasetCache::default();

        cache
            .get_or_load_with(file.path(), counting_loader(&calls))
            .expect("first");
        file.write_all(b" and more").expect("append");
        file.flush().expect("flush");
        cache
            .get_or_load_with(file.path(), counting_loader(&calls))
            .expect("second");

        assert_eq!(calls.get(), 2);
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn same_length_rewrite_with_unchanged_mtime_is_reloaded() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        file.write_all(b"aaaa").expect("write");
        file.flush().expect("flush");
        let mtime = file.as_file().metadata().expect("metadata").modified().expect("mtime");
        let calls = Cell::new(0);
        let mut cache = DatasetCache::default();

        cache
            .get_or_load_with(file.path(), counting_loader(&calls))
            .expect("first");
        std::fs::write(file.path(), b"bbbb").expect("rewrite");
        file.as_file().set_modified(mtime).expect("restore mtime");
        cache
            .get_or_load_with(file.path(), counting_loader(&calls))
            .expect("second");

        assert_eq!(calls.get(), 2);
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn missing_source_never_reaches_the_loader() {
        let dir = tempfile::tempdir().expect("temp dir");
        let calls = Cell::new(0);
        let mut cache = DatasetCache::default();
        let err = cache
            .get_or_load_with(&dir.path().join("absent.csv"), counting_loader(&calls))
            .unwrap_err();
        assert!(matches!(err, LoadError::SourceNotFound { .. }));
        assert_eq!(calls.get(), 0);
    }
}
