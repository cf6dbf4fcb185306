// src/app/cache.rs
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use once_cell::sync::Lazy;
use tracing::{debug, warn};

use crate::app::data::{Catalog, LoadError};

// Loaded catalogs live for the whole process; the file is read once per path.
static CATALOGS: Lazy<Mutex<HashMap<PathBuf, Arc<Catalog>>>> =
    Lazy::new(|| Mutex::new(HashMap::new()));

fn cache_key(path: &Path) -> PathBuf {
    path.canonicalize().unwrap_or_else(|_| path.to_path_buf())
}

/// Load `path`, or hand back the catalog already loaded from it.
/// Failed loads are not remembered, so a fixed file is picked up on retry.
pub fn load_cached(path: &Path) -> Result<Arc<Catalog>, LoadError> {
    let key = cache_key(path);

    if let Some(hit) = lock_catalogs().get(&key) {
        debug!("catalog cache hit: {}", key.display());
        return Ok(Arc::clone(hit));
    }

    // Read outside the lock; a racing load of the same path keeps the first.
    let loaded = Arc::new(Catalog::from_path(path)?);
    let mut map = lock_catalogs();
    let entry = map.entry(key).or_insert(loaded);
    Ok(Arc::clone(entry))
}

fn lock_catalogs() -> std::sync::MutexGuard<'static, HashMap<PathBuf, Arc<Catalog>>> {
    match CATALOGS.lock() {
        Ok(guard) => guard,
        Err(poisoned) => {
            warn!("catalog cache lock poisoned; continuing with inner state");
            poisoned.into_inner()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn is_cached(path: &Path) -> bool {
        lock_catalogs().contains_key(&cache_key(path))
    }

    fn write_csv(rows: &[&str]) -> tempfile::NamedTempFile {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        writeln!(f, "{}", crate::app::data::tests::HEADER).unwrap();
        for r in rows {
            writeln!(f, "{r}").unwrap();
        }
        f
    }

    #[test]
    fn second_load_returns_same_catalog() {
        let f = write_csv(&["s1,Movie,A,,,,,2020,,90 min,,"]);
        let a = load_cached(f.path()).unwrap();
        assert!(is_cached(f.path()));

        // The file changing on disk does not invalidate the cached copy.
        writeln!(f.as_file(), "s2,Movie,B,,,,,2021,,80 min,,").unwrap();
        let b = load_cached(f.path()).unwrap();
        assert!(Arc::ptr_eq(&a, &b));
        assert_eq!(b.len(), 1);
    }

    #[test]
    fn failures_are_not_cached() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("later.csv");
        assert!(load_cached(&path).is_err());
        assert!(!is_cached(&path));

        std::fs::write(
            &path,
            format!("{}\ns1,TV Show,A,,,,,2019,,1 Season,,\n", crate::app::data::tests::HEADER),
        )
        .unwrap();
        let cat = load_cached(&path).unwrap();
        assert_eq!(cat.len(), 1);
    }
}
