// Thu Jan 22 2026 - Alex

use crate::memory::{Address, Region};
use crate::scan::Scanner;
use log::trace;
use parking_lot::RwLock;
use std::collections::HashMap;

type CacheKey = (u64, u64, usize);

/// In-memory cache of scan results, keyed by pattern fingerprint and the
/// scanned region's base and length. Useful when the same signatures run
/// repeatedly against an unchanged module. The whole cache is dropped once
/// it grows past `max_entries`; scan results are small and recomputable.
pub struct ScanCache {
    entries: RwLock<HashMap<CacheKey, Vec<Address>>>,
    max_entries: usize,
}

impl ScanCache {
    pub fn new(max_entries: usize) -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            max_entries,
        }
    }

    /// Like [`Scanner::scan_all`], but answered from the cache when the
    /// same pattern already scanned the same region.
    pub fn scan_all(&self, scanner: &Scanner<'_>, region: Region<'_>) -> Vec<Address> {
        let key = (
            scanner.pattern().fingerprint(),
            region.base().as_u64(),
            region.len(),
        );

        if let Some(results) = self.entries.read().get(&key) {
            trace!("cache hit for {} at {}", scanner.pattern(), region.base());
            return results.clone();
        }

        trace!("cache miss for {} at {}", scanner.pattern(), region.base());
        let results = scanner.scan_all(region);

        let mut entries = self.entries.write();
        if entries.len() >= self.max_entries {
            entries.clear();
        }
        entries.insert(key, results.clone());

        results
    }

    pub fn clear(&self) {
        self.entries.write().clear();
    }

    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }
}
