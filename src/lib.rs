// Mon Jan 19 2026 - Alex

pub mod cache;
pub mod memory;
pub mod pattern;
pub mod scan;

pub use cache::ScanCache;
pub use memory::{
    Address, FaultGuard, MemoryError, MemoryRange, MemoryRegion, ModuleWalker, ProtectOps,
    Protection, Region,
};
pub use pattern::{FrequencyTable, Pattern, PatternSettings};
pub use scan::{scan_modules, scan_regions, ByteSearch, ScanStrategy, Scanner};

use std::ops::ControlFlow;

/// Parses an IDA-style signature and returns its first hit in `region`.
pub fn scan_first(signature: &str, region: Region<'_>) -> Option<Address> {
    let pattern = Pattern::from_ida(signature);
    Scanner::new(&pattern).scan_first(region)
}

/// Parses an IDA-style signature and returns every hit in `region`.
pub fn scan_all(signature: &str, region: Region<'_>) -> Vec<Address> {
    let pattern = Pattern::from_ida(signature);
    Scanner::new(&pattern).scan_all(region)
}

/// Parses an IDA-style signature and drives `f` once per hit, in ascending
/// address order, until it breaks.
pub fn scan_with<F>(signature: &str, region: Region<'_>, f: F)
where
    F: FnMut(Address) -> ControlFlow<()>,
{
    let pattern = Pattern::from_ida(signature);
    Scanner::new(&pattern).scan_with(region, f)
}
