// Mon Jan 19 2026 - Alex

use crate::memory::{Address, MemoryRange, Protection};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A region description as reported by a module walker.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MemoryRegion {
    range: MemoryRange,
    protection: Protection,
    name: String,
}

impl MemoryRegion {
    pub fn new(range: MemoryRange, protection: Protection, name: String) -> Self {
        Self {
            range,
            protection,
            name,
        }
    }

    pub fn range(&self) -> &MemoryRange {
        &self.range
    }

    pub fn protection(&self) -> Protection {
        self.protection
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn start(&self) -> Address {
        self.range.start()
    }

    pub fn end(&self) -> Address {
        self.range.end()
    }

    pub fn size(&self) -> u64 {
        self.range.size()
    }

    pub fn contains(&self, addr: Address) -> bool {
        self.range.contains(addr)
    }

    pub fn is_readable(&self) -> bool {
        self.protection.can_read()
    }

    pub fn is_writable(&self) -> bool {
        self.protection.can_write()
    }

    pub fn is_executable(&self) -> bool {
        self.protection.can_execute()
    }

    pub fn is_code(&self) -> bool {
        self.is_executable() && !self.is_writable()
    }
}

impl fmt::Display for MemoryRegion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.range, self.protection, self.name)
    }
}

/// The view a scan actually runs over: a base address plus the bytes
/// living there. The scanner treats it as an opaque read-only buffer.
#[derive(Debug, Clone, Copy)]
pub struct Region<'a> {
    base: Address,
    data: &'a [u8],
}

impl<'a> Region<'a> {
    pub fn new(base: Address, data: &'a [u8]) -> Self {
        Self { base, data }
    }

    /// View over a plain buffer, reported addresses are the buffer's own.
    pub fn from_slice(data: &'a [u8]) -> Self {
        Self {
            base: Address::from_ptr(data.as_ptr()),
            data,
        }
    }

    /// View over live process memory.
    ///
    /// # Safety
    ///
    /// `base..base+len` must be readable for the lifetime of the view and
    /// must not be written to while the view exists. Speculative scans over
    /// untrusted regions belong under a [`FaultGuard`](crate::memory::FaultGuard).
    pub unsafe fn from_raw_parts(base: Address, len: usize) -> Region<'a> {
        Region {
            base,
            data: std::slice::from_raw_parts(base.as_ptr(), len),
        }
    }

    pub fn base(&self) -> Address {
        self.base
    }

    pub fn data(&self) -> &'a [u8] {
        self.data
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn address_at(&self, offset: usize) -> Address {
        self.base + offset as u64
    }

    pub fn contains(&self, addr: Address) -> bool {
        addr >= self.base && addr < self.base + self.data.len() as u64
    }
}

impl fmt::Display for Region<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {})", self.base, self.base + self.data.len() as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_region_description() {
        let region = MemoryRegion::new(
            MemoryRange::from_start_size(Address::new(0x400000), 0x1000),
            Protection::ReadExecute,
            ".text".to_string(),
        );

        assert!(region.is_readable());
        assert!(region.is_code());
        assert!(region.contains(Address::new(0x400fff)));
        assert!(!region.contains(Address::new(0x401000)));
    }

    #[test]
    fn test_view_addressing() {
        let data = [0u8; 64];
        let view = Region::new(Address::new(0x1000), &data);

        assert_eq!(view.len(), 64);
        assert_eq!(view.address_at(0), Address::new(0x1000));
        assert_eq!(view.address_at(63), Address::new(0x103f));
        assert!(view.contains(Address::new(0x103f)));
        assert!(!view.contains(Address::new(0x1040)));
    }

    #[test]
    fn test_view_from_slice_uses_buffer_address() {
        let data = [1u8, 2, 3];
        let view = Region::from_slice(&data);
        assert_eq!(view.base(), Address::from_ptr(data.as_ptr()));
    }
}
