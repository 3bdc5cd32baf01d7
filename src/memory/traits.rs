// Mon Jan 19 2026 - Alex

use crate::memory::{Address, MemoryError, MemoryRegion, Protection};

/// Enumerates the scannable regions of a module or process image.
///
/// Implemented by platform code (PE/ELF walkers, `/proc/pid/maps` readers).
/// The scanner only ever touches regions whose protection includes read.
pub trait ModuleWalker {
    fn regions(&self) -> Result<Vec<MemoryRegion>, MemoryError>;
}

/// Page-protection primitive, implemented by platform code.
pub trait ProtectOps {
    fn protect_query(&self, addr: Address) -> Result<Protection, MemoryError>;

    /// Changes protection for `len` bytes at `addr`, returning the previous
    /// protection so callers can restore it.
    fn protect_modify(
        &self,
        addr: Address,
        len: usize,
        protection: Protection,
    ) -> Result<Protection, MemoryError>;
}

/// Scoped fault translation: runs `body`, converting platform faults
/// (SIGSEGV, structured exceptions) raised inside it into
/// [`MemoryError::AccessViolation`].
pub trait FaultGuard {
    fn run(&self, body: &mut dyn FnMut()) -> Result<(), MemoryError>;
}
