// Mon Jan 19 2026 - Alex

use thiserror::Error;

#[derive(Error, Debug)]
pub enum MemoryError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid address: {0}")]
    InvalidAddress(u64),
    #[error("Access violation at address {0:#x}")]
    AccessViolation(u64),
    #[error("Region not found: {0}")]
    RegionNotFound(String),
    #[error("Permission denied: {0}")]
    PermissionDenied(String),
    #[error("Out of bounds: address {0:#x} not in region")]
    OutOfBounds(u64),
    #[error("Not supported: {0}")]
    NotSupported(String),
}
