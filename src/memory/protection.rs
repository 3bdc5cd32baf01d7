// Mon Jan 19 2026 - Alex

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Protection {
    None = 0,
    Read = 1,
    Write = 2,
    ReadWrite = 3,
    Execute = 4,
    ReadExecute = 5,
    WriteExecute = 6,
    ReadWriteExecute = 7,
}

impl Protection {
    pub fn from_flags(flags: u32) -> Self {
        match flags & 7 {
            1 => Self::Read,
            2 => Self::Write,
            3 => Self::ReadWrite,
            4 => Self::Execute,
            5 => Self::ReadExecute,
            6 => Self::WriteExecute,
            7 => Self::ReadWriteExecute,
            _ => Self::None,
        }
    }

    pub fn to_flags(self) -> u32 {
        self as u32
    }

    pub fn can_read(self) -> bool {
        self.to_flags() & 1 != 0
    }

    pub fn can_write(self) -> bool {
        self.to_flags() & 2 != 0
    }

    pub fn can_execute(self) -> bool {
        self.to_flags() & 4 != 0
    }
}

impl fmt::Display for Protection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{}{}",
            if self.can_read() { 'r' } else { '-' },
            if self.can_write() { 'w' } else { '-' },
            if self.can_execute() { 'x' } else { '-' },
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flags_round_trip() {
        for flags in 0..8 {
            assert_eq!(Protection::from_flags(flags).to_flags(), flags);
        }
        assert_eq!(Protection::from_flags(0x10), Protection::None);
    }

    #[test]
    fn test_accessors() {
        assert!(Protection::ReadExecute.can_read());
        assert!(Protection::ReadExecute.can_execute());
        assert!(!Protection::ReadExecute.can_write());
        assert!(!Protection::None.can_read());
    }

    #[test]
    fn test_display() {
        assert_eq!(Protection::ReadWriteExecute.to_string(), "rwx");
        assert_eq!(Protection::ReadExecute.to_string(), "r-x");
        assert_eq!(Protection::None.to_string(), "---");
    }
}
