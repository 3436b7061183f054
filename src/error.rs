use std::fmt;
use std::io;
use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Load(#[from] LoadError),
    #[error("machine halted: {0}")]
    Halted(#[from] Fault),
    #[error(transparent)]
    Display(#[from] DisplayError),
}

/// Reasons a program could not be placed in memory.
/// Nothing is copied into memory when any of these is returned.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("unable to read program {}: {source}", .path.display())]
    SourceUnavailable { path: PathBuf, source: io::Error },
    #[error("program is {size} bytes but only {capacity} bytes are available")]
    ProgramTooLarge { size: usize, capacity: usize },
    #[error("load offset {offset:#05X} is outside program memory")]
    InvalidOffset { offset: u16 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FaultKind {
    StackOverflow,
    StackUnderflow,
    OutOfBounds { address: usize, len: usize },
    /// A store aimed below the program region
    ReservedWrite { address: usize },
}

impl fmt::Display for FaultKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FaultKind::StackOverflow => write!(f, "stack overflow"),
            FaultKind::StackUnderflow => write!(f, "stack underflow"),
            FaultKind::OutOfBounds { address, len } => {
                write!(f, "{} byte access at {:#05X} runs past memory", len, address)
            }
            FaultKind::ReservedWrite { address } => {
                write!(f, "write to reserved address {:#05X}", address)
            }
        }
    }
}

/// An unrecoverable fault along with the instruction that raised it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("{kind} at pc {pc:#05X} executing {opcode:#06X}")]
pub struct Fault {
    pub kind: FaultKind,
    pub opcode: u16,
    pub pc: u16,
}

/// Failure reported by a display backend
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("display backend: {0}")]
pub struct DisplayError(pub String);

impl From<String> for DisplayError {
    fn from(message: String) -> Self {
        DisplayError(message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fault_message_carries_context() {
        let fault = Fault {
            kind: FaultKind::StackUnderflow,
            opcode: 0x00EE,
            pc: 0x204,
        };
        assert_eq!(
            fault.to_string(),
            "stack underflow at pc 0x204 executing 0x00EE"
        );
    }

    #[test]
    fn test_too_large_message() {
        let err = LoadError::ProgramTooLarge {
            size: 3585,
            capacity: 3584,
        };
        assert_eq!(
            err.to_string(),
            "program is 3585 bytes but only 3584 bytes are available"
        );
    }

    #[test]
    fn test_halt_converts_into_error() {
        let fault = Fault {
            kind: FaultKind::StackOverflow,
            opcode: 0x2200,
            pc: 0x200,
        };
        let err: Error = fault.into();
        assert!(matches!(err, Error::Halted(f) if f == fault));
    }
}
