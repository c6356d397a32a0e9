//! Error types reported by map operations.

use std::collections::TryReserveError;
use std::error::Error;
use std::fmt;

/// An operation on a [`ProbingMap`](crate::ProbingMap) failed.
///
/// Every error is reported synchronously through the return channel of the
/// failing call, and no call leaves the map partially mutated: a failed
/// insert or a failed growth leaves the table unchanged at its previous
/// capacity.
#[derive(Debug)]
pub enum MapError {
    /// A map was requested with a capacity of zero slots.
    InvalidCapacity,
    /// Doubling the capacity overflowed `usize`.
    CapacityOverflow,
    /// The allocator could not provide the slot array.
    AllocationFailed(TryReserveError),
}

impl fmt::Display for MapError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidCapacity => write!(f, "capacity must be greater than zero"),
            Self::CapacityOverflow => write!(f, "doubling the capacity overflowed usize"),
            Self::AllocationFailed(_) => write!(f, "slot array allocation failed"),
        }
    }
}

impl Error for MapError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::AllocationFailed(inner) => Some(inner),
            _ => None,
        }
    }
}

impl From<TryReserveError> for MapError {
    fn from(err: TryReserveError) -> Self {
        Self::AllocationFailed(err)
    }
}
