//! Block I/O request model.
//!
//! A request is owned by the host block layer. The scheduler only keeps a
//! membership copy of the fields it needs: a stable handle, the start
//! sector and the transfer direction.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Sector address on the device's linear address space.
pub type Sector = u64;

/// Host-assigned request handle.
///
/// Unique among the requests currently queued on one scheduler instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct RequestId(pub u64);

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rq#{}", self.0)
    }
}

/// Data direction of a request.
///
/// Used for reporting only; it never affects ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    /// Device to memory.
    Read,
    /// Memory to device.
    Write,
}

impl Direction {
    /// Single-letter tag used in request reports (`R` / `W`).
    pub fn tag(&self) -> &'static str {
        match self {
            Direction::Read => "R",
            Direction::Write => "W",
        }
    }

    /// Whether this is a write.
    #[inline]
    pub fn is_write(&self) -> bool {
        matches!(self, Direction::Write)
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// A pending block I/O request.
///
/// # Example
///
/// ```
/// use u_iosched::models::{Direction, Request};
///
/// let rq = Request::read(1, 2048);
/// assert_eq!(rq.sector, 2048);
/// assert_eq!(rq.direction, Direction::Read);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Request {
    /// Stable handle.
    pub id: RequestId,
    /// Start sector.
    pub sector: Sector,
    /// Transfer direction.
    pub direction: Direction,
}

impl Request {
    /// Creates a request.
    pub fn new(id: u64, sector: Sector, direction: Direction) -> Self {
        Self {
            id: RequestId(id),
            sector,
            direction,
        }
    }

    /// Creates a read request.
    pub fn read(id: u64, sector: Sector) -> Self {
        Self::new(id, sector, Direction::Read)
    }

    /// Creates a write request.
    pub fn write(id: u64, sector: Sector) -> Self {
        Self::new(id, sector, Direction::Write)
    }

    /// Direction and sector, the two fields a request reporter needs.
    pub fn direction_and_sector(&self) -> (Direction, Sector) {
        (self.direction, self.sector)
    }
}
