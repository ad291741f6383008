//! Request queues and the C-LOOK sweep ordering.
//!
//! [`SweepQueue`] keeps pending requests in the order the disk head should
//! service them: a high-priority run of sectors at or ahead of the head,
//! ascending, followed by a low-priority run of sectors behind the head,
//! also ascending. Dispatching always takes the front, so the head sweeps
//! upward once and wraps to the lowest pending sector.
//!
//! [`FifoQueue`] services requests in arrival order and serves as the
//! no-op baseline for comparisons.
//!
//! # Usage
//!
//! ```
//! use u_iosched::models::Request;
//! use u_iosched::queue::SweepQueue;
//!
//! let mut queue = SweepQueue::with_head(20);
//! queue.insert(Request::read(1, 50)).unwrap();
//! queue.insert(Request::read(2, 10)).unwrap();
//! queue.insert(Request::write(3, 80)).unwrap();
//!
//! let order: Vec<u64> = queue.iter().map(|r| r.sector).collect();
//! assert_eq!(order, vec![50, 80, 10]);
//! ```
//!
//! # Reference
//! Silberschatz et al. (2018), "Operating System Concepts", Ch. 11.2: HDD Scheduling

mod arena;
mod fifo;
mod sweep;

pub use fifo::FifoQueue;
pub use sweep::{Run, SweepQueue};

use std::fmt::{self, Debug};

use crate::models::{Request, RequestId, Sector};

/// Errors reported by queue operations.
///
/// Both variants are contract violations by the caller, kept distinct from
/// the legitimate "nothing there" results (`None`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueueError {
    /// The request is already a member of the queue.
    DuplicateRequest(RequestId),
    /// The request is not a member of the queue.
    NotQueued(RequestId),
}

impl fmt::Display for QueueError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QueueError::DuplicateRequest(id) => write!(f, "request {id} is already queued"),
            QueueError::NotQueued(id) => write!(f, "request {id} is not queued"),
        }
    }
}

impl std::error::Error for QueueError {}

/// A pending-request queue driven by a host block layer.
///
/// Implementations decide ordering; the host only inserts, dispatches,
/// removes merged requests and asks for neighbors.
pub trait RequestQueue: Debug + Send {
    /// Policy name (e.g., "clook", "noop").
    fn name(&self) -> &'static str;

    /// Adds a request.
    fn insert(&mut self, request: Request) -> Result<(), QueueError>;

    /// Removes and returns the next request to service.
    fn take_next(&mut self) -> Option<Request>;

    /// Removes a request if present. Absent ids are a no-op.
    fn remove(&mut self, id: RequestId) -> Option<Request>;

    /// Request queued immediately before `id`.
    fn predecessor(&self, id: RequestId) -> Result<Option<Request>, QueueError>;

    /// Request queued immediately after `id`.
    fn successor(&self, id: RequestId) -> Result<Option<Request>, QueueError>;

    /// Number of queued requests.
    fn len(&self) -> usize;

    /// Sector of the last dispatched request.
    fn head(&self) -> Sector;

    /// Whether nothing is queued.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
