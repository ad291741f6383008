//! C-LOOK sweep queue.
//!
//! # Algorithm
//!
//! Each insert classifies the request against the current head:
//!
//! 1. **High priority** (`sector >= head`): placed before the first queued
//!    request that is either low priority or has a sector `>=` its own.
//!    Appended when no such request exists.
//! 2. **Low priority** (`sector < head`): placed before the first
//!    low-priority request with a sector `>=` its own. Appended when no
//!    such request exists, which makes it the first low-priority entry if
//!    the low run was empty.
//!
//! New requests go in front of queued requests with an equal sector.
//! Dispatch pops the front and moves the head to its sector.
//!
//! # Complexity
//! Insert is O(n). Dispatch, remove, membership and neighbor lookup are O(1).
//!
//! # Starvation
//! Requests behind the head wait until the high run drains. A steady stream
//! of requests ahead of the head delays them indefinitely; no aging is
//! applied.

use std::collections::HashMap;

use tracing::{debug, warn};

use super::arena::{LinkedSlots, SlotIndex};
use super::{QueueError, RequestQueue};
use crate::models::{Direction, Request, RequestId, Sector};

/// Which side of the head a sector falls on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Run {
    /// At or ahead of the head: serviced in the current sweep.
    High,
    /// Behind the head: serviced after the sweep wraps.
    Low,
}

impl Run {
    /// Classifies `sector` against `head`. Equality counts as high.
    #[inline]
    pub fn of(sector: Sector, head: Sector) -> Self {
        if sector >= head {
            Run::High
        } else {
            Run::Low
        }
    }
}

/// Pending requests in C-LOOK service order.
///
/// The head position belongs to the queue instance, so independent queues
/// (one per device) never interfere.
///
/// # Example
///
/// ```
/// use u_iosched::models::Request;
/// use u_iosched::queue::SweepQueue;
///
/// let mut queue = SweepQueue::new();
/// queue.insert(Request::read(1, 300)).unwrap();
/// queue.insert(Request::read(2, 100)).unwrap();
///
/// assert_eq!(queue.take_next().map(|r| r.sector), Some(100));
/// assert_eq!(queue.head(), 100);
/// ```
#[derive(Debug, Clone)]
pub struct SweepQueue {
    slots: LinkedSlots<Request>,
    index: HashMap<RequestId, SlotIndex>,
    head: Sector,
}

impl SweepQueue {
    /// Creates an empty queue with the head at sector 0.
    pub fn new() -> Self {
        Self::with_head(0)
    }

    /// Creates an empty queue with the head at `head`.
    pub fn with_head(head: Sector) -> Self {
        Self {
            slots: LinkedSlots::new(),
            index: HashMap::new(),
            head,
        }
    }

    /// Sector of the last dispatched request (or the initial head).
    #[inline]
    pub fn head(&self) -> Sector {
        self.head
    }

    /// Number of queued requests.
    #[inline]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Whether nothing is queued.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Whether `id` is queued.
    pub fn contains(&self, id: RequestId) -> bool {
        self.index.contains_key(&id)
    }

    /// Queued request with handle `id`.
    pub fn get(&self, id: RequestId) -> Option<&Request> {
        self.index.get(&id).and_then(|&slot| self.slots.get(slot))
    }

    /// Run `sector` would join if inserted now.
    pub fn classify(&self, sector: Sector) -> Run {
        Run::of(sector, self.head)
    }

    /// Queued requests in service order.
    pub fn iter(&self) -> impl Iterator<Item = &Request> + '_ {
        self.slots.iter().map(|(_, request)| request)
    }

    /// Inserts `request` at its sweep position.
    ///
    /// # Errors
    /// [`QueueError::DuplicateRequest`] if the id is already queued; the
    /// queue is left unchanged.
    pub fn insert(&mut self, request: Request) -> Result<(), QueueError> {
        if self.index.contains_key(&request.id) {
            warn!(id = request.id.0, sector = request.sector, "duplicate insert rejected");
            return Err(QueueError::DuplicateRequest(request.id));
        }

        let slot = match self.insertion_point(request.sector) {
            Some(at) => self.slots.insert_before(at, request),
            None => self.slots.push_back(request),
        };
        self.index.insert(request.id, slot);

        debug!(
            id = request.id.0,
            sector = request.sector,
            head = self.head,
            run = ?self.classify(request.sector),
            len = self.len(),
            "queued"
        );
        Ok(())
    }

    /// Removes the front request and moves the head to its sector.
    ///
    /// Returns `None` when there is nothing to dispatch.
    pub fn take_next(&mut self) -> Option<Request> {
        let request = self.slots.pop_front()?;
        self.index.remove(&request.id);
        self.head = request.sector;

        debug!(
            id = request.id.0,
            sector = request.sector,
            len = self.len(),
            "dispatched"
        );
        Some(request)
    }

    /// Removes `id` if queued. The head is not moved.
    pub fn remove(&mut self, id: RequestId) -> Option<Request> {
        let slot = self.index.remove(&id)?;
        let removed = self.slots.remove(slot);
        debug!(id = id.0, len = self.len(), "removed");
        removed
    }

    /// Request immediately before `id`, or `None` if `id` is first.
    ///
    /// # Errors
    /// [`QueueError::NotQueued`] if `id` is not a member.
    pub fn predecessor(&self, id: RequestId) -> Result<Option<Request>, QueueError> {
        let slot = self.slot_of(id)?;
        Ok(self.slots.prev(slot).and_then(|s| self.slots.get(s)).copied())
    }

    /// Request immediately after `id`, or `None` if `id` is last.
    ///
    /// # Errors
    /// [`QueueError::NotQueued`] if `id` is not a member.
    pub fn successor(&self, id: RequestId) -> Result<Option<Request>, QueueError> {
        let slot = self.slot_of(id)?;
        Ok(self.slots.next(slot).and_then(|s| self.slots.get(s)).copied())
    }

    /// Direction and sector of a queued request, for reporting.
    pub fn peek_direction_and_sector(&self, id: RequestId) -> Option<(Direction, Sector)> {
        self.get(id).map(Request::direction_and_sector)
    }

    /// Tears the queue down.
    ///
    /// # Panics
    /// If requests are still queued. The host must drain before teardown.
    pub fn destroy(self) {
        assert!(
            self.is_empty(),
            "sweep queue destroyed with {} pending requests",
            self.len()
        );
    }

    fn slot_of(&self, id: RequestId) -> Result<SlotIndex, QueueError> {
        match self.index.get(&id) {
            Some(&slot) => Ok(slot),
            None => {
                warn!(id = id.0, "neighbor lookup for a request that is not queued");
                Err(QueueError::NotQueued(id))
            }
        }
    }

    /// Slot the new request goes in front of; `None` means append.
    fn insertion_point(&self, sector: Sector) -> Option<SlotIndex> {
        let head = self.head;
        let run = Run::of(sector, head);

        self.slots
            .iter()
            .find(|(_, queued)| match (run, Run::of(queued.sector, head)) {
                (Run::High, Run::Low) => true,
                (Run::High, Run::High) | (Run::Low, Run::Low) => sector <= queued.sector,
                (Run::Low, Run::High) => false,
            })
            .map(|(slot, _)| slot)
    }
}

impl Default for SweepQueue {
    fn default() -> Self {
        Self::new()
    }
}

impl RequestQueue for SweepQueue {
    fn name(&self) -> &'static str {
        "clook"
    }

    fn insert(&mut self, request: Request) -> Result<(), QueueError> {
        SweepQueue::insert(self, request)
    }

    fn take_next(&mut self) -> Option<Request> {
        SweepQueue::take_next(self)
    }

    fn remove(&mut self, id: RequestId) -> Option<Request> {
        SweepQueue::remove(self, id)
    }

    fn predecessor(&self, id: RequestId) -> Result<Option<Request>, QueueError> {
        SweepQueue::predecessor(self, id)
    }

    fn successor(&self, id: RequestId) -> Result<Option<Request>, QueueError> {
        SweepQueue::successor(self, id)
    }

    fn len(&self) -> usize {
        SweepQueue::len(self)
    }

    fn head(&self) -> Sector {
        SweepQueue::head(self)
    }
}
