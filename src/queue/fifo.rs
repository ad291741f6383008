//! Arrival-order (no-op) queue.
//!
//! Services requests exactly as they arrive. Used as the baseline that
//! C-LOOK is measured against.

use std::collections::HashMap;

use tracing::{debug, warn};

use super::arena::{LinkedSlots, SlotIndex};
use super::{QueueError, RequestQueue};
use crate::models::{Request, RequestId, Sector};

/// First-in, first-out request queue.
#[derive(Debug, Clone, Default)]
pub struct FifoQueue {
    slots: LinkedSlots<Request>,
    index: HashMap<RequestId, SlotIndex>,
    head: Sector,
}

impl FifoQueue {
    /// Creates an empty queue with the head at sector 0.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty queue with the head at `head`.
    pub fn with_head(head: Sector) -> Self {
        Self {
            head,
            ..Self::default()
        }
    }

    /// Queued requests in arrival order.
    pub fn iter(&self) -> impl Iterator<Item = &Request> + '_ {
        self.slots.iter().map(|(_, request)| request)
    }

    fn neighbor(
        &self,
        id: RequestId,
        step: impl Fn(&LinkedSlots<Request>, SlotIndex) -> Option<SlotIndex>,
    ) -> Result<Option<Request>, QueueError> {
        let Some(&slot) = self.index.get(&id) else {
            warn!(id = id.0, "neighbor lookup for a request that is not queued");
            return Err(QueueError::NotQueued(id));
        };
        Ok(step(&self.slots, slot)
            .and_then(|s| self.slots.get(s))
            .copied())
    }
}

impl RequestQueue for FifoQueue {
    fn name(&self) -> &'static str {
        "noop"
    }

    fn insert(&mut self, request: Request) -> Result<(), QueueError> {
        if self.index.contains_key(&request.id) {
            warn!(id = request.id.0, sector = request.sector, "duplicate insert rejected");
            return Err(QueueError::DuplicateRequest(request.id));
        }
        let slot = self.slots.push_back(request);
        self.index.insert(request.id, slot);
        debug!(id = request.id.0, sector = request.sector, len = self.len(), "queued");
        Ok(())
    }

    fn take_next(&mut self) -> Option<Request> {
        let request = self.slots.pop_front()?;
        self.index.remove(&request.id);
        self.head = request.sector;
        debug!(id = request.id.0, sector = request.sector, len = self.len(), "dispatched");
        Some(request)
    }

    fn remove(&mut self, id: RequestId) -> Option<Request> {
        let slot = self.index.remove(&id)?;
        let removed = self.slots.remove(slot);
        debug!(id = id.0, len = self.len(), "removed");
        removed
    }

    fn predecessor(&self, id: RequestId) -> Result<Option<Request>, QueueError> {
        self.neighbor(id, LinkedSlots::prev)
    }

    fn successor(&self, id: RequestId) -> Result<Option<Request>, QueueError> {
        self.neighbor(id, LinkedSlots::next)
    }

    fn len(&self) -> usize {
        self.slots.len()
    }

    fn head(&self) -> Sector {
        self.head
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_arrival_order() {
        let mut queue = FifoQueue::with_head(500);
        for (i, s) in [900, 100, 600].into_iter().enumerate() {
            queue.insert(Request::read(i as u64, s)).unwrap();
        }
        let order: Vec<Sector> = std::iter::from_fn(|| queue.take_next())
            .map(|r| r.sector)
            .collect();
        assert_eq!(order, vec![900, 100, 600]);
        assert_eq!(queue.head(), 600);
    }

    #[test]
    fn test_neighbors_and_remove() {
        let mut queue = FifoQueue::new();
        queue.insert(Request::read(1, 10)).unwrap();
        queue.insert(Request::read(2, 5)).unwrap();
        queue.insert(Request::read(3, 7)).unwrap();

        assert_eq!(queue.successor(RequestId(1)).unwrap().map(|r| r.id), Some(RequestId(2)));
        assert_eq!(queue.predecessor(RequestId(1)), Ok(None));

        assert!(queue.remove(RequestId(2)).is_some());
        assert!(queue.remove(RequestId(2)).is_none());
        assert_eq!(queue.successor(RequestId(1)).unwrap().map(|r| r.id), Some(RequestId(3)));
        assert_eq!(
            queue.predecessor(RequestId(2)),
            Err(QueueError::NotQueued(RequestId(2)))
        );
    }

    #[test]
    fn test_duplicate_rejected() {
        let mut queue = FifoQueue::new();
        queue.insert(Request::read(1, 10)).unwrap();
        assert_eq!(
            queue.insert(Request::read(1, 10)),
            Err(QueueError::DuplicateRequest(RequestId(1)))
        );
        assert_eq!(queue.iter().count(), 1);
    }

    #[test]
    fn test_insert_and_remove_track_len() {
        let mut queue = FifoQueue::new();
        queue.insert(Request::read(1, 10)).unwrap();
        queue.insert(Request::write(2, 20)).unwrap();
        assert_eq!(queue.len(), 2);

        assert!(queue.insert(Request::write(2, 30)).is_err());
        assert_eq!(queue.len(), 2);
        assert_eq!(queue.iter().map(|r| r.sector).collect::<Vec<_>>(), vec![10, 20]);

        assert_eq!(queue.remove(RequestId(1)).map(|r| r.sector), Some(10));
        assert_eq!(queue.len(), 1);
        assert_eq!(queue.remove(RequestId(1)), None);
        assert_eq!(queue.len(), 1);
        assert_eq!(queue.head(), 0);
    }
}
