//! Host-facing elevator hooks.
//!
//! A block layer drives its scheduler through a fixed set of extension
//! points: add a request, dispatch one, drop a request merged into its
//! neighbor, look up neighbors, and tear down. [`ElevatorOps`] models those
//! hooks; [`Elevator`] implements them over any [`RequestQueue`] and reports
//! adds and dispatches to an [`EventSink`].
//!
//! # Usage
//!
//! ```
//! use u_iosched::elevator::{ClookElevator, ElevatorOps};
//! use u_iosched::models::Request;
//! use u_iosched::report::NullSink;
//!
//! let mut elevator = ClookElevator::clook(0, Box::new(NullSink));
//! elevator.add_request(Request::read(1, 700)).unwrap();
//! elevator.add_request(Request::write(2, 200)).unwrap();
//!
//! assert_eq!(elevator.dispatch(false).map(|r| r.sector), Some(200));
//! assert_eq!(elevator.dispatch(false).map(|r| r.sector), Some(700));
//! assert!(elevator.dispatch(false).is_none());
//! Box::new(elevator).exit();
//! ```

mod config;
mod registry;

pub use config::ElevatorConfig;
pub use registry::{ElevatorError, ElevatorFactory, ElevatorRegistry};

use std::fmt;

use tracing::debug;

use crate::models::{Request, RequestId, Sector};
use crate::queue::{FifoQueue, QueueError, RequestQueue, SweepQueue};
use crate::report::{EventSink, NullSink, QueueEvent, TracingSink};

/// Scheduler extension points called by the host block layer.
pub trait ElevatorOps: Send {
    /// Registered name.
    fn name(&self) -> &'static str;

    /// A new request arrived.
    fn add_request(&mut self, request: Request) -> Result<(), QueueError>;

    /// Hands the next request to the host, or `None` when idle.
    ///
    /// `force` asks the elevator to empty any internal holding; elevators
    /// that never hold requests back ignore it.
    fn dispatch(&mut self, force: bool) -> Option<Request>;

    /// `next` was merged into `request` and must leave the queue.
    fn merged_requests(&mut self, request: RequestId, next: RequestId);

    /// Request queued before `request`.
    fn former_request(&self, request: RequestId) -> Result<Option<Request>, QueueError>;

    /// Request queued after `request`.
    fn latter_request(&self, request: RequestId) -> Result<Option<Request>, QueueError>;

    /// Number of queued requests.
    fn queued(&self) -> usize;

    /// Sector of the last dispatched request.
    fn head(&self) -> Sector;

    /// Whether nothing is queued.
    fn is_queue_empty(&self) -> bool {
        self.queued() == 0
    }

    /// Tears the elevator down.
    ///
    /// # Panics
    /// If requests are still queued.
    fn exit(self: Box<Self>);
}

/// Elevator over a request queue with event reporting.
pub struct Elevator<Q> {
    queue: Q,
    sink: Box<dyn EventSink>,
}

/// C-LOOK elevator.
pub type ClookElevator = Elevator<SweepQueue>;

/// Arrival-order elevator.
pub type NoopElevator = Elevator<FifoQueue>;

impl<Q: RequestQueue> Elevator<Q> {
    /// Wraps `queue`, reporting to `sink`.
    pub fn new(queue: Q, sink: Box<dyn EventSink>) -> Self {
        Self { queue, sink }
    }

    /// Wraps `queue`, choosing the sink from `config`.
    pub fn from_config(queue: Q, config: &ElevatorConfig) -> Self {
        let sink: Box<dyn EventSink> = if config.report_events {
            Box::new(TracingSink::new(queue.name()))
        } else {
            Box::new(NullSink)
        };
        Self::new(queue, sink)
    }

    /// Replaces the event sink.
    pub fn with_sink(mut self, sink: Box<dyn EventSink>) -> Self {
        self.sink = sink;
        self
    }

    /// The underlying queue.
    pub fn queue(&self) -> &Q {
        &self.queue
    }
}

impl ClookElevator {
    /// C-LOOK elevator with the head at `head`.
    pub fn clook(head: Sector, sink: Box<dyn EventSink>) -> Self {
        Self::new(SweepQueue::with_head(head), sink)
    }
}

impl NoopElevator {
    /// Arrival-order elevator with the head at `head`.
    pub fn noop(head: Sector, sink: Box<dyn EventSink>) -> Self {
        Self::new(FifoQueue::with_head(head), sink)
    }
}

impl<Q: RequestQueue> ElevatorOps for Elevator<Q> {
    fn name(&self) -> &'static str {
        self.queue.name()
    }

    fn add_request(&mut self, request: Request) -> Result<(), QueueError> {
        self.queue.insert(request)?;
        self.sink.record(&QueueEvent::added(request));
        Ok(())
    }

    fn dispatch(&mut self, _force: bool) -> Option<Request> {
        let request = self.queue.take_next()?;
        self.sink.record(&QueueEvent::dispatched(request));
        Some(request)
    }

    fn merged_requests(&mut self, request: RequestId, next: RequestId) {
        if self.queue.remove(next).is_some() {
            debug!(into = request.0, merged = next.0, "merged request dropped");
        }
    }

    fn former_request(&self, request: RequestId) -> Result<Option<Request>, QueueError> {
        self.queue.predecessor(request)
    }

    fn latter_request(&self, request: RequestId) -> Result<Option<Request>, QueueError> {
        self.queue.successor(request)
    }

    fn queued(&self) -> usize {
        self.queue.len()
    }

    fn head(&self) -> Sector {
        self.queue.head()
    }

    fn exit(self: Box<Self>) {
        assert!(
            self.queue.is_empty(),
            "{} elevator exited with {} pending requests",
            self.queue.name(),
            self.queue.len()
        );
    }
}

impl<Q: RequestQueue> fmt::Debug for Elevator<Q> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Elevator")
            .field("queue", &self.queue)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::{EventAction, SharedRecorder};

    #[test]
    fn test_add_and_dispatch_are_reported() {
        let recorder = SharedRecorder::new();
        let mut elevator = ClookElevator::clook(0, Box::new(recorder.clone()));

        elevator.add_request(Request::read(1, 300)).unwrap();
        elevator.add_request(Request::write(2, 100)).unwrap();
        elevator.dispatch(false);

        let events = recorder.events();
        assert_eq!(events.len(), 3);
        assert_eq!(events[0].action, EventAction::Added);
        assert_eq!(events[2].action, EventAction::Dispatched);
        assert_eq!(events[2].request.sector, 100);
        assert_eq!(
            recorder.lines("CLOOK")[2],
            format!("[CLOOK] dsp W {:>20}", 100)
        );
    }

    #[test]
    fn test_rejected_add_not_reported() {
        let recorder = SharedRecorder::new();
        let mut elevator = ClookElevator::clook(0, Box::new(recorder.clone()));
        elevator.add_request(Request::read(1, 5)).unwrap();
        assert!(elevator.add_request(Request::read(1, 5)).is_err());
        assert_eq!(recorder.events().len(), 1);
    }

    #[test]
    fn test_idle_dispatch() {
        let recorder = SharedRecorder::new();
        let mut elevator = ClookElevator::clook(0, Box::new(recorder.clone()));
        assert!(elevator.dispatch(true).is_none());
        assert!(recorder.events().is_empty());
        assert!(elevator.is_queue_empty());
    }

    #[test]
    fn test_merge_drops_next_only() {
        let mut elevator = ClookElevator::clook(0, Box::new(NullSink));
        elevator.add_request(Request::read(1, 8)).unwrap();
        elevator.add_request(Request::read(2, 16)).unwrap();

        elevator.merged_requests(RequestId(1), RequestId(2));
        elevator.merged_requests(RequestId(1), RequestId(2));
        assert_eq!(elevator.queued(), 1);
        assert_eq!(elevator.latter_request(RequestId(1)), Ok(None));
    }

    #[test]
    fn test_former_and_latter() {
        let mut elevator = ClookElevator::clook(0, Box::new(NullSink));
        elevator.add_request(Request::read(1, 10)).unwrap();
        elevator.add_request(Request::read(2, 20)).unwrap();

        assert_eq!(
            elevator.former_request(RequestId(2)).unwrap().map(|r| r.id),
            Some(RequestId(1))
        );
        assert_eq!(
            elevator.latter_request(RequestId(1)).unwrap().map(|r| r.id),
            Some(RequestId(2))
        );
        assert_eq!(
            elevator.former_request(RequestId(3)),
            Err(QueueError::NotQueued(RequestId(3)))
        );
    }

    #[test]
    fn test_head_follows_dispatch() {
        let mut elevator = ClookElevator::clook(50, Box::new(NullSink));
        elevator.add_request(Request::read(1, 10)).unwrap();
        elevator.add_request(Request::read(2, 60)).unwrap();
        assert_eq!(elevator.dispatch(false).map(|r| r.sector), Some(60));
        assert_eq!(elevator.head(), 60);
        assert_eq!(elevator.dispatch(false).map(|r| r.sector), Some(10));
        assert_eq!(elevator.head(), 10);
    }

    #[test]
    fn test_noop_keeps_arrival_order() {
        let mut elevator = NoopElevator::noop(0, Box::new(NullSink));
        elevator.add_request(Request::read(1, 90)).unwrap();
        elevator.add_request(Request::read(2, 10)).unwrap();
        assert_eq!(elevator.name(), "noop");
        assert_eq!(elevator.dispatch(false).map(|r| r.sector), Some(90));
        assert_eq!(elevator.dispatch(false).map(|r| r.sector), Some(10));
    }

    #[test]
    fn test_from_config_without_reporting() {
        let config = ElevatorConfig::default().with_report_events(false);
        let mut elevator = Elevator::from_config(SweepQueue::with_head(config.initial_head), &config);
        elevator.add_request(Request::read(1, 1)).unwrap();
        assert_eq!(elevator.queue().len(), 1);
        elevator.dispatch(false);
        Box::new(elevator).exit();
    }

    #[test]
    #[should_panic(expected = "clook elevator exited with 1 pending requests")]
    fn test_exit_with_pending_panics() {
        let mut elevator = ClookElevator::clook(0, Box::new(NullSink));
        elevator.add_request(Request::read(1, 1)).unwrap();
        Box::new(elevator).exit();
    }
}
