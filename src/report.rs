//! Request activity reporting.
//!
//! Elevators emit a [`QueueEvent`] whenever a request is added or
//! dispatched. Where the events go is decided by the injected
//! [`EventSink`]; the queue itself never formats output.
//!
//! The conventional report line is
//!
//! ```text
//! [CLOOK] add R                 2048
//! [CLOOK] dsp W                 4096
//! ```
//!
//! with the sector right-aligned in 20 columns.

use std::fmt;
use std::sync::{Arc, Mutex};

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::models::Request;

/// What happened to a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventAction {
    /// Handed to the scheduler by the host.
    Added,
    /// Handed back to the host for issue.
    Dispatched,
}

impl EventAction {
    /// Short tag used in report lines.
    pub fn tag(&self) -> &'static str {
        match self {
            EventAction::Added => "add",
            EventAction::Dispatched => "dsp",
        }
    }
}

/// A reportable scheduler event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueueEvent {
    /// Event kind.
    pub action: EventAction,
    /// The request involved.
    pub request: Request,
}

impl QueueEvent {
    /// An `Added` event.
    pub fn added(request: Request) -> Self {
        Self {
            action: EventAction::Added,
            request,
        }
    }

    /// A `Dispatched` event.
    pub fn dispatched(request: Request) -> Self {
        Self {
            action: EventAction::Dispatched,
            request,
        }
    }

    /// Report line prefixed with `[<PREFIX>]`.
    pub fn line(&self, prefix: &str) -> String {
        format!("[{prefix}] {self}")
    }
}

impl fmt::Display for QueueEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {:>20}",
            self.action.tag(),
            self.request.direction,
            self.request.sector
        )
    }
}

/// Destination for scheduler events.
pub trait EventSink: Send {
    /// Records one event.
    fn record(&mut self, event: &QueueEvent);
}

/// Discards every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl EventSink for NullSink {
    fn record(&mut self, _event: &QueueEvent) {}
}

/// Emits each event as an `info` log line through `tracing`.
#[derive(Debug, Clone)]
pub struct TracingSink {
    prefix: String,
}

impl TracingSink {
    /// Sink whose lines start with `[<prefix in upper case>]`.
    pub fn new(elevator: &str) -> Self {
        Self {
            prefix: elevator.to_uppercase(),
        }
    }

    /// Line prefix (e.g., "CLOOK").
    pub fn prefix(&self) -> &str {
        &self.prefix
    }
}

impl EventSink for TracingSink {
    fn record(&mut self, event: &QueueEvent) {
        info!(
            target: "u_iosched::report",
            action = event.action.tag(),
            direction = event.request.direction.tag(),
            sector = event.request.sector,
            "{}",
            event.line(&self.prefix)
        );
    }
}

impl EventSink for Vec<QueueEvent> {
    fn record(&mut self, event: &QueueEvent) {
        self.push(*event);
    }
}

/// Adapts a closure into a sink.
pub struct FnSink<F>(pub F);

impl<F> EventSink for FnSink<F>
where
    F: FnMut(&QueueEvent) + Send,
{
    fn record(&mut self, event: &QueueEvent) {
        (self.0)(event)
    }
}

/// Cloneable recorder; every clone sees the same event log.
///
/// Useful when the sink is moved into an elevator but the caller still
/// wants to read the events.
#[derive(Debug, Clone, Default)]
pub struct SharedRecorder {
    events: Arc<Mutex<Vec<QueueEvent>>>,
}

impl SharedRecorder {
    /// Creates an empty recorder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the recorded events.
    pub fn events(&self) -> Vec<QueueEvent> {
        self.events
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    /// Report lines for every recorded event.
    pub fn lines(&self, prefix: &str) -> Vec<String> {
        self.events().iter().map(|e| e.line(prefix)).collect()
    }
}

impl EventSink for SharedRecorder {
    fn record(&mut self, event: &QueueEvent) {
        self.events
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(*event);
    }
}
