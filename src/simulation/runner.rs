//! Batch arrival simulation.
//!
//! # Algorithm
//!
//! 1. Split arrivals into batches of `batch_size`.
//! 2. After each batch is added, dispatch up to `dispatch_per_batch`
//!    requests.
//! 3. Once all batches are in, drain the elevator.
//!
//! Interleaving arrivals with dispatches is what lets requests land behind
//! a moving head; a single batch covering the whole workload reduces to one
//! sorted sweep.

use crate::elevator::{ElevatorError, ElevatorOps};
use crate::models::{Request, Sector};

use super::SeekKpi;

/// Result of one simulation run.
#[derive(Debug, Clone)]
pub struct SimulationOutcome {
    /// Elevator name.
    pub elevator: &'static str,
    /// Head position before the first dispatch.
    pub start_head: Sector,
    /// Requests in dispatch order.
    pub trace: Vec<Request>,
    /// Seek metrics for `trace`.
    pub kpi: SeekKpi,
}

/// Replays an arrival sequence against an elevator.
///
/// # Example
///
/// ```
/// use u_iosched::elevator::{ClookElevator, NoopElevator};
/// use u_iosched::models::Request;
/// use u_iosched::report::NullSink;
/// use u_iosched::simulation::Simulation;
///
/// let arrivals = vec![Request::read(0, 90), Request::read(1, 10), Request::read(2, 50)];
/// let sim = Simulation::new(arrivals).with_batch_size(3);
///
/// let clook = sim.run(&mut ClookElevator::clook(0, Box::new(NullSink))).unwrap();
/// let noop = sim.run(&mut NoopElevator::noop(0, Box::new(NullSink))).unwrap();
/// assert!(clook.kpi.total_seek < noop.kpi.total_seek);
/// ```
#[derive(Debug, Clone)]
pub struct Simulation {
    arrivals: Vec<Request>,
    batch_size: usize,
    dispatch_per_batch: usize,
}

impl Simulation {
    /// Simulation adding one request and dispatching one per step.
    pub fn new(arrivals: Vec<Request>) -> Self {
        Self {
            arrivals,
            batch_size: 1,
            dispatch_per_batch: 1,
        }
    }

    /// Sets how many requests arrive together (minimum 1).
    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size.max(1);
        self
    }

    /// Sets how many dispatches follow each batch.
    pub fn with_dispatch_per_batch(mut self, dispatches: usize) -> Self {
        self.dispatch_per_batch = dispatches;
        self
    }

    /// Arrival sequence.
    pub fn arrivals(&self) -> &[Request] {
        &self.arrivals
    }

    /// Runs the arrivals through `elevator` and drains it.
    ///
    /// # Errors
    /// [`ElevatorError::Queue`] if the elevator rejects an arrival
    /// (e.g., a duplicate id).
    pub fn run(&self, elevator: &mut dyn ElevatorOps) -> Result<SimulationOutcome, ElevatorError> {
        let start_head = elevator.head();
        let mut trace = Vec::with_capacity(self.arrivals.len());

        for batch in self.arrivals.chunks(self.batch_size) {
            for &request in batch {
                elevator.add_request(request)?;
            }
            for _ in 0..self.dispatch_per_batch {
                match elevator.dispatch(false) {
                    Some(request) => trace.push(request),
                    None => break,
                }
            }
        }
        while let Some(request) = elevator.dispatch(true) {
            trace.push(request);
        }

        let kpi = SeekKpi::calculate(start_head, &trace);
        Ok(SimulationOutcome {
            elevator: elevator.name(),
            start_head,
            trace,
            kpi,
        })
    }
}
