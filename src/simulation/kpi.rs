//! Seek metrics for a dispatch trace.
//!
//! # Metrics
//!
//! | Metric | Definition |
//! |--------|-----------|
//! | Total seek | Sum of \|sector_i - sector_{i-1}\|, starting from the initial head |
//! | Max seek | Largest single head movement |
//! | Avg seek | Total seek / dispatched requests |
//! | Wraps | Dispatches to a lower sector than the previous one |

use crate::models::{Request, Sector};

/// Head-movement indicators.
#[derive(Debug, Clone, PartialEq)]
pub struct SeekKpi {
    /// Requests dispatched.
    pub dispatched: usize,
    /// Total head movement (sectors), saturating at `u64::MAX`.
    pub total_seek: u64,
    /// Largest single movement (sectors).
    pub max_seek: u64,
    /// Mean movement per dispatch (sectors).
    pub avg_seek: f64,
    /// Number of downward jumps.
    pub wraps: usize,
}

impl SeekKpi {
    /// Computes metrics for `trace`, with the head initially at `start_head`.
    pub fn calculate(start_head: Sector, trace: &[Request]) -> Self {
        let mut head = start_head;
        let mut total_seek: u64 = 0;
        let mut max_seek: u64 = 0;
        let mut wraps: usize = 0;

        for (i, request) in trace.iter().enumerate() {
            let seek = head.abs_diff(request.sector);
            total_seek = total_seek.saturating_add(seek);
            max_seek = max_seek.max(seek);
            // The first move is measured from the starting head, not a dispatch.
            if i > 0 && request.sector < head {
                wraps += 1;
            }
            head = request.sector;
        }

        let avg_seek = if trace.is_empty() {
            0.0
        } else {
            total_seek as f64 / trace.len() as f64
        };

        Self {
            dispatched: trace.len(),
            total_seek,
            max_seek,
            avg_seek,
            wraps,
        }
    }

    /// Fraction of `baseline`'s total seek avoided (negative if worse).
    pub fn improvement_over(&self, baseline: &SeekKpi) -> f64 {
        if baseline.total_seek == 0 {
            return 0.0;
        }
        1.0 - self.total_seek as f64 / baseline.total_seek as f64
    }
}
