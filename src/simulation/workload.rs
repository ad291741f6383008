//! Synthetic request workloads.
//!
//! Random workloads draw sectors uniformly over a span with a configurable
//! read/write mix. The sequential copy workload mimics a program that reads
//! a file block by block and writes each block to a second file.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::models::{Direction, Request, Sector};

/// Parameters for random workloads.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorkloadConfig {
    /// Number of requests to generate.
    pub requests: usize,
    /// Sectors are drawn from `0..sector_span`.
    pub sector_span: Sector,
    /// Probability that a request is a write (0.0..=1.0).
    pub write_ratio: f64,
    /// RNG seed.
    pub seed: u64,
}

impl Default for WorkloadConfig {
    fn default() -> Self {
        Self {
            requests: 1_000,
            sector_span: 1 << 20,
            write_ratio: 0.3,
            seed: 42,
        }
    }
}

impl WorkloadConfig {
    /// Sets the request count.
    pub fn with_requests(mut self, requests: usize) -> Self {
        self.requests = requests;
        self
    }

    /// Sets the sector span.
    pub fn with_sector_span(mut self, span: Sector) -> Self {
        self.sector_span = span;
        self
    }

    /// Sets the write probability.
    pub fn with_write_ratio(mut self, ratio: f64) -> Self {
        self.write_ratio = ratio;
        self
    }

    /// Sets the RNG seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }
}

/// Seeded random request generator.
///
/// # Example
///
/// ```
/// use u_iosched::simulation::{WorkloadConfig, WorkloadGenerator};
///
/// let config = WorkloadConfig::default().with_requests(10).with_sector_span(100);
/// let requests = WorkloadGenerator::new(config).generate();
/// assert_eq!(requests.len(), 10);
/// assert!(requests.iter().all(|r| r.sector < 100));
/// ```
#[derive(Debug, Clone)]
pub struct WorkloadGenerator {
    config: WorkloadConfig,
    rng: SmallRng,
    next_id: u64,
}

impl WorkloadGenerator {
    /// Creates a generator seeded from `config.seed`.
    pub fn new(config: WorkloadConfig) -> Self {
        let rng = SmallRng::seed_from_u64(config.seed);
        Self {
            config,
            rng,
            next_id: 0,
        }
    }

    /// Draws one request.
    pub fn next_request(&mut self) -> Request {
        let span = self.config.sector_span.max(1);
        let sector = self.rng.random_range(0..span);
        let direction = if self.rng.random_bool(write_probability(self.config.write_ratio)) {
            Direction::Write
        } else {
            Direction::Read
        };

        let request = Request::new(self.next_id, sector, direction);
        self.next_id += 1;
        request
    }

    /// Draws `config.requests` requests.
    pub fn generate(&mut self) -> Vec<Request> {
        (0..self.config.requests).map(|_| self.next_request()).collect()
    }
}

/// NaN counts as "never write"; everything else is clamped to `0.0..=1.0`.
fn write_probability(ratio: f64) -> f64 {
    if ratio.is_nan() {
        0.0
    } else {
        ratio.clamp(0.0, 1.0)
    }
}

/// Block-by-block copy: read block `i` of the source, then write it to the
/// destination.
///
/// Produces `2 * blocks` requests with ids `0..2 * blocks`. Returns `None`
/// if the last block's sector address or request id does not fit in `u64`.
pub fn sequential_copy(
    blocks: u64,
    source_base: Sector,
    dest_base: Sector,
    sectors_per_block: Sector,
) -> Option<Vec<Request>> {
    if let Some(last) = blocks.checked_sub(1) {
        let offset = last.checked_mul(sectors_per_block)?;
        source_base.checked_add(offset)?;
        dest_base.checked_add(offset)?;
        last.checked_mul(2)?.checked_add(1)?;
    }

    // Addresses and ids grow with `i`, so the last block bounds them all.
    Some(
        (0..blocks)
            .flat_map(|i| {
                let offset = i * sectors_per_block;
                [
                    Request::read(2 * i, source_base + offset),
                    Request::write(2 * i + 1, dest_base + offset),
                ]
            })
            .collect(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seed_reproducible() {
        let config = WorkloadConfig::default().with_requests(50).with_seed(7);
        let a = WorkloadGenerator::new(config.clone()).generate();
        let b = WorkloadGenerator::new(config).generate();
        assert_eq!(a, b);
    }

    #[test]
    fn test_ids_unique_and_in_span() {
        let config = WorkloadConfig::default()
            .with_requests(200)
            .with_sector_span(64);
        let requests = WorkloadGenerator::new(config).generate();
        for (i, r) in requests.iter().enumerate() {
            assert_eq!(r.id.0, i as u64);
            assert!(r.sector < 64);
        }
    }

    #[test]
    fn test_write_ratio_extremes() {
        let reads = WorkloadGenerator::new(WorkloadConfig::default().with_write_ratio(0.0)).generate();
        assert!(reads.iter().all(|r| r.direction == Direction::Read));

        let writes = WorkloadGenerator::new(WorkloadConfig::default().with_write_ratio(1.0)).generate();
        assert!(writes.iter().all(|r| r.direction == Direction::Write));
    }

    #[test]
    fn test_sequential_copy_interleaves() {
        let requests = sequential_copy(3, 1000, 5000, 8).unwrap();
        let pairs: Vec<(Direction, Sector)> =
            requests.iter().map(|r| r.direction_and_sector()).collect();
        assert_eq!(
            pairs,
            vec![
                (Direction::Read, 1000),
                (Direction::Write, 5000),
                (Direction::Read, 1008),
                (Direction::Write, 5008),
                (Direction::Read, 1016),
                (Direction::Write, 5016),
            ]
        );
    }

    #[test]
    fn test_nan_write_ratio_reads_only() {
        let config = WorkloadConfig::default()
            .with_requests(20)
            .with_write_ratio(f64::NAN);
        let requests = WorkloadGenerator::new(config).generate();
        assert_eq!(requests.len(), 20);
        assert!(requests.iter().all(|r| r.direction == Direction::Read));
    }

    #[test]
    fn test_sequential_copy_bounds() {
        assert_eq!(sequential_copy(0, u64::MAX, u64::MAX, u64::MAX), Some(Vec::new()));

        // Last block ends exactly at the top of the address space.
        let requests = sequential_copy(2, u64::MAX - 8, 0, 8).unwrap();
        assert_eq!(requests[2].sector, u64::MAX);

        assert_eq!(sequential_copy(2, u64::MAX - 7, 0, 8), None);
        assert_eq!(sequential_copy(2, 0, u64::MAX, 1), None);
        assert_eq!(sequential_copy(u64::MAX, 0, 0, 2), None);
        assert_eq!(sequential_copy(u64::MAX / 2 + 2, 0, 0, 0), None);
    }

    #[test]
    fn test_config_json() {
        let config: WorkloadConfig = serde_json::from_str(r#"{"requests": 5, "seed": 1}"#).unwrap();
        assert_eq!(config.requests, 5);
        assert_eq!(config.seed, 1);
        assert_eq!(config.sector_span, WorkloadConfig::default().sector_span);
    }
}
