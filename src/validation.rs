//! Sweep-order validation.
//!
//! Checks that a request sequence is a valid C-LOOK service order for a
//! given head position. Detects:
//! - Duplicate request IDs
//! - A request at or ahead of the head queued after one behind it
//! - Descending sectors within either run
//!
//! Every violation is reported, not just the first.

use crate::models::{Request, Sector};
use crate::queue::{Run, SweepQueue};
use std::collections::HashSet;

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Position in the sequence where the problem was found.
    pub position: usize,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// The same request appears twice.
    DuplicateId,
    /// A high-priority request follows a low-priority one.
    RunOrder,
    /// Sectors decrease inside a run.
    UnsortedRun,
}

impl ValidationError {
    fn new(kind: ValidationErrorKind, position: usize, message: impl Into<String>) -> Self {
        Self {
            kind,
            position,
            message: message.into(),
        }
    }
}

/// Validates `requests` as a service order for a head at `head`.
///
/// Checks:
/// 1. No duplicate request IDs
/// 2. All requests with `sector >= head` precede all with `sector < head`
/// 3. Sectors are non-decreasing within each run
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_order(head: Sector, requests: &[Request]) -> ValidationResult {
    let mut errors = Vec::new();
    let mut seen = HashSet::new();
    let mut previous: Option<(Run, Sector)> = None;

    for (position, request) in requests.iter().enumerate() {
        if !seen.insert(request.id) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                position,
                format!("Duplicate request ID: {}", request.id),
            ));
        }

        let run = Run::of(request.sector, head);
        if let Some((prev_run, prev_sector)) = previous {
            if prev_run == Run::Low && run == Run::High {
                errors.push(ValidationError::new(
                    ValidationErrorKind::RunOrder,
                    position,
                    format!(
                        "Request {} at sector {} (ahead of head {}) follows a request behind the head",
                        request.id, request.sector, head
                    ),
                ));
            } else if prev_run == run && request.sector < prev_sector {
                errors.push(ValidationError::new(
                    ValidationErrorKind::UnsortedRun,
                    position,
                    format!(
                        "Request {} at sector {} follows sector {} in the same run",
                        request.id, request.sector, prev_sector
                    ),
                ));
            }
        }
        previous = Some((run, request.sector));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Validates the current contents of a sweep queue against its head.
pub fn validate_queue(queue: &SweepQueue) -> ValidationResult {
    let requests: Vec<Request> = queue.iter().copied().collect();
    validate_order(queue.head(), &requests)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reads(sectors: &[Sector]) -> Vec<Request> {
        sectors
            .iter()
            .enumerate()
            .map(|(i, &s)| Request::read(i as u64, s))
            .collect()
    }

    #[test]
    fn test_valid_orders() {
        assert!(validate_order(0, &[]).is_ok());
        assert!(validate_order(50, &reads(&[50, 80, 10, 30])).is_ok());
        assert!(validate_order(50, &reads(&[10, 30])).is_ok());
        assert!(validate_order(0, &reads(&[5, 5, 9])).is_ok());
    }

    #[test]
    fn test_run_order_violation() {
        let errors = validate_order(50, &reads(&[80, 10, 60])).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].kind, ValidationErrorKind::RunOrder);
        assert_eq!(errors[0].position, 2);
    }

    #[test]
    fn test_unsorted_runs() {
        let errors = validate_order(50, &reads(&[90, 60, 30, 20])).unwrap_err();
        let kinds: Vec<_> = errors.iter().map(|e| e.kind.clone()).collect();
        assert_eq!(
            kinds,
            vec![ValidationErrorKind::UnsortedRun, ValidationErrorKind::UnsortedRun]
        );
        assert_eq!(errors[0].position, 1);
        assert_eq!(errors[1].position, 3);
    }

    #[test]
    fn test_duplicate_ids() {
        let requests = vec![Request::read(1, 10), Request::read(1, 20)];
        let errors = validate_order(0, &requests).unwrap_err();
        assert_eq!(errors[0].kind, ValidationErrorKind::DuplicateId);
        assert!(errors[0].message.contains("rq#1"));
    }

    #[test]
    fn test_validate_live_queue() {
        let mut queue = SweepQueue::with_head(40);
        for (i, s) in [70, 10, 45, 20, 99].into_iter().enumerate() {
            queue.insert(Request::read(i as u64, s)).unwrap();
        }
        assert!(validate_queue(&queue).is_ok());
        queue.take_next();
        assert!(validate_queue(&queue).is_ok());
    }
}
