//! Block I/O domain models.
//!
//! Provides the request types the scheduler orders. Requests belong to the
//! host block layer; queues hold copies keyed by [`RequestId`].
//!
//! # Domain Mappings
//!
//! | u-iosched | Linux block layer | Simulator |
//! |-----------|-------------------|-----------|
//! | Request | `struct request` | Generated arrival |
//! | Sector | `blk_rq_pos()` | Uniform / sequential address |
//! | Direction | `rq_data_dir()` | Read / write mix |

mod request;

pub use request::{Direction, Request, RequestId, Sector};
