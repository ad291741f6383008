//! Disk request scheduling for the U-Engine ecosystem.
//!
//! Orders pending block I/O requests by sector so the disk head services
//! them in one upward sweep before wrapping to the lowest pending sector
//! (C-LOOK). Requests stay owned by the host block layer; the scheduler
//! only decides their order.
//!
//! # Modules
//!
//! - **`models`**: Domain types: `Request`, `RequestId`, `Direction`, `Sector`
//! - **`queue`**: `SweepQueue` (C-LOOK), `FifoQueue` (arrival order), the
//!   `RequestQueue` trait and `QueueError`
//! - **`elevator`**: Host hooks (`ElevatorOps`), `ElevatorConfig`, and the
//!   named `ElevatorRegistry`
//! - **`report`**: Add/dispatch events and pluggable sinks
//! - **`validation`**: Sweep-order integrity checks
//! - **`simulation`**: Workload generation, batch replay and seek KPIs
//!
//! # Concurrency
//!
//! Queues are single-owner: mutation takes `&mut self`. Hosts that share a
//! scheduler across threads wrap the whole elevator in a lock.
//!
//! # References
//!
//! - Silberschatz et al. (2018), "Operating System Concepts", Ch. 11
//! - Bovet & Cesati (2005), "Understanding the Linux Kernel", Ch. 14: I/O Schedulers

pub mod elevator;
pub mod models;
pub mod queue;
pub mod report;
pub mod simulation;
pub mod validation;
