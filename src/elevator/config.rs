//! Elevator configuration.

use serde::{Deserialize, Serialize};

use crate::models::Sector;

/// Settings used when a registry builds an elevator.
///
/// # Example
///
/// ```
/// use u_iosched::elevator::ElevatorConfig;
///
/// let config = ElevatorConfig::default().with_initial_head(4096);
/// assert_eq!(config.name, "clook");
/// assert!(config.report_events);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ElevatorConfig {
    /// Registered elevator name to instantiate.
    pub name: String,
    /// Head position before the first dispatch.
    pub initial_head: Sector,
    /// Emit add/dispatch events through `tracing`.
    pub report_events: bool,
}

impl Default for ElevatorConfig {
    fn default() -> Self {
        Self {
            name: "clook".to_string(),
            initial_head: 0,
            report_events: true,
        }
    }
}

impl ElevatorConfig {
    /// Config selecting the elevator registered as `name`.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Sets the initial head position.
    pub fn with_initial_head(mut self, head: Sector) -> Self {
        self.initial_head = head;
        self
    }

    /// Enables or disables event reporting.
    pub fn with_report_events(mut self, enabled: bool) -> Self {
        self.report_events = enabled;
        self
    }
}
