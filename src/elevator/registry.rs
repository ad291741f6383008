//! Named elevator registry.
//!
//! Hosts select a scheduler by name at queue init time. The registry maps
//! names to factories and refuses duplicate or unknown names.

use std::collections::BTreeMap;
use std::fmt;

use tracing::info;

use super::{Elevator, ElevatorConfig, ElevatorOps};
use crate::queue::{FifoQueue, QueueError, SweepQueue};

/// Builds an elevator from a config.
pub type ElevatorFactory = fn(&ElevatorConfig) -> Box<dyn ElevatorOps>;

/// Registry and elevator lifecycle errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ElevatorError {
    /// A factory is already registered under this name.
    AlreadyRegistered(String),
    /// No factory is registered under this name.
    UnknownElevator(String),
    /// A queue operation was rejected.
    Queue(QueueError),
}

impl fmt::Display for ElevatorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ElevatorError::AlreadyRegistered(name) => {
                write!(f, "elevator '{name}' is already registered")
            }
            ElevatorError::UnknownElevator(name) => write!(f, "unknown elevator '{name}'"),
            ElevatorError::Queue(err) => write!(f, "queue error: {err}"),
        }
    }
}

impl std::error::Error for ElevatorError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ElevatorError::Queue(err) => Some(err),
            _ => None,
        }
    }
}

impl From<QueueError> for ElevatorError {
    fn from(err: QueueError) -> Self {
        ElevatorError::Queue(err)
    }
}

fn build_clook(config: &ElevatorConfig) -> Box<dyn ElevatorOps> {
    Box::new(Elevator::from_config(
        SweepQueue::with_head(config.initial_head),
        config,
    ))
}

fn build_noop(config: &ElevatorConfig) -> Box<dyn ElevatorOps> {
    Box::new(Elevator::from_config(
        FifoQueue::with_head(config.initial_head),
        config,
    ))
}

/// Name → factory table.
///
/// # Example
///
/// ```
/// use u_iosched::elevator::{ElevatorConfig, ElevatorOps, ElevatorRegistry};
///
/// let registry = ElevatorRegistry::with_builtins();
/// let elevator = registry.create(&ElevatorConfig::default()).unwrap();
/// assert_eq!(elevator.name(), "clook");
/// ```
#[derive(Clone, Default)]
pub struct ElevatorRegistry {
    factories: BTreeMap<String, ElevatorFactory>,
}

impl fmt::Debug for ElevatorRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ElevatorRegistry")
            .field("elevators", &self.names())
            .finish()
    }
}

impl ElevatorRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry holding the built-in `clook` and `noop` elevators.
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        registry.factories.insert("clook".to_string(), build_clook);
        registry.factories.insert("noop".to_string(), build_noop);
        registry
    }

    /// Registers `factory` under `name`.
    pub fn register(
        &mut self,
        name: impl Into<String>,
        factory: ElevatorFactory,
    ) -> Result<(), ElevatorError> {
        let name = name.into();
        if self.factories.contains_key(&name) {
            return Err(ElevatorError::AlreadyRegistered(name));
        }
        info!(elevator = %name, "elevator registered");
        self.factories.insert(name, factory);
        Ok(())
    }

    /// Removes the factory registered under `name`.
    pub fn unregister(&mut self, name: &str) -> Result<(), ElevatorError> {
        match self.factories.remove(name) {
            Some(_) => {
                info!(elevator = name, "elevator unregistered");
                Ok(())
            }
            None => Err(ElevatorError::UnknownElevator(name.to_string())),
        }
    }

    /// Whether `name` is registered.
    pub fn contains(&self, name: &str) -> bool {
        self.factories.contains_key(name)
    }

    /// Registered names, sorted.
    pub fn names(&self) -> Vec<&str> {
        self.factories.keys().map(String::as_str).collect()
    }

    /// Builds the elevator named by `config.name`.
    pub fn create(&self, config: &ElevatorConfig) -> Result<Box<dyn ElevatorOps>, ElevatorError> {
        let factory = self
            .factories
            .get(&config.name)
            .ok_or_else(|| ElevatorError::UnknownElevator(config.name.clone()))?;
        Ok(factory(config))
    }
}
