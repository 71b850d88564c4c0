//! Environment variable access
//!
//! Single indirection point between the process's real environment variables
//! and anything that reads them. The environment-backed credential source
//! takes an [`EnvironmentSupplier`] at construction, so tests can substitute
//! a deterministic map without mutating real process state.
//!
//! For test wiring convenience a process-wide switch can additionally "steer"
//! the default supplier to a registered factory by name; see
//! [`SteeredEnvironment`]. The switch is written only during test
//! setup/teardown (or once at process start) and must not be mutated
//! concurrently with snapshot reads.

use crate::utils::error::{GateError, Result};
use once_cell::sync::Lazy;
use parking_lot::RwLock;
use std::collections::HashMap;

/// Capability to produce a fresh snapshot of the environment
pub trait EnvironmentSupplier: Send + Sync {
    /// Produce a fresh name → value mapping
    fn snapshot(&self) -> Result<HashMap<String, String>>;
}

/// Supplier backed by the real process environment
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnvironment;

impl EnvironmentSupplier for ProcessEnvironment {
    fn snapshot(&self) -> Result<HashMap<String, String>> {
        Ok(std::env::vars().collect())
    }
}

/// A zero-argument factory producing a substitute environment map
pub type SupplierFactory = fn() -> HashMap<String, String>;

static SUPPLIER_REGISTRY: Lazy<RwLock<HashMap<String, SupplierFactory>>> =
    Lazy::new(|| RwLock::new(HashMap::new()));

static ACTIVE_SUPPLIER: Lazy<RwLock<Option<String>>> = Lazy::new(|| RwLock::new(None));

/// Register a named supplier factory for later steering
pub fn register_supplier(name: &str, factory: SupplierFactory) {
    SUPPLIER_REGISTRY
        .write()
        .insert(name.to_string(), factory);
}

/// Point the steered environment at a registered supplier
///
/// Set before the environment source is first consulted; cleared with
/// [`clear_steering`] afterwards.
pub fn steer(name: &str) {
    *ACTIVE_SUPPLIER.write() = Some(name.to_string());
}

/// Reset the steered environment back to the real process environment
pub fn clear_steering() {
    *ACTIVE_SUPPLIER.write() = None;
}

/// Name of the currently steered supplier, if any
pub fn steering() -> Option<String> {
    ACTIVE_SUPPLIER.read().clone()
}

/// Supplier that honors the process-wide steering switch
///
/// When the switch holds the name of a registered factory, snapshots return
/// that factory's output; otherwise they return the real process environment
/// verbatim. A switch naming an unregistered supplier is a
/// [`GateError::SourceLoad`] rather than a silent fallback.
#[derive(Debug, Clone, Copy, Default)]
pub struct SteeredEnvironment;

impl EnvironmentSupplier for SteeredEnvironment {
    fn snapshot(&self) -> Result<HashMap<String, String>> {
        let active = ACTIVE_SUPPLIER.read().clone();
        match active {
            Some(name) => {
                let registry = SUPPLIER_REGISTRY.read();
                let factory = registry.get(&name).ok_or_else(|| {
                    GateError::SourceLoad(format!(
                        "environment supplier '{}' is not registered",
                        name
                    ))
                })?;
                Ok(factory())
            }
            None => ProcessEnvironment.snapshot(),
        }
    }
}
