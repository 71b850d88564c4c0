//! Path-scoped authentication policies
//!
//! Patterns, the scope registry binding patterns to schemes and bundles,
//! and the dispatcher that evaluates policies per request.

pub mod dispatcher;
pub mod pattern;
pub mod registry;

pub use dispatcher::Dispatcher;
pub use pattern::PathPattern;
pub use registry::{Scope, ScopeRegistry, ScopeRegistryBuilder};
