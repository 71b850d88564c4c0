//! Credential resolution
//!
//! The record model, the shared line codec, and the three interchangeable
//! sources that resolve records into immutable bundles.

pub mod codec;
pub mod records;
pub mod sources;

pub use records::{CredentialBundle, Principal, TokenRecord, UserRecord};
pub use sources::{CredentialSource, EnvironmentSource, FileSource, HardcodedSource};
