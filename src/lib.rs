//! # authgate
//!
//! Scoped HTTP authentication for actix-web services. Credentials come from
//! interchangeable sources (inline configuration, files, environment
//! variables), requests are validated with HTTP Basic and Bearer token
//! schemes, and every configured combination is scoped to a URL path pattern
//! so multiple isolated authentication policies coexist in one process.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use authgate::{AuthGate, AuthGateMiddleware};
//! use actix_web::{web, App, HttpServer};
//! use std::sync::Arc;
//!
//! #[actix_web::main]
//! async fn main() -> std::io::Result<()> {
//!     let gate = Arc::new(AuthGate::from_file("config/authgate.yaml").expect("config"));
//!
//!     HttpServer::new(move || {
//!         App::new()
//!             .wrap(AuthGateMiddleware::new(gate.clone()))
//!             .route("/file-user-info", web::get().to(|| async { "hello" }))
//!     })
//!     .bind(("127.0.0.1", 8080))?
//!     .run()
//!     .await
//! }
//! ```
//!
//! ## Configuration
//!
//! ```yaml
//! scopes:
//!   - pattern: "/file-user-info/**"
//!     users: { source: file, path: "config/passwords.conf" }
//!     tokens: { source: file, path: "config/tokens.conf" }
//!   - pattern: "/environment-user-info/**"
//!     users: { source: environment, prefix: "SMS_ENV_USER" }
//! ```
//!
//! Scopes, bundles and the registry are assembled once at startup and are
//! immutable afterwards; request handling is lock-free.

#![warn(clippy::all)]

pub mod config;
pub mod credentials;
pub mod envvar;
pub mod methods;
pub mod scope;
pub mod server;
pub mod utils;

// Re-export main types
pub use config::{AuthGateConfig, ScopeConfig, SourceConfig};
pub use credentials::{CredentialBundle, CredentialSource, Principal, TokenRecord, UserRecord};
pub use methods::{AuthenticationOutcome, Credential, PasswordEncodings, SchemeKind};
pub use scope::{Dispatcher, PathPattern, ScopeRegistry};
pub use server::{principal, AuthGateMiddleware};
pub use utils::error::{GateError, Result};

use credentials::{EnvironmentSource, FileSource, HardcodedSource};
use envvar::{EnvironmentSupplier, SteeredEnvironment};
use std::path::Path;
use std::sync::Arc;
use tracing::info;

/// Assembled authentication policies for one process
///
/// Built once from configuration: each scope's sources are loaded into an
/// immutable credential bundle, bundles are bound to schemes and path
/// patterns, and the resulting dispatcher answers per-request authentication
/// queries from then on.
pub struct AuthGate {
    dispatcher: Dispatcher,
}

impl AuthGate {
    /// Assemble a gate from configuration
    ///
    /// Environment-backed sources read through the steerable default
    /// supplier; see [`envvar`] for the test seam.
    pub fn from_config(config: &AuthGateConfig) -> Result<Self> {
        Self::with_supplier(config, Arc::new(SteeredEnvironment))
    }

    /// Assemble a gate, reading environment sources through `supplier`
    pub fn with_supplier(
        config: &AuthGateConfig,
        supplier: Arc<dyn EnvironmentSupplier>,
    ) -> Result<Self> {
        config.validate()?;

        let mut builder = ScopeRegistry::builder();
        for scope in &config.scopes {
            let bundle = load_scope_bundle(scope, &supplier)?;
            builder = builder.register(
                &scope.pattern,
                scope.effective_schemes(),
                Arc::new(bundle),
            )?;
        }

        let registry = builder.build();
        info!(scopes = registry.len(), "authentication scopes assembled");

        Ok(Self {
            dispatcher: Dispatcher::new(registry),
        })
    }

    /// Assemble a gate from a YAML configuration file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let config = AuthGateConfig::from_file(path)?;
        Self::from_config(&config)
    }

    /// Whether any scope protects the given path
    pub fn protects(&self, path: &str) -> bool {
        self.dispatcher.protects(path)
    }

    /// Authenticate one request
    ///
    /// `authorization` is the raw `Authorization` header value, if any.
    pub fn handle(&self, path: &str, authorization: Option<&str>) -> AuthenticationOutcome {
        self.dispatcher.handle(path, authorization)
    }

    /// The underlying dispatcher
    pub fn dispatcher(&self) -> &Dispatcher {
        &self.dispatcher
    }
}

/// Load one scope's bundle from its configured sources
///
/// User records and token records may come from differently configured
/// sources; each part is loaded by exactly one source and the parts are
/// combined into the scope's bundle.
fn load_scope_bundle(
    scope: &ScopeConfig,
    supplier: &Arc<dyn EnvironmentSupplier>,
) -> Result<CredentialBundle> {
    let users_part = match &scope.users {
        Some(source) => user_source(source, supplier).load()?,
        None => CredentialBundle::default(),
    };

    let tokens_part = match &scope.tokens {
        Some(source) => token_source(source, supplier).load()?,
        None => CredentialBundle::default(),
    };

    Ok(CredentialBundle::combine(users_part, tokens_part))
}

fn user_source(
    config: &SourceConfig,
    supplier: &Arc<dyn EnvironmentSupplier>,
) -> Box<dyn CredentialSource> {
    match config {
        SourceConfig::Inline { lines } => Box::new(HardcodedSource::new(lines.clone(), vec![])),
        SourceConfig::File { path } => Box::new(FileSource::passwords(path.clone())),
        SourceConfig::Environment { prefix } => Box::new(EnvironmentSource::with_supplier(
            Some(prefix.clone()),
            None,
            supplier.clone(),
        )),
    }
}

fn token_source(
    config: &SourceConfig,
    supplier: &Arc<dyn EnvironmentSupplier>,
) -> Box<dyn CredentialSource> {
    match config {
        SourceConfig::Inline { lines } => Box::new(HardcodedSource::new(vec![], lines.clone())),
        SourceConfig::File { path } => Box::new(FileSource::tokens(path.clone())),
        SourceConfig::Environment { prefix } => Box::new(EnvironmentSource::with_supplier(
            None,
            Some(prefix.clone()),
            supplier.clone(),
        )),
    }
}

// Version information
/// Current version of the crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
/// Name of the crate
pub const NAME: &str = env!("CARGO_PKG_NAME");
