//! Shared test infrastructure

use authgate::envvar::EnvironmentSupplier;
use authgate::Result;
use base64::{Engine, engine::general_purpose::STANDARD};
use std::collections::HashMap;
use std::io::Write;
use std::sync::Once;
use tempfile::NamedTempFile;

static INIT_LOGGING: Once = Once::new();

/// Initialize tracing output for tests, once per test binary
///
/// Honors `RUST_LOG`; output is captured per test.
pub fn init_test_logging() {
    INIT_LOGGING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}

/// Build an `Authorization: Basic` header value
pub fn basic_header(username: &str, password: &str) -> String {
    format!(
        "Basic {}",
        STANDARD.encode(format!("{}:{}", username, password))
    )
}

/// Build an `Authorization: Bearer` header value
pub fn bearer_header(token: &str) -> String {
    format!("Bearer {}", token)
}

/// Write a credential file fixture
pub fn credential_file(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file
}

/// Deterministic environment supplier for injection tests
pub struct FixedEnvironment(pub HashMap<String, String>);

impl FixedEnvironment {
    pub fn from_pairs(pairs: &[(&str, &str)]) -> Self {
        Self(
            pairs
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        )
    }
}

impl EnvironmentSupplier for FixedEnvironment {
    fn snapshot(&self) -> Result<HashMap<String, String>> {
        Ok(self.0.clone())
    }
}
