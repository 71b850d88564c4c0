//! Authentication methods
//!
//! The two HTTP authentication schemes (Basic and Bearer), the credential
//! extraction model for the `Authorization` header, and the password
//! encoding registry consulted by Basic authentication.

pub mod basic;
pub mod bearer;
pub mod password;
pub mod types;

pub use basic::BasicAuthenticator;
pub use bearer::BearerAuthenticator;
pub use password::{PasswordEncodings, PasswordVerifier};
pub use types::{AuthenticationOutcome, Credential, SchemeKind};
