//! Authentication module
//!
//! Supports: organization API keys (`test_`/`live_`) and OAuth access tokens
//! (`access_`). Both travel as a bearer token.

mod authenticator;
mod types;

pub use authenticator::Authenticator;
pub use types::{CredentialKind, Credentials};
