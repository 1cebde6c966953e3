//! Authenticator implementation
//!
//! Applies credentials to outgoing requests.

use super::types::Credentials;
use crate::error::Result;
use reqwest::RequestBuilder;

/// Authenticator handles applying authentication to HTTP requests
#[derive(Debug, Clone)]
pub struct Authenticator {
    credentials: Credentials,
}

impl Authenticator {
    /// Create a new authenticator, rejecting malformed credentials
    pub fn new(credentials: Credentials) -> Result<Self> {
        credentials.validate()?;
        Ok(Self { credentials })
    }

    /// The credentials this authenticator applies
    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    /// Apply authentication to a request builder
    pub fn apply(&self, req: RequestBuilder) -> RequestBuilder {
        req.bearer_auth(self.credentials.secret())
    }
}
