//! Credential types

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Minimum length of an API key, prefix included
const MIN_API_KEY_LENGTH: usize = 30;

/// What kind of secret a [`Credentials`] value carries
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CredentialKind {
    /// Test-mode API key (`test_...`)
    TestApiKey,
    /// Live-mode API key (`live_...`)
    LiveApiKey,
    /// OAuth or organization access token (`access_...`)
    AccessToken,
}

/// Credentials used to authenticate every request
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum Credentials {
    /// Profile API key
    ApiKey(String),
    /// OAuth or organization access token
    AccessToken(String),
}

impl Credentials {
    /// Create API key credentials, validating the key format
    pub fn api_key(key: impl Into<String>) -> Result<Self> {
        let creds = Self::ApiKey(key.into());
        creds.validate()?;
        Ok(creds)
    }

    /// Create access token credentials, validating the token format
    pub fn access_token(token: impl Into<String>) -> Result<Self> {
        let creds = Self::AccessToken(token.into());
        creds.validate()?;
        Ok(creds)
    }

    /// The raw secret
    pub fn secret(&self) -> &str {
        match self {
            Self::ApiKey(s) | Self::AccessToken(s) => s,
        }
    }

    /// Classify the secret by its prefix
    pub fn kind(&self) -> Result<CredentialKind> {
        match self {
            Self::ApiKey(key) => {
                if key.starts_with("test_") {
                    Ok(CredentialKind::TestApiKey)
                } else if key.starts_with("live_") {
                    Ok(CredentialKind::LiveApiKey)
                } else {
                    Err(Error::credentials(
                        "API key should start with 'test_' or 'live_'",
                    ))
                }
            }
            Self::AccessToken(token) => {
                if token.starts_with("access_") {
                    Ok(CredentialKind::AccessToken)
                } else {
                    Err(Error::credentials("access token should start with 'access_'"))
                }
            }
        }
    }

    /// Check the secret is well-formed
    pub fn validate(&self) -> Result<()> {
        match self.kind()? {
            CredentialKind::TestApiKey | CredentialKind::LiveApiKey => {
                if self.secret().len() < MIN_API_KEY_LENGTH {
                    return Err(Error::credentials(format!(
                        "API key should be at least {MIN_API_KEY_LENGTH} characters long"
                    )));
                }
                Ok(())
            }
            CredentialKind::AccessToken => Ok(()),
        }
    }
}

// Secrets stay out of logs
impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (name, secret) = match self {
            Self::ApiKey(s) => ("ApiKey", s),
            Self::AccessToken(s) => ("AccessToken", s),
        };
        let prefix: String = secret.chars().take_while(|c| *c != '_').collect();
        write!(f, "{name}({prefix}_***)")
    }
}
