//! Types shared by all resources

use crate::pagination::Link;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// `_links` of a single resource, keyed by relation name
pub type LinkMap = BTreeMap<String, Link>;

/// A monetary amount.
///
/// The API sends the value as a string with the exact number of decimals
/// the currency requires, e.g. `"10.00"` for EUR or `"1000"` for JPY.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Amount {
    /// ISO 4217 currency code
    pub currency: String,
    /// Decimal value as a string
    pub value: String,
}

impl Amount {
    pub fn new(currency: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            currency: currency.into(),
            value: value.into(),
        }
    }

    /// Euro amount from a number of cents
    pub fn eur_cents(cents: i64) -> Self {
        let sign = if cents < 0 { "-" } else { "" };
        let cents = cents.unsigned_abs();
        Self::new("EUR", format!("{sign}{}.{:02}", cents / 100, cents % 100))
    }

    /// Whether the value is zero, regardless of formatting
    pub fn is_zero(&self) -> bool {
        self.value
            .chars()
            .filter(|c| *c != '.' && *c != '-')
            .all(|c| c == '0')
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.currency, self.value)
    }
}

/// Typed access to a resource's `_links`
pub trait ResourceLinks {
    /// All links of the resource
    fn links(&self) -> &LinkMap;

    /// Link with the given relation name
    fn link(&self, name: &str) -> Option<&Link> {
        self.links().get(name)
    }

    /// Target of the given relation
    fn link_href(&self, name: &str) -> Option<&str> {
        self.link(name).map(|link| link.href.as_str())
    }

    /// API URL of the resource itself
    fn self_url(&self) -> Option<&str> {
        self.link_href("self")
    }

    /// Dashboard page of the resource
    fn dashboard_url(&self) -> Option<&str> {
        self.link_href("dashboard")
    }

    /// Documentation page for the resource type
    fn documentation_url(&self) -> Option<&str> {
        self.link_href("documentation")
    }
}

/// Implement [`ResourceLinks`] for a struct with a `links: LinkMap` field
macro_rules! impl_resource_links {
    ($($ty:ty),* $(,)?) => {
        $(
            impl $crate::models::ResourceLinks for $ty {
                fn links(&self) -> &$crate::models::LinkMap {
                    &self.links
                }
            }
        )*
    };
}

pub(crate) use impl_resource_links;
