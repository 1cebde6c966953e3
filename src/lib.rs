// Allow common clippy pedantic lints that aren't critical for this codebase
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_lossless)]
#![allow(clippy::too_many_lines)]
#![allow(clippy::ref_option)]
#![allow(clippy::unused_self)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::items_after_statements)]
#![allow(clippy::unnecessary_wraps)]
#![allow(clippy::match_same_arms)]
#![allow(clippy::match_wildcard_for_single_variants)]
#![allow(clippy::needless_pass_by_value)]
#![allow(clippy::unused_async)]

//! # Mollie API client
//!
//! An async client for the Mollie payments API (v2), built around lazy
//! pagination and safe retries.
//!
//! ## Features
//!
//! - **Demand-Driven Iteration**: pages are fetched only when consumed and
//!   sized from how the iterator is composed (`take`, `skip`, `filter`, ...)
//! - **Throttling**: optional values-per-minute budget per iterator
//! - **Retries**: server faults and transport failures are retried; writes keep
//!   one `Idempotency-Key` across attempts; `Retry-After` is honoured
//! - **Typed Resources**: payments, customers, refunds
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use mollie_client::{ClientConfig, DemandIteratorExt, IterateParams, MollieClient};
//!
//! #[tokio::main]
//! async fn main() -> mollie_client::Result<()> {
//!     let client = MollieClient::from_config(&ClientConfig::from_env()?)?;
//!
//!     // One request with limit=10
//!     let open = client
//!         .payments()
//!         .iterate(IterateParams::new())
//!         .take(10)
//!         .filter(|p| p.is_open())
//!         .collect()
//!         .await?;
//!
//!     println!("{} open payments among the last 10", open.len());
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                         MollieClient                            │
//! │   payments()   customers()   payment_refunds()   customer_...() │
//! └─────────────────────────────────────────────────────────────────┘
//!                                │
//! ┌──────────────┬───────────────┴──────────────┬───────────────────┐
//! │  Resources   │          Iterator            │    Pagination     │
//! ├──────────────┼──────────────────────────────┼───────────────────┤
//! │ Binder<T>    │ PagedIterator (source)       │ ListEndpoint<T>   │
//! │ create/get   │ take/skip/filter/map/then    │ Page<T>           │
//! │ page/iterate │ Demand → page size           │ next/previous     │
//! │ update/delete│ Throttle                     │ cursor links      │
//! └──────────────┴──────────────────────────────┴───────────────────┘
//!                                │
//! ┌─────────────────────────────────────────────────────────────────┐
//! │   HttpClient: retry, Retry-After, Idempotency-Key, rate limit   │
//! └─────────────────────────────────────────────────────────────────┘
//! ```

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types for the client
pub mod error;

/// Common types and type aliases
pub mod types;

/// Credentials and request authentication
pub mod auth;

/// HTTP client with retry and rate limiting
pub mod http;

/// Cursor pagination over list endpoints
pub mod pagination;

/// Demand-driven iterators over paginated collections
pub mod iterator;

/// Resource models
pub mod models;

/// Resource binders
pub mod resources;

/// Client configuration
pub mod config;

mod client;

// ============================================================================
// Re-exports
// ============================================================================

pub use client::MollieClient;
pub use config::ClientConfig;
pub use error::{Error, Result};
pub use iterator::{Demand, DemandIterator, DemandIteratorExt, PagedIterator};
pub use pagination::Page;
pub use resources::{IterateParams, ListParams, WriteOptions};
pub use types::*;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
