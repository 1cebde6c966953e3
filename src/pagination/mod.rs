//! Pagination module
//!
//! Cursor pagination over HAL list responses: every page carries
//! `_links.next` / `_links.previous` with a `from` cursor and a `limit`.
//!
//! # Overview
//!
//! - [`ListEndpoint`] performs one list request and decodes the envelope
//! - [`Page`] holds one decoded page and can fetch its neighbours
//! - [`PageFetcher`] is the seam between pages/iterators and the network

mod endpoint;
mod page;
mod types;

pub use endpoint::ListEndpoint;
pub use page::Page;
pub use types::{
    clamp_limit, cursor_from_href, limit_from_href, Link, PageFetcher, PageLinks, PageRequest,
    PaginationState, RawPage, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE,
};
