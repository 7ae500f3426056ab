//! Async HTTP access to the license catalogue.
//!
//! - [`http`] — the GET helper behind the [`http::HttpFetch`] trait.
//! - [`github`] — the list and detail accessors, with caching.

pub mod github;
pub mod http;
