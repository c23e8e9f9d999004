//! Document fetching and transitive corpus discovery.
//!
//! This crate provides:
//! - [`DocumentFetcher`] — the fetch seam, with the reqwest-backed [`HttpFetcher`]
//! - [`extract_links`] — markdown link-target scanning with locale suppression
//! - [`Crawler`] — depth-first discovery of every document reachable from a root

pub mod crawl;
pub mod fetcher;
pub mod links;

pub use crawl::Crawler;
pub use fetcher::{CORPUS_BASE_URL, DocumentFetcher, HttpFetcher};
pub use links::extract_links;
