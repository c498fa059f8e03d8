//! Listing page scrapers.
//!
//! A run uses both halves in sequence:
//!
//! 1. **Pagination** ([`paginator`]): follow "next" links from the seed page
//!    until the last reachable listing page
//! 2. **Extraction** ([`extractor`]): pull article summaries out of that page
//!    and keep the oldest batch
//!
//! Neither half performs HTTP itself beyond what the supplied
//! [`crate::fetch::PageFetcher`] does, so both run against in-memory pages in
//! tests.

pub mod extractor;
pub mod paginator;
