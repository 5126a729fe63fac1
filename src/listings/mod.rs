//! Listings API integration module.
//!
//! Provides the HTTP client and the listing records it returns.

pub mod client;
pub mod models;

pub use client::{ListingsClient, ListingsSource, PageQuery};
pub use models::{Listing, ListingDetails};
