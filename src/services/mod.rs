//! Service layer for the gvp client.
//!
//! - JSON API endpoints (`GvpClient`)
//! - Event listing and details scraped from HTML (`parse_event_listing`)
//! - The network seam (`Transport`, `HttpTransport`)

mod client;
mod events;
mod transport;

pub use client::{GvpClient, SEARCH_ALL};
pub use events::parse_event_listing;
pub use transport::{HttpTransport, Request, Transport};
