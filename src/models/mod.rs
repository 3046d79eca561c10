// src/models/mod.rs

//! Domain models for the gvp client.
//!
//! JSON models implement `serde::Deserialize` and are built with
//! [`decode`]; the event models are read from parsed HTML.

mod article;
mod config;
mod contact;
mod de;
mod event;
mod event_details;
mod news;
mod search;
mod source;
mod static_file;
mod user;

// Re-export all public types
pub use article::{Article, Comment};
pub use config::{Config, HttpConfig, SiteConfig};
pub use contact::{Contact, ContactCategory};
pub use de::decode;
pub use event::{APPROVED_CLASS, Event, PROPOSED_CLASS};
pub use event_details::{EventDetails, Schedule};
#[cfg(test)]
pub(crate) use event_details::fixture as event_page;
pub use news::News;
pub use search::{Completion, SearchCategory, SearchResult};
pub use source::{ArticleSource, EventSource};
pub use static_file::StaticFile;
pub use user::{Person, User};

/// Base of article links; the article slug is appended.
pub const ARTICLE_BASE: &str = "https://gvp.cz/new/zivot/clanek/";

/// Base of personal user websites; the username is appended.
pub const WEBSITE_BASE: &str = "https://gvp.cz/www/";

/// Domain of school mailboxes.
pub const MAIL_DOMAIN: &str = "@gvp.cz";
