//! Capabilities the models call back into.
//!
//! A few convenience accessors (a user's articles, completing a search
//! result, an event's details) need another request. They take one of
//! these traits instead of a concrete client; `GvpClient` implements both.

use crate::error::Result;
use crate::models::{Article, EventDetails};

/// Anything that can fetch articles.
pub trait ArticleSource {
    /// The article with the given id.
    fn get_article(&self, id: i64) -> Result<Article>;

    /// A page of articles, optionally only those by `author`.
    fn list_articles(&self, page: u32, author: Option<&str>) -> Result<Vec<Article>>;
}

/// Anything that can fetch event details.
pub trait EventSource {
    fn get_event(&self, id: i64) -> Result<EventDetails>;
}
