//! Static pages.

use serde::{Deserialize, Serialize};

use super::de;

/// A static page of the website.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StaticFile {
    #[serde(deserialize_with = "de::int")]
    pub id: i64,
    pub title: String,
    pub content: String,
}
