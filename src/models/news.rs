//! Legacy news, replaced by articles on the current website.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::de;
use super::user::User;

/// A legacy news item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct News {
    #[serde(deserialize_with = "de::int")]
    pub id: i64,
    pub title: String,
    pub content: String,
    #[serde(deserialize_with = "de::timestamp")]
    pub date: NaiveDateTime,
    pub author: User,
}
