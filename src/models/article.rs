//! Articles and their comments.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::ARTICLE_BASE;
use super::de;
use super::user::User;

#[derive(Deserialize)]
struct RawComment {
    #[serde(deserialize_with = "de::int")]
    id: i64,
    text: String,
    #[serde(deserialize_with = "de::timestamp")]
    date: NaiveDateTime,
    edited: bool,
    author: User,
}

#[derive(Deserialize)]
struct RawArticle {
    #[serde(deserialize_with = "de::int")]
    id: i64,
    title: String,
    preface: String,
    content: String,
    pinned: bool,
    #[serde(deserialize_with = "de::timestamp")]
    date: NaiveDateTime,
    author: User,
    #[serde(default)]
    comments: Vec<Option<RawComment>>,
    link: String,
}

/// An article comment written by any user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Comment {
    pub id: i64,
    pub text: String,
    pub date: NaiveDateTime,
    pub edited: bool,
    pub author: User,

    /// Id of the article the comment belongs to
    pub article_id: i64,

    #[serde(skip)]
    article_link: String,
}

impl Comment {
    /// Link to the comment on the website.
    pub fn link(&self) -> String {
        format!("{}#{}", self.article_link, self.id)
    }
}

/// An article written by any website user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RawArticle")]
pub struct Article {
    pub id: i64,
    pub title: String,
    pub preface: String,
    pub content: String,
    pub pinned: bool,
    pub date: NaiveDateTime,
    pub author: User,
    pub comments: Vec<Comment>,

    /// Trailing path segment of the article page
    #[serde(rename = "link")]
    pub slug: String,
}

impl From<RawArticle> for Article {
    fn from(raw: RawArticle) -> Self {
        let link = format!("{ARTICLE_BASE}{}", raw.link);
        let comments = raw
            .comments
            .into_iter()
            .flatten()
            .map(|c| Comment {
                id: c.id,
                text: c.text,
                date: c.date,
                edited: c.edited,
                author: c.author,
                article_id: raw.id,
                article_link: link.clone(),
            })
            .collect();

        Self {
            id: raw.id,
            title: raw.title,
            preface: raw.preface,
            content: raw.content,
            pinned: raw.pinned,
            date: raw.date,
            author: raw.author,
            comments,
            slug: raw.link,
        }
    }
}

impl Article {
    /// Link to the article on the website.
    pub fn link(&self) -> String {
        format!("{ARTICLE_BASE}{}", self.slug)
    }

    /// Find a comment by id.
    pub fn get_comment(&self, id: i64) -> Option<&Comment> {
        self.comments.iter().find(|c| c.id == id)
    }
}
