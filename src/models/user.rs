//! Website users and the capability they share with contacts.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::de;
use super::source::ArticleSource;
use super::Article;
use super::{MAIL_DOMAIN, WEBSITE_BASE};
use crate::error::Result;

/// Something with a name and a school mailbox.
pub trait Person {
    /// Plain name.
    fn name(&self) -> &str;

    /// Full mail address, empty when there is none.
    fn mail(&self) -> String;

    /// Name as it should be shown to people.
    fn display_name(&self) -> String {
        self.name().to_string()
    }
}

/// A possibly anonymous website user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Login name, empty for anonymous users
    #[serde(default, deserialize_with = "de::string_or_empty")]
    pub username: String,

    /// Display name
    pub name: String,
}

impl User {
    /// Check if the user is anonymous.
    pub fn anonymous(&self) -> bool {
        self.username.is_empty()
    }

    /// Personal website, empty for anonymous users.
    pub fn www(&self) -> String {
        if self.anonymous() {
            return String::new();
        }
        format!("{WEBSITE_BASE}{}/", self.username)
    }

    /// Articles written by this user.
    ///
    /// Anonymous users have no articles and no request is made.
    pub fn articles(&self, source: &impl ArticleSource, page: u32) -> Result<Vec<Article>> {
        if self.anonymous() {
            return Ok(Vec::new());
        }
        source.list_articles(page, Some(&self.username))
    }
}

impl Person for User {
    fn name(&self) -> &str {
        &self.name
    }

    fn mail(&self) -> String {
        if self.anonymous() {
            return String::new();
        }
        format!("{}{MAIL_DOMAIN}", self.username)
    }
}

impl fmt::Display for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::decode;
    use serde_json::json;
    use std::cell::RefCell;

    #[derive(Default)]
    struct Recorder {
        calls: RefCell<Vec<(u32, Option<String>)>>,
    }

    impl ArticleSource for Recorder {
        fn get_article(&self, _id: i64) -> Result<Article> {
            unreachable!()
        }

        fn list_articles(&self, page: u32, author: Option<&str>) -> Result<Vec<Article>> {
            self.calls.borrow_mut().push((page, author.map(str::to_string)));
            Ok(Vec::new())
        }
    }

    #[test]
    fn test_named_user() {
        let raw = json!({"username": "novakj", "name": "Jan Novák"});
        let user: User = decode(raw, "user").unwrap();
        assert!(!user.anonymous());
        assert_eq!(user.mail(), "novakj@gvp.cz");
        assert_eq!(user.www(), "https://gvp.cz/www/novakj/");
        assert_eq!(user.to_string(), "Jan Novák");
        assert_eq!(user.display_name(), "Jan Novák");
    }

    #[test]
    fn test_anonymous_user() {
        for username in [json!(null), json!("")] {
            let user: User = decode(json!({"username": username, "name": "Host"}), "user").unwrap();
            assert!(user.anonymous());
            assert_eq!(user.mail(), "");
            assert_eq!(user.www(), "");
        }
    }

    #[test]
    fn test_articles_by_user() {
        let source = Recorder::default();
        let user = User {
            username: "novakj".into(),
            name: "Jan Novák".into(),
        };
        user.articles(&source, 2).unwrap();

        let anonymous = User {
            username: String::new(),
            name: "Host".into(),
        };
        assert!(anonymous.articles(&source, 1).unwrap().is_empty());

        assert_eq!(*source.calls.borrow(), vec![(2, Some("novakj".to_string()))]);
    }
}
