//! Search results and their completion into full models.

use std::fmt;

use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::source::ArticleSource;
use super::{Article, Comment, StaticFile, decode};
use crate::error::{GvpError, Result};

/// Trailing article id of an article link, e.g. `lyzarsky-kurz-77`.
const ARTICLE_ID_PATTERN: &str = r"(\d+)$";

/// Trailing `article#comment` ids of a comment link, e.g. `kurz-77#3`.
const COMMENT_ID_PATTERN: &str = r"(\d+)#(\d+)$";

/// Category a search result belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum SearchCategory {
    Static,
    Articles,
    Comments,
    /// Any other category the site reports, e.g. `all` or `contacts`
    Other(String),
}

impl SearchCategory {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Static => "static",
            Self::Articles => "articles",
            Self::Comments => "comments",
            Self::Other(other) => other,
        }
    }
}

impl From<&str> for SearchCategory {
    fn from(s: &str) -> Self {
        match s {
            "static" => Self::Static,
            "articles" => Self::Articles,
            "comments" => Self::Comments,
            other => Self::Other(other.to_string()),
        }
    }
}

impl From<String> for SearchCategory {
    fn from(s: String) -> Self {
        Self::from(s.as_str())
    }
}

impl From<SearchCategory> for String {
    fn from(category: SearchCategory) -> Self {
        category.as_str().to_string()
    }
}

impl fmt::Display for SearchCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A full model a search result resolves to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Completion {
    Static(StaticFile),
    Article(Article),
    /// The comment, or `None` when the article no longer has it
    Comment(Option<Comment>),
}

#[derive(Deserialize)]
struct RawSearchResult {
    title: String,
    content: String,
    link: String,
    #[serde(default)]
    category: Option<String>,
}

/// A search hit carrying only title and content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchResult {
    pub title: String,
    pub content: String,

    /// Opaque link slug the ids are read from
    pub link: String,

    pub category: SearchCategory,
}

impl SearchResult {
    /// Decode a search hit. Hits without their own `category` take the
    /// category the search was issued with.
    pub fn from_json(value: Value, default_category: &str) -> Result<Self> {
        let raw: RawSearchResult = decode(value, "search result")?;
        let category = raw.category.as_deref().unwrap_or(default_category);

        Ok(Self {
            title: raw.title,
            content: raw.content,
            link: raw.link,
            category: SearchCategory::from(category),
        })
    }

    /// Resolve the result into the model it points to.
    ///
    /// Static pages are built from the result itself; articles and
    /// comments are fetched through `source`.
    pub fn complete(&self, source: &impl ArticleSource) -> Result<Completion> {
        match &self.category {
            SearchCategory::Static => {
                let id = self.link.trim().parse().map_err(|_| {
                    let message = format!("static link '{}' is not an id", self.link);
                    GvpError::decoding("search result", message)
                })?;
                Ok(Completion::Static(StaticFile {
                    id,
                    title: self.title.clone(),
                    content: self.content.clone(),
                }))
            }
            SearchCategory::Articles => {
                let ids = link_ids(&self.link, ARTICLE_ID_PATTERN)?;
                Ok(Completion::Article(source.get_article(ids[0])?))
            }
            SearchCategory::Comments => {
                let ids = link_ids(&self.link, COMMENT_ID_PATTERN)?;
                let article = source.get_article(ids[0])?;
                Ok(Completion::Comment(article.get_comment(ids[1]).cloned()))
            }
            SearchCategory::Other(other) => Err(GvpError::unsupported(format!(
                "category {other} cannot be completed"
            ))),
        }
    }

    /// Guess the category from the shape of the link.
    ///
    /// Older site versions did not report categories and clients split the
    /// link on `-` instead. This guess is unverified against the current
    /// site and [`complete`](Self::complete) never relies on it.
    pub fn inferred_category(&self) -> SearchCategory {
        let link = self.link.trim();
        let is_id = |s: &str| !s.is_empty() && s.chars().all(|c| c.is_ascii_digit());

        if is_id(link) {
            return SearchCategory::Static;
        }

        let Some((_, tail)) = link.rsplit_once('-') else {
            return self.category.clone();
        };

        match tail.split_once('#') {
            Some((article, comment)) if is_id(article) && is_id(comment) => {
                SearchCategory::Comments
            }
            None if is_id(tail) => SearchCategory::Articles,
            _ => self.category.clone(),
        }
    }
}

/// All capture groups of `pattern` in `link`, parsed as ids.
fn link_ids(link: &str, pattern: &str) -> Result<Vec<i64>> {
    let re = Regex::new(pattern).map_err(|e| GvpError::decoding("search link", e))?;
    let caps = re
        .captures(link)
        .ok_or_else(|| GvpError::decoding("search link", format!("no id in '{link}'")))?;

    caps.iter()
        .skip(1)
        .flatten()
        .map(|m| {
            m.as_str()
                .parse()
                .map_err(|e| GvpError::decoding("search link", e))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::cell::RefCell;

    /// Serves one fixed article and records which ids were requested.
    struct FixedArticle {
        article: Article,
        requested: RefCell<Vec<i64>>,
    }

    impl FixedArticle {
        fn new(id: i64) -> Self {
            let article = decode(
                json!({
                    "id": id,
                    "title": "Kurz",
                    "preface": "",
                    "content": "",
                    "pinned": true,
                    "date": "2020-02-02 10:00:00",
                    "author": {"username": "novakj", "name": "Jan Novák"},
                    "comments": [{
                        "id": 3,
                        "text": "Díky",
                        "date": "2020-02-03 10:00:00",
                        "edited": false,
                        "author": {"username": "", "name": "Host"}
                    }],
                    "link": format!("kurz-{id}")
                }),
                "article",
            )
            .unwrap();
            Self { article, requested: RefCell::new(Vec::new()) }
        }
    }

    impl ArticleSource for FixedArticle {
        fn get_article(&self, id: i64) -> Result<Article> {
            self.requested.borrow_mut().push(id);
            Ok(self.article.clone())
        }

        fn list_articles(&self, _page: u32, _author: Option<&str>) -> Result<Vec<Article>> {
            Ok(vec![self.article.clone()])
        }
    }

    fn result(category: &str, link: &str) -> SearchResult {
        SearchResult {
            title: "T".to_string(),
            content: "C".to_string(),
            link: link.to_string(),
            category: SearchCategory::from(category),
        }
    }

    #[test]
    fn test_category_falls_back_to_search_category() {
        let own = SearchResult::from_json(
            json!({"title": "a", "content": "b", "link": "1", "category": "static"}),
            "all",
        )
        .unwrap();
        assert_eq!(own.category, SearchCategory::Static);

        let raw = json!({"title": "a", "content": "b", "link": "1"});
        let inherited = SearchResult::from_json(raw, "comments").unwrap();
        assert_eq!(inherited.category, SearchCategory::Comments);
    }

    #[test]
    fn test_complete_static() {
        let source = FixedArticle::new(1);
        let completed = result("static", "42").complete(&source).unwrap();
        assert_eq!(
            completed,
            Completion::Static(StaticFile {
                id: 42,
                title: "T".into(),
                content: "C".into(),
            })
        );
        assert!(source.requested.borrow().is_empty());
    }

    #[test]
    fn test_complete_article() {
        let source = FixedArticle::new(77);
        let completed = result("articles", "lyzarsky-kurz-77").complete(&source).unwrap();
        assert!(matches!(completed, Completion::Article(a) if a.id == 77));
        assert_eq!(*source.requested.borrow(), vec![77]);
    }

    #[test]
    fn test_complete_comment() {
        let source = FixedArticle::new(77);
        let completed = result("comments", "kurz-55-77#3").complete(&source).unwrap();
        match completed {
            Completion::Comment(Some(comment)) => {
                assert_eq!(comment.id, 3);
                assert_eq!(comment.article_id, 77);
            }
            other => panic!("unexpected completion {other:?}"),
        }
        assert_eq!(*source.requested.borrow(), vec![77]);
    }

    #[test]
    fn test_complete_missing_comment() {
        let source = FixedArticle::new(77);
        let completed = result("comments", "kurz-77#8").complete(&source).unwrap();
        assert_eq!(completed, Completion::Comment(None));
    }

    #[test]
    fn test_complete_unsupported() {
        let source = FixedArticle::new(1);
        let err = result("other", "1").complete(&source).unwrap_err();
        assert!(matches!(err, GvpError::Unsupported(_)));
    }

    #[test]
    fn test_complete_malformed_links() {
        let source = FixedArticle::new(1);
        assert!(result("static", "abc").complete(&source).unwrap_err().is_decoding());
        assert!(result("articles", "kurz").complete(&source).unwrap_err().is_decoding());
        assert!(result("comments", "kurz-77").complete(&source).unwrap_err().is_decoding());
    }

    #[test]
    fn test_inferred_category() {
        assert_eq!(result("all", "42").inferred_category(), SearchCategory::Static);
        assert_eq!(result("all", "kurz-77").inferred_category(), SearchCategory::Articles);
        assert_eq!(result("all", "kurz-77#3").inferred_category(), SearchCategory::Comments);
        assert_eq!(
            result("all", "kurz").inferred_category(),
            SearchCategory::Other("all".to_string())
        );
    }
}
