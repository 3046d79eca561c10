// src/services/client.rs

//! JSON API client.
//!
//! Every API endpoint answers with an envelope `{"error": ..., "data": ...}`.
//! A non-empty error is surfaced as [`GvpError::Remote`]; otherwise the
//! payload is decoded into the matching model.

use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use url::Url;

use crate::error::{GvpError, Result};
use crate::models::{
    Article, ArticleSource, Config, Contact, ContactCategory, EventDetails, EventSource, News,
    SearchResult, SiteConfig, StaticFile, decode,
};
use crate::services::transport::{HttpTransport, Request, Transport};
use crate::utils::join_url;

/// Search category matching every kind of result.
pub const SEARCH_ALL: &str = "all";

#[derive(Deserialize)]
struct Envelope {
    #[serde(default)]
    error: Value,
    #[serde(default)]
    data: Value,
}

impl Envelope {
    /// The payload, or the server's error message.
    fn into_data(self) -> Result<Value> {
        let message = match self.error {
            Value::Null | Value::Bool(false) => None,
            Value::String(s) if s.is_empty() => None,
            Value::Number(n) if n.as_i64() == Some(0) => None,
            Value::String(s) => Some(s),
            other => Some(other.to_string()),
        };

        match message {
            Some(message) => Err(GvpError::remote(message)),
            None => Ok(self.data),
        }
    }
}

/// Client for the school website.
pub struct GvpClient<T = HttpTransport> {
    transport: T,
    pub(crate) api_url: Url,
    pub(crate) events_url: Url,
}

impl GvpClient<HttpTransport> {
    /// Client with the default configuration.
    pub fn new() -> Result<Self> {
        Self::from_config(&Config::default())
    }

    /// Client over HTTP with the given configuration.
    pub fn from_config(config: &Config) -> Result<Self> {
        config.validate()?;
        Self::with_transport(HttpTransport::new(&config.http)?, &config.site)
    }
}

impl<T: Transport> GvpClient<T> {
    /// Client over any transport.
    pub fn with_transport(transport: T, site: &SiteConfig) -> Result<Self> {
        Ok(Self {
            transport,
            api_url: site.api_url()?,
            events_url: site.events_url()?,
        })
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Send a request and return the raw body.
    pub(crate) fn fetch(&self, request: &Request) -> Result<String> {
        self.transport.send(request)
    }

    /// Call an API endpoint and unwrap its envelope.
    fn request(&self, endpoint: &str, params: &[(&str, String)]) -> Result<Value> {
        let mut request = Request::get(join_url(&self.api_url, endpoint)?);
        for (key, value) in params {
            request = request.query(key, value);
        }

        let body = self.fetch(&request)?;
        let envelope: Envelope = serde_json::from_str(&body)
            .map_err(|e| GvpError::decoding(format!("{endpoint} envelope"), e))?;

        envelope.into_data().inspect_err(|e| {
            log::warn!("{endpoint} request failed: {e}");
        })
    }

    /// An article with a given id.
    pub fn get_article(&self, id: i64) -> Result<Article> {
        let data = self.request("articles", &[("id", id.to_string()), ("action", "by_id".into())])?;
        decode(data, "article")
    }

    /// A page of articles, or only those written by `author`.
    pub fn list_articles(&self, page: u32, author: Option<&str>) -> Result<Vec<Article>> {
        let mut params = Vec::new();
        if let Some(author) = author.filter(|a| !a.is_empty()) {
            params.push(("author", author.to_string()));
            params.push(("action", "by_author".to_string()));
        }
        params.push(("page", page.to_string()));

        let data = self.request("articles", &params)?;
        decode_list(field(data, "articles")?, "article")
    }

    /// All contacts of a category.
    pub fn list_contacts(&self, category: ContactCategory) -> Result<Vec<Contact>> {
        let data = self.request("contacts", &[("type", category.code().to_string())])?;
        decode_list(data, "contact")
    }

    /// A static page with a given id.
    pub fn get_static_file(&self, id: i64) -> Result<StaticFile> {
        let data = self.request("static", &[("id", id.to_string()), ("action", "by_id".into())])?;
        decode(data, "static file")
    }

    /// All static pages.
    pub fn list_static_files(&self) -> Result<Vec<StaticFile>> {
        decode_list(self.request("static", &[])?, "static file")
    }

    /// Search the website.
    ///
    /// Results may be static pages, articles or comments; use
    /// [`SEARCH_ALL`] for every category. Contact matches carry no title
    /// (or a null one) and are left out.
    pub fn search(&self, term: &str, page: u32, category: &str) -> Result<Vec<SearchResult>> {
        let params = [
            ("term", term.to_string()),
            ("page", page.to_string()),
            ("category", category.to_string()),
        ];
        let data = self.request("search", &params)?;

        items(field(data, "results")?, "search results")?
            .into_iter()
            .filter(|item| item.get("title").is_some_and(|title| !title.is_null()))
            .map(|item| SearchResult::from_json(item, category))
            .collect()
    }

    /// All legacy news.
    pub fn list_news(&self) -> Result<Vec<News>> {
        decode_list(self.request("news", &[])?, "news")
    }
}

impl<T: Transport> ArticleSource for GvpClient<T> {
    fn get_article(&self, id: i64) -> Result<Article> {
        GvpClient::get_article(self, id)
    }

    fn list_articles(&self, page: u32, author: Option<&str>) -> Result<Vec<Article>> {
        GvpClient::list_articles(self, page, author)
    }
}

impl<T: Transport> EventSource for GvpClient<T> {
    fn get_event(&self, id: i64) -> Result<EventDetails> {
        GvpClient::get_event(self, id)
    }
}

/// Take a named field out of a payload object.
fn field(mut data: Value, name: &str) -> Result<Value> {
    data.get_mut(name)
        .map(Value::take)
        .ok_or_else(|| GvpError::decoding("payload", format!("missing field '{name}'")))
}

fn items(value: Value, context: &str) -> Result<Vec<Value>> {
    match value {
        Value::Array(items) => Ok(items),
        other => Err(GvpError::decoding(context, format!("expected a list, got {other}"))),
    }
}

fn decode_list<M: DeserializeOwned>(value: Value, context: &str) -> Result<Vec<M>> {
    items(value, context)?
        .into_iter()
        .map(|item| decode(item, context))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Completion, Person, SearchCategory};
    use crate::services::transport::mock::MockTransport;
    use serde_json::json;

    fn client(transport: MockTransport) -> GvpClient<MockTransport> {
        GvpClient::with_transport(transport, &SiteConfig::default()).unwrap()
    }

    fn ok(data: Value) -> String {
        json!({"error": "", "data": data}).to_string()
    }

    fn article(id: i64) -> Value {
        json!({
            "id": id,
            "title": format!("Článek {id}"),
            "preface": "",
            "content": "",
            "pinned": false,
            "date": "2021-05-01 12:00:00",
            "author": {"username": "novakj", "name": "Jan Novák"},
            "comments": [
                {"id": 3, "text": "!", "date": "2021-05-02 12:00:00", "edited": false,
                 "author": {"username": "", "name": "Host"}}
            ],
            "link": format!("clanek-{id}")
        })
    }

    #[test]
    fn test_get_article() {
        let client = client(MockTransport::new().respond("articles", ok(article(77))));
        let article = client.get_article(77).unwrap();
        assert_eq!(article.id, 77);
        assert_eq!(article.link(), "https://gvp.cz/new/zivot/clanek/clanek-77");

        let request = client.transport().last_request();
        assert_eq!(request.url.as_str(), "https://www.gvp.cz/new/api/articles");
        assert_eq!(request.query_value("id"), Some("77"));
        assert_eq!(request.query_value("action"), Some("by_id"));
    }

    #[test]
    fn test_remote_error() {
        let body = json!({"error": "Article not found", "data": null}).to_string();
        let client = client(MockTransport::new().respond("articles", body));
        match client.get_article(1).unwrap_err() {
            GvpError::Remote(message) => assert_eq!(message, "Article not found"),
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn test_malformed_envelope() {
        let client = client(MockTransport::new().respond("news", "<html>oops</html>"));
        assert!(client.list_news().unwrap_err().is_decoding());
    }

    #[test]
    fn test_list_articles_modes() {
        let body = ok(json!({"articles": [article(1), article(2)]}));
        let client = client(MockTransport::new().respond("articles", body));

        let articles = client.list_articles(3, None).unwrap();
        assert_eq!(articles.len(), 2);
        let request = client.transport().last_request();
        assert_eq!(request.query_value("page"), Some("3"));
        assert_eq!(request.query_value("action"), None);

        client.list_articles(1, Some("novakj")).unwrap();
        let request = client.transport().last_request();
        assert_eq!(request.query_value("author"), Some("novakj"));
        assert_eq!(request.query_value("action"), Some("by_author"));
    }

    #[test]
    fn test_user_articles_through_client() {
        let body = ok(json!({"articles": [article(1)]}));
        let client = client(MockTransport::new().respond("articles", body));
        let article = client.list_articles(1, None).unwrap().remove(0);

        let by_author = article.author.articles(&client, 2).unwrap();
        assert_eq!(by_author.len(), 1);
        assert_eq!(client.transport().last_request().query_value("author"), Some("novakj"));
    }

    #[test]
    fn test_list_contacts() {
        let body = ok(json!([{
            "description": "Třídní učitel 2.C",
            "name": "Petr Dvořák",
            "phone": "123",
            "mail": "dvorak",
            "degree": "Mgr.",
            "degree2": "",
            "type": 1
        }]));
        let client = client(MockTransport::new().respond("contacts", body));
        let contacts = client.list_contacts(ContactCategory::Teacher).unwrap();

        assert_eq!(contacts.len(), 1);
        assert_eq!(contacts[0].full_name(), "Mgr. Petr Dvořák");
        assert_eq!(contacts[0].homeroom(), Some("2.C"));
        assert_eq!(contacts[0].mail(), "dvorak@gvp.cz");
        assert_eq!(client.transport().last_request().query_value("type"), Some("1"));
    }

    #[test]
    fn test_static_files() {
        let client = client(
            MockTransport::new()
                .respond("static", ok(json!([{"id": 1, "title": "A", "content": "a"}]))),
        );
        let files = client.list_static_files().unwrap();
        assert_eq!(files[0].title, "A");
        assert!(client.transport().last_request().query.is_empty());
    }

    #[test]
    fn test_get_static_file() {
        let body = ok(json!({"id": "5", "title": "B", "content": "b"}));
        let client = client(MockTransport::new().respond("static", body));
        let file = client.get_static_file(5).unwrap();
        assert_eq!(file.id, 5);
        assert_eq!(client.transport().last_request().query_value("action"), Some("by_id"));
    }

    #[test]
    fn test_search_filters_untitled_results() {
        let body = ok(json!({"results": [
            {"title": "Přijímačky", "content": "...", "link": "12", "category": "static"},
            {"name": "Petr Dvořák", "mail": "dvorak"},
            {"title": null, "content": "", "link": "", "category": "contacts"},
            {"title": "Kurz", "content": "...", "link": "kurz-77#3"}
        ]}));
        let client = client(MockTransport::new().respond("search", body));
        let results = client.search("kurz", 1, "comments").unwrap();

        assert_eq!(results.len(), 2);
        assert_eq!(results[0].category, SearchCategory::Static);
        assert_eq!(results[1].category, SearchCategory::Comments);

        let request = client.transport().last_request();
        assert_eq!(request.query_value("term"), Some("kurz"));
        assert_eq!(request.query_value("category"), Some("comments"));
    }

    #[test]
    fn test_complete_comment_through_client() {
        let hit = json!({
            "title": "Kurz",
            "content": "...",
            "link": "kurz-55-77#3",
            "category": "comments"
        });
        let client = client(
            MockTransport::new()
                .respond("search", ok(json!({"results": [hit]})))
                .respond("articles", ok(article(77))),
        );

        let result = client.search("kurz", 1, SEARCH_ALL).unwrap().remove(0);
        match result.complete(&client).unwrap() {
            Completion::Comment(Some(comment)) => {
                assert_eq!(comment.id, 3);
                assert_eq!(comment.link(), "https://gvp.cz/new/zivot/clanek/clanek-77#3");
            }
            other => panic!("unexpected completion {other:?}"),
        }
        assert_eq!(client.transport().last_request().query_value("id"), Some("77"));
    }

    #[test]
    fn test_list_news() {
        let body = ok(json!([{
            "id": 1,
            "title": "Volno",
            "content": "...",
            "date": "2014-10-10 10:10:10",
            "author": {"username": "reditel", "name": "Ředitel"}
        }]));
        let client = client(MockTransport::new().respond("news", body));
        let news = client.list_news().unwrap();
        assert_eq!(news[0].author.name, "Ředitel");
    }

    #[test]
    fn test_list_payload_must_be_array() {
        let client = client(MockTransport::new().respond("news", ok(json!({"news": []}))));
        assert!(client.list_news().unwrap_err().is_decoding());
    }
}
