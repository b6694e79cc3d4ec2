//! Network collaborators: suggestion, summary and article lookups.
//!
//! All three talk to a MediaWiki host over HTTPS with one shared
//! `reqwest::Client`. Each request is awaited before the next is sent and
//! none are retried; a failure is mapped onto [`WikiBioError`] and handed
//! back to the caller.
//!
//! Response parsing is split from transport so the JSON handling can be
//! tested without a network: see [`parse_suggestions`], [`parse_summary`]
//! and [`parse_article`].

use crate::config::ExportConfig;
use crate::error::WikiBioError;
use crate::output::{Summary, SummaryOutcome};
use reqwest::{StatusCode, Url};
use serde::Deserialize;
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, info};

const USER_AGENT: &str = concat!("wikibio/", env!("CARGO_PKG_VERSION"));

/// HTTP client bound to one API host.
#[derive(Debug, Clone)]
pub struct WikiClient {
    http: reqwest::Client,
    api_base: String,
    timeout_secs: u64,
    suggestion_limit: usize,
    min_query_chars: usize,
}

impl WikiClient {
    pub fn new(config: &ExportConfig) -> Result<Self, WikiBioError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| WikiBioError::Internal(format!("HTTP client: {e}")))?;
        Ok(Self {
            http,
            api_base: config.api_base.clone(),
            timeout_secs: config.request_timeout_secs,
            suggestion_limit: config.suggestion_limit,
            min_query_chars: config.min_query_chars,
        })
    }

    /// Up to `suggestion_limit` titles matching `query`.
    ///
    /// Queries shorter than `min_query_chars` (after trimming) return an
    /// empty list without a request.
    pub async fn suggest(&self, query: &str) -> Result<Vec<String>, WikiBioError> {
        let query = query.trim();
        if query.chars().count() < self.min_query_chars {
            debug!("Query '{}' too short, not searching", query);
            return Ok(Vec::new());
        }
        let url = self.opensearch_url(query)?;
        let (status, body) = self.get_json(&url).await?;
        if !status.is_success() {
            return Err(WikiBioError::HttpStatus {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }
        let mut titles = parse_suggestions(&body).map_err(|detail| WikiBioError::MalformedResponse {
            url: url.to_string(),
            detail,
        })?;
        titles.truncate(self.suggestion_limit);
        debug!("{} suggestion(s) for '{}'", titles.len(), query);
        Ok(titles)
    }

    /// Summary card for `title`.
    pub async fn summary(&self, title: &str) -> Result<SummaryOutcome, WikiBioError> {
        let title = title.trim();
        if title.is_empty() {
            return Err(WikiBioError::EmptyTitle);
        }
        let url = self.summary_url(title)?;
        let (status, body) = self.get_json(&url).await?;
        if status == StatusCode::NOT_FOUND {
            return Ok(SummaryOutcome::NotFound);
        }
        if !status.is_success() {
            return Err(WikiBioError::HttpStatus {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }
        parse_summary(&body).map_err(|detail| WikiBioError::MalformedResponse {
            url: url.to_string(),
            detail,
        })
    }

    /// Rendered article HTML for `title`.
    pub async fn article_html(&self, title: &str) -> Result<String, WikiBioError> {
        let title = title.trim();
        if title.is_empty() {
            return Err(WikiBioError::EmptyTitle);
        }
        let url = self.parse_url(title)?;
        let (status, body) = self.get_json(&url).await?;
        if !status.is_success() {
            return Err(WikiBioError::HttpStatus {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }
        match parse_article(&body) {
            Ok(ArticleResponse::Html(html)) => {
                info!("Fetched article '{}': {} bytes of HTML", title, html.len());
                Ok(html)
            }
            Ok(ArticleResponse::Missing(detail)) => Err(WikiBioError::ArticleMissing {
                title: title.to_string(),
                detail,
            }),
            Err(detail) => Err(WikiBioError::MalformedResponse {
                url: url.to_string(),
                detail,
            }),
        }
    }

    // ── URLs ─────────────────────────────────────────────────────────────

    fn base(&self) -> Result<Url, WikiBioError> {
        Url::parse(&self.api_base)
            .map_err(|e| WikiBioError::InvalidConfig(format!("API base '{}': {e}", self.api_base)))
    }

    fn action_url(&self, pairs: &[(&str, &str)]) -> Result<Url, WikiBioError> {
        let mut url = self.base()?.join("/w/api.php").map_err(|e| {
            WikiBioError::InvalidConfig(format!("API base '{}': {e}", self.api_base))
        })?;
        url.query_pairs_mut().extend_pairs(pairs);
        Ok(url)
    }

    fn opensearch_url(&self, query: &str) -> Result<Url, WikiBioError> {
        let limit = self.suggestion_limit.to_string();
        self.action_url(&[
            ("action", "opensearch"),
            ("search", query),
            ("limit", &limit),
            ("format", "json"),
        ])
    }

    fn parse_url(&self, title: &str) -> Result<Url, WikiBioError> {
        self.action_url(&[
            ("action", "parse"),
            ("page", title),
            ("prop", "text"),
            ("redirects", "1"),
            ("format", "json"),
            ("formatversion", "1"),
        ])
    }

    fn summary_url(&self, title: &str) -> Result<Url, WikiBioError> {
        let mut url = self.base()?;
        url.path_segments_mut()
            .map_err(|_| {
                WikiBioError::InvalidConfig(format!("API base '{}' cannot take a path", self.api_base))
            })?
            .clear()
            .extend(["api", "rest_v1", "page", "summary", title]);
        Ok(url)
    }

    // ── Transport ────────────────────────────────────────────────────────

    /// GET `url` and decode the body as JSON. Non-success statuses are
    /// returned to the caller, with a `Null` body when it isn't JSON.
    async fn get_json(&self, url: &Url) -> Result<(StatusCode, Value), WikiBioError> {
        debug!("GET {}", url);
        let response = self
            .http
            .get(url.clone())
            .send()
            .await
            .map_err(|e| self.transport_error(url, e))?;
        let status = response.status();
        debug!("{} → {}", url, status);

        let text = response
            .text()
            .await
            .map_err(|e| self.transport_error(url, e))?;
        if !status.is_success() {
            return Ok((status, serde_json::from_str(&text).unwrap_or(Value::Null)));
        }
        let body = serde_json::from_str(&text).map_err(|e| WikiBioError::MalformedResponse {
            url: url.to_string(),
            detail: format!("invalid JSON: {e}"),
        })?;
        Ok((status, body))
    }

    fn transport_error(&self, url: &Url, e: reqwest::Error) -> WikiBioError {
        if e.is_timeout() {
            WikiBioError::Timeout {
                url: url.to_string(),
                secs: self.timeout_secs,
            }
        } else {
            WikiBioError::NetworkFailure {
                url: url.to_string(),
                reason: e.to_string(),
            }
        }
    }
}

// ── Response parsing ─────────────────────────────────────────────────────

/// Titles from an opensearch response: `[query, [titles...], [...], [...]]`.
pub fn parse_suggestions(body: &Value) -> Result<Vec<String>, String> {
    let titles = body
        .get(1)
        .and_then(Value::as_array)
        .ok_or_else(|| "opensearch response has no title list".to_string())?;
    Ok(titles
        .iter()
        .filter_map(Value::as_str)
        .map(str::to_string)
        .collect())
}

#[derive(Deserialize)]
struct RawSummary {
    #[serde(rename = "type")]
    kind: String,
    title: String,
    #[serde(default)]
    extract: String,
    description: Option<String>,
    thumbnail: Option<RawImage>,
    content_urls: Option<RawContentUrls>,
}

#[derive(Deserialize)]
struct RawImage {
    source: String,
}

#[derive(Deserialize)]
struct RawContentUrls {
    desktop: Option<RawPageUrl>,
}

#[derive(Deserialize)]
struct RawPageUrl {
    page: String,
}

/// Classify a page-summary response by its `type` field.
pub fn parse_summary(body: &Value) -> Result<SummaryOutcome, String> {
    let raw = RawSummary::deserialize(body).map_err(|e| format!("summary: {e}"))?;
    Ok(match raw.kind.as_str() {
        "standard" => SummaryOutcome::Found(Summary {
            title: raw.title,
            thumbnail: raw.thumbnail.map(|t| t.source),
            extract: raw.extract,
            description: raw.description,
            page_url: raw.content_urls.and_then(|u| u.desktop).map(|d| d.page),
        }),
        "disambiguation" => SummaryOutcome::Disambiguation,
        other => {
            debug!("Summary type '{}' treated as not found", other);
            SummaryOutcome::NotFound
        }
    })
}

/// What the parse API returned for a title.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArticleResponse {
    Html(String),
    /// The API answered with an error object (usually `missingtitle`).
    Missing(String),
}

/// Pull the article HTML out of a parse response (`parse.text["*"]`).
pub fn parse_article(body: &Value) -> Result<ArticleResponse, String> {
    if let Some(error) = body.get("error") {
        let info = error
            .get("info")
            .and_then(Value::as_str)
            .or_else(|| error.get("code").and_then(Value::as_str))
            .unwrap_or("unknown error");
        return Ok(ArticleResponse::Missing(info.to_string()));
    }
    body.pointer("/parse/text/*")
        .and_then(Value::as_str)
        .map(|html| ArticleResponse::Html(html.to_string()))
        .ok_or_else(|| "parse response has no parse.text".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn client() -> WikiClient {
        WikiClient::new(&ExportConfig::default()).unwrap()
    }

    #[test]
    fn suggestions_from_opensearch() {
        let body = json!(["ada", ["Ada Lovelace", "Ada (programming language)"], ["", ""], ["u1", "u2"]]);
        assert_eq!(
            parse_suggestions(&body).unwrap(),
            vec!["Ada Lovelace", "Ada (programming language)"]
        );
        assert!(parse_suggestions(&json!(["ada", []])).unwrap().is_empty());
        assert!(parse_suggestions(&json!({"error": {}})).is_err());
    }

    #[test]
    fn summary_standard() {
        let body = json!({
            "type": "standard",
            "title": "Ada Lovelace",
            "description": "English mathematician (1815–1852)",
            "extract": "Augusta Ada King was an English mathematician.",
            "thumbnail": {"source": "https://upload.example/ada.jpg", "width": 240, "height": 320},
            "content_urls": {"desktop": {"page": "https://en.wikipedia.org/wiki/Ada_Lovelace"}}
        });
        let SummaryOutcome::Found(s) = parse_summary(&body).unwrap() else {
            panic!("expected Found");
        };
        assert_eq!(s.title, "Ada Lovelace");
        assert_eq!(s.thumbnail.as_deref(), Some("https://upload.example/ada.jpg"));
        assert_eq!(s.page_url.as_deref(), Some("https://en.wikipedia.org/wiki/Ada_Lovelace"));
    }

    #[test]
    fn summary_without_thumbnail() {
        let body = json!({"type": "standard", "title": "X", "extract": "y"});
        let outcome = parse_summary(&body).unwrap();
        assert_eq!(outcome.summary().unwrap().thumbnail, None);
    }

    #[test]
    fn summary_disambiguation_and_other_types() {
        let dab = json!({"type": "disambiguation", "title": "Mercury"});
        assert_eq!(parse_summary(&dab).unwrap(), SummaryOutcome::Disambiguation);
        let missing = json!({"type": "no-extract", "title": "Z"});
        assert_eq!(parse_summary(&missing).unwrap(), SummaryOutcome::NotFound);
        assert!(parse_summary(&json!({"title": "no type"})).is_err());
    }

    #[test]
    fn article_html_extracted() {
        let body = json!({"parse": {"title": "Ada", "pageid": 1, "text": {"*": "<p>x</p>"}}});
        assert_eq!(
            parse_article(&body).unwrap(),
            ArticleResponse::Html("<p>x</p>".into())
        );
    }

    #[test]
    fn article_error_object_is_missing() {
        let body = json!({"error": {"code": "missingtitle", "info": "The page you specified doesn't exist."}});
        assert_eq!(
            parse_article(&body).unwrap(),
            ArticleResponse::Missing("The page you specified doesn't exist.".into())
        );
        assert!(parse_article(&json!({"parse": {}})).is_err());
    }

    #[test]
    fn opensearch_url_encodes_query() {
        let url = client().opensearch_url("Ada Love&lace").unwrap();
        assert_eq!(url.path(), "/w/api.php");
        let pairs: Vec<(String, String)> = url.query_pairs().into_owned().collect();
        assert!(pairs.contains(&("action".into(), "opensearch".into())));
        assert!(pairs.contains(&("search".into(), "Ada Love&lace".into())));
        assert!(pairs.contains(&("limit".into(), "10".into())));
    }

    #[test]
    fn summary_url_escapes_title() {
        let url = client().summary_url("AC/DC").unwrap();
        assert_eq!(
            url.as_str(),
            "https://en.wikipedia.org/api/rest_v1/page/summary/AC%2FDC"
        );
    }

    #[test]
    fn parse_url_requests_text() {
        let url = client().parse_url("Ada Lovelace").unwrap();
        let pairs: Vec<(String, String)> = url.query_pairs().into_owned().collect();
        assert!(pairs.contains(&("page".into(), "Ada Lovelace".into())));
        assert!(pairs.contains(&("prop".into(), "text".into())));
        assert!(pairs.contains(&("formatversion".into(), "1".into())));
    }

    #[test]
    fn short_query_makes_no_request() {
        let config = ExportConfig::builder()
            .api_base("http://127.0.0.1:9")
            .build()
            .unwrap();
        let client = WikiClient::new(&config).unwrap();
        assert!(tokio_test::block_on(client.suggest("a")).unwrap().is_empty());
        assert!(tokio_test::block_on(client.suggest("  é ")).unwrap().is_empty());
    }

    #[tokio::test]
    async fn empty_title_rejected_before_request() {
        let c = client();
        assert!(matches!(c.summary("  ").await, Err(WikiBioError::EmptyTitle)));
        assert!(matches!(c.article_html("").await, Err(WikiBioError::EmptyTitle)));
    }

    #[tokio::test]
    async fn unreachable_host_is_network_error() {
        let config = ExportConfig::builder()
            .api_base("http://127.0.0.1:9")
            .request_timeout_secs(2)
            .build()
            .unwrap();
        let err = WikiClient::new(&config).unwrap().suggest("Ada").await.unwrap_err();
        assert!(err.is_network(), "{err:?}");
    }
}
