//! Lesson source backed by a static HTTP host.

use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use tracing::instrument;

use triolingo_core::error::LoadError;
use triolingo_core::traits::LessonSource;

use crate::check_relative_path;

pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Fetches documents as `GET <base_url>/<path>`.
pub struct HttpSource {
    client: reqwest::Client,
    base_url: String,
    timeout_secs: u64,
    name: String,
}

impl HttpSource {
    pub fn new(base_url: &str) -> Result<Self> {
        Self::with_timeout(base_url, DEFAULT_TIMEOUT_SECS)
    }

    pub fn with_timeout(base_url: &str, timeout_secs: u64) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .context("failed to build HTTP client")?;
        let base_url = base_url.trim_end_matches('/').to_string();

        Ok(Self {
            client,
            name: format!("http:{base_url}"),
            base_url,
            timeout_secs,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[async_trait]
impl LessonSource for HttpSource {
    fn name(&self) -> &str {
        &self.name
    }

    #[instrument(skip(self), fields(base_url = %self.base_url))]
    async fn fetch(&self, path: &str) -> Result<String, LoadError> {
        check_relative_path(path)?;
        let url = format!("{}/{path}", self.base_url);

        let fetch_error = |message: String| LoadError::Fetch {
            resource: path.to_string(),
            message,
        };

        let response = self.client.get(&url).send().await.map_err(|e| {
            if e.is_timeout() {
                fetch_error(format!("timed out after {}s", self.timeout_secs))
            } else if e.is_connect() {
                fetch_error(format!("{} not reachable", self.base_url))
            } else {
                fetch_error(e.to_string())
            }
        })?;

        let status = response.status().as_u16();
        if status == 404 {
            return Err(LoadError::NotFound(path.to_string()));
        }
        if status >= 400 {
            return Err(fetch_error(format!("HTTP {status}")));
        }

        let body = response
            .text()
            .await
            .map_err(|e| fetch_error(format!("failed to read body: {e}")))?;
        tracing::debug!(bytes = body.len(), "fetched {url}");
        Ok(body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn serve(server: &MockServer, at: &str, status: u16, body: &str) {
        Mock::given(method("GET"))
            .and(path(at))
            .respond_with(ResponseTemplate::new(status).set_body_string(body))
            .mount(server)
            .await;
    }

    #[tokio::test]
    async fn loads_documents_over_http() {
        let server = MockServer::start().await;
        serve(
            &server,
            "/languages.json",
            200,
            r#"[{"code":"ja","name":"Japanese","flag":"🇯🇵"}]"#,
        )
        .await;
        serve(
            &server,
            "/ja/lessons.json",
            200,
            r#"[{"id":"kana","title":"Kana"}]"#,
        )
        .await;

        let source = HttpSource::new(&format!("{}/", server.uri())).unwrap();
        assert_eq!(source.base_url(), server.uri());

        let languages = source.languages().await.unwrap();
        assert_eq!(languages[0].name, "Japanese");
        let sets = source.lesson_sets("ja").await.unwrap();
        assert_eq!(sets[0].title, "Kana");
    }

    #[tokio::test]
    async fn base_path_is_kept() {
        let server = MockServer::start().await;
        serve(&server, "/triolingo/languages.json", 200, "[]").await;

        let source = HttpSource::new(&format!("{}/triolingo", server.uri())).unwrap();
        assert!(source.languages().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn missing_document_is_not_found() {
        let server = MockServer::start().await;
        serve(&server, "/es/lessons.json", 404, "Not Found").await;

        let source = HttpSource::new(&server.uri()).unwrap();
        let err = source.lesson_sets("es").await.unwrap_err();
        assert!(matches!(err, LoadError::NotFound(p) if p == "es/lessons.json"));
    }

    #[tokio::test]
    async fn server_error_is_a_fetch_error() {
        let server = MockServer::start().await;
        serve(&server, "/languages.json", 500, "boom").await;

        let source = HttpSource::new(&server.uri()).unwrap();
        let err = source.languages().await.unwrap_err();
        assert!(matches!(err, LoadError::Fetch { .. }));
        assert!(err.to_string().contains("500"));
    }

    #[tokio::test]
    async fn html_instead_of_json_is_a_parse_error() {
        let server = MockServer::start().await;
        serve(&server, "/languages.json", 200, "<html>oops</html>").await;

        let source = HttpSource::new(&server.uri()).unwrap();
        let err = source.languages().await.unwrap_err();
        assert!(matches!(err, LoadError::Parse { .. }));
    }

    #[tokio::test]
    async fn unreachable_host_is_a_fetch_error() {
        let source = HttpSource::with_timeout("http://127.0.0.1:1", 2).unwrap();
        let err = source.fetch("languages.json").await.unwrap_err();
        assert!(matches!(err, LoadError::Fetch { .. }));
    }
}
