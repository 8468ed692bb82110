//! Client for an external content service.
//!
//! Fetches `GET {base_url}/pages/{slug}`:
//! - `200` - JSON-encoded [`ContentDocument`]
//! - `404` - the document does not exist
//! - anything else - [`ContentError::Status`]
//!
//! Both present and absent results are cached with `moka`; failures are not.

use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache;
use reqwest::StatusCode;
use reqwest::header::ACCEPT;
use secrecy::{ExposeSecret, SecretString};
use tracing::{debug, instrument};
use url::Url;

use ansania_core::{ContentDocument, Slug};

use super::{ContentError, ContentRepository};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);
const CACHE_CAPACITY: u64 = 500;

/// Client for the external content service.
#[derive(Clone)]
pub struct HttpContentClient {
    inner: Arc<HttpContentClientInner>,
}

struct HttpContentClientInner {
    client: reqwest::Client,
    base_url: Url,
    api_token: Option<SecretString>,
    cache: Cache<Slug, Option<ContentDocument>>,
}

impl std::fmt::Debug for HttpContentClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpContentClient")
            .field("base_url", &self.inner.base_url.as_str())
            .field(
                "api_token",
                &self.inner.api_token.as_ref().map(|_| "[REDACTED]"),
            )
            .finish_non_exhaustive()
    }
}

impl HttpContentClient {
    /// Create a new content service client.
    ///
    /// # Errors
    ///
    /// Returns `ContentError::Http` if the underlying HTTP client cannot be built.
    pub fn new(
        mut base_url: Url,
        api_token: Option<SecretString>,
        cache_ttl: Duration,
    ) -> Result<Self, ContentError> {
        // Url::join replaces the last path segment unless the base ends in '/'
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;

        let cache = Cache::builder()
            .max_capacity(CACHE_CAPACITY)
            .time_to_live(cache_ttl)
            .build();

        Ok(Self {
            inner: Arc::new(HttpContentClientInner {
                client,
                base_url,
                api_token,
                cache,
            }),
        })
    }

    fn page_url(&self, slug: &Slug) -> Result<Url, ContentError> {
        self.inner
            .base_url
            .join(&format!("pages/{slug}"))
            .map_err(|e| ContentError::DataCorruption(format!("invalid page URL: {e}")))
    }

    /// Fetch a document from the service, bypassing the cache.
    async fn fetch(&self, slug: &Slug) -> Result<Option<ContentDocument>, ContentError> {
        let mut request = self
            .inner
            .client
            .get(self.page_url(slug)?)
            .header(ACCEPT, "application/json");

        if let Some(token) = &self.inner.api_token {
            request = request.bearer_auth(token.expose_secret());
        }

        let response = request.send().await?;
        let status = response.status();

        if status == StatusCode::NOT_FOUND {
            return Ok(None);
        }

        // Get response body as text first for better error diagnostics
        let body = response.text().await?;

        if !status.is_success() {
            tracing::error!(
                status = %status,
                body = %body.chars().take(500).collect::<String>(),
                "Content service returned non-success status"
            );
            return Err(ContentError::Status(status.as_u16()));
        }

        let document: ContentDocument = serde_json::from_str(&body).map_err(|e| {
            tracing::error!(
                error = %e,
                body = %body.chars().take(500).collect::<String>(),
                "Failed to parse content service response"
            );
            ContentError::Parse(e)
        })?;

        if document.slug != *slug {
            return Err(ContentError::DataCorruption(format!(
                "requested '{slug}' but received '{}'",
                document.slug
            )));
        }

        Ok(Some(document))
    }
}

impl ContentRepository for HttpContentClient {
    #[instrument(skip(self), fields(slug = %slug))]
    async fn get_page(&self, slug: &Slug) -> Result<Option<ContentDocument>, ContentError> {
        if let Some(cached) = self.inner.cache.get(slug).await {
            debug!("Content cache hit");
            return Ok(cached);
        }

        let document = self.fetch(slug).await?;
        self.inner
            .cache
            .insert(slug.clone(), document.clone())
            .await;

        Ok(document)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    fn client(server: &MockServer, token: Option<&str>) -> HttpContentClient {
        HttpContentClient::new(
            Url::parse(&server.uri()).unwrap(),
            token.map(|t| SecretString::from(t.to_string())),
            Duration::from_secs(60),
        )
        .unwrap()
    }

    #[tokio::test]
    async fn test_present_document_is_returned_and_cached() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/pages/faq"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "slug": "faq",
                "title": "FAQ",
                "content": "## Shipping",
                "metadata": { "description": "Answers" }
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = client(&server, None);
        let slug = Slug::from_static("faq");

        let first = client.get_page(&slug).await.unwrap().unwrap();
        let second = client.get_page(&slug).await.unwrap().unwrap();

        assert_eq!(first.title, "FAQ");
        assert_eq!(first.description(), Some("Answers"));
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_not_found_is_absent_not_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/pages/privacy-policy"))
            .respond_with(ResponseTemplate::new(404))
            .expect(1)
            .mount(&server)
            .await;

        let client = client(&server, None);
        let slug = Slug::from_static("privacy-policy");

        assert!(client.get_page(&slug).await.unwrap().is_none());
        // Absence is cached too
        assert!(client.get_page(&slug).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_server_error_propagates_and_is_not_cached() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/pages/terms-and-conditions"))
            .respond_with(ResponseTemplate::new(503))
            .expect(2)
            .mount(&server)
            .await;

        let client = client(&server, None);
        let slug = Slug::from_static("terms-and-conditions");

        assert!(matches!(
            client.get_page(&slug).await,
            Err(ContentError::Status(503))
        ));
        assert!(matches!(
            client.get_page(&slug).await,
            Err(ContentError::Status(503))
        ));
    }

    #[tokio::test]
    async fn test_invalid_body_is_parse_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/pages/about-us"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
            .mount(&server)
            .await;

        let client = client(&server, None);
        let result = client.get_page(&Slug::from_static("about-us")).await;

        assert!(matches!(result, Err(ContentError::Parse(_))));
    }

    #[tokio::test]
    async fn test_mismatched_slug_is_rejected() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/pages/faq"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "slug": "about-us",
                "title": "About",
                "content": ""
            })))
            .mount(&server)
            .await;

        let client = client(&server, None);
        let result = client.get_page(&Slug::from_static("faq")).await;

        assert!(matches!(result, Err(ContentError::DataCorruption(_))));
    }

    #[tokio::test]
    async fn test_bearer_token_and_base_path() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/cms/v1/pages/shipping-policy"))
            .and(header("authorization", "Bearer k9$Tq2!vLx7@Pz4#"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "slug": "shipping-policy",
                "title": "Shipping Policy",
                "content": "Ships in 2 days"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = HttpContentClient::new(
            Url::parse(&format!("{}/cms/v1", server.uri())).unwrap(),
            Some(SecretString::from("k9$Tq2!vLx7@Pz4#")),
            Duration::from_secs(60),
        )
        .unwrap();

        let document = client
            .get_page(&Slug::from_static("shipping-policy"))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(document.title, "Shipping Policy");
    }
}
