//! Fetch-and-decode over an injected `HttpClient`.
//!
//! # Design
//! `Network` is the seam repositories depend on. It is generic over the
//! decode target, so one implementation serves every endpoint shape (bare
//! objects and paged envelopes alike). `NetworkManager` is the real
//! implementation; it holds nothing but its client, so concurrent calls never
//! share per-call state.
//!
//! Every call issues at most one request and resolves to exactly one
//! outcome: the decoded value or one `FetchError` variant.

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

use crate::config::ApiConfig;
use crate::error::{FetchError, Result};
use crate::http::{HttpClient, HttpRequest, HttpResponse, UreqClient};

#[async_trait]
pub trait Network: Send + Sync {
    /// Fetch `url` and decode the response body as `T`.
    async fn fetch_url<T>(&self, url: Url) -> Result<T>
    where
        T: DeserializeOwned + Send;

    /// Parse `url` and fetch it. A string that does not parse as an absolute
    /// URL fails with `FetchError::InvalidUrl` before any request is made.
    ///
    /// The request goes to the parsed URL in its normalized WHATWG form, not
    /// the raw string: surrounding whitespace is stripped, an empty path
    /// becomes `/` and scheme and host are lowercased.
    async fn fetch<T>(&self, url: &str) -> Result<T>
    where
        T: DeserializeOwned + Send,
    {
        let parsed = Url::parse(url).map_err(|e| {
            debug!(url, error = %e, "rejecting unparseable URL");
            FetchError::InvalidUrl
        })?;
        self.fetch_url(parsed).await
    }
}

/// `Network` implementation backed by an `HttpClient`.
#[derive(Clone)]
pub struct NetworkManager<C = UreqClient> {
    client: C,
}

impl Default for NetworkManager<UreqClient> {
    fn default() -> Self {
        Self::new(UreqClient::default())
    }
}

impl NetworkManager<UreqClient> {
    pub fn from_config(config: &ApiConfig) -> Self {
        Self::new(UreqClient::from_config(config))
    }
}

impl<C: HttpClient> NetworkManager<C> {
    pub fn new(client: C) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &C {
        &self.client
    }
}

#[async_trait]
impl<C: HttpClient> Network for NetworkManager<C> {
    async fn fetch_url<T>(&self, url: Url) -> Result<T>
    where
        T: DeserializeOwned + Send,
    {
        debug!(%url, "fetching");
        let response = self
            .client
            .execute(HttpRequest::get(url))
            .await
            .map_err(FetchError::RequestFailed)?;
        decode_response(response)
    }
}

/// Check the status, then decode the body as JSON.
///
/// Any status outside 200..=299, or a missing body, is `InvalidResponse`; the
/// body of an error response is never inspected.
pub fn decode_response<T: DeserializeOwned>(response: HttpResponse) -> Result<T> {
    if !response.is_success() {
        debug!(status = response.status, "unsuccessful status");
        return Err(FetchError::InvalidResponse);
    }
    let Some(body) = response.body else {
        debug!(status = response.status, "response has no body");
        return Err(FetchError::InvalidResponse);
    };
    serde_json::from_slice(&body).map_err(|e| {
        debug!(error = %e, "decoding failed");
        FetchError::decoding(e)
    })
}

#[cfg(test)]
mod tests {
    use serde::Deserialize;

    use super::*;
    use crate::error::TransportError;
    use crate::mock::MockHttpClient;

    #[derive(Debug, Deserialize)]
    struct TestModel {
        id: u64,
        name: String,
    }

    fn manager(client: &MockHttpClient) -> NetworkManager<MockHttpClient> {
        NetworkManager::new(client.clone())
    }

    #[tokio::test]
    async fn fetch_decodes_successful_response() {
        let client = MockHttpClient::respond_with(200, r#"{"id": 1, "name": "Rick"}"#);
        let model: TestModel = manager(&client).fetch("https://example.com").await.unwrap();
        assert_eq!(model.id, 1);
        assert_eq!(model.name, "Rick");
        assert_eq!(client.requested_urls(), vec!["https://example.com/"]);
    }

    #[tokio::test]
    async fn fetch_sends_normalized_url() {
        let client = MockHttpClient::respond_with(200, r#"{"id": 1, "name": "Rick"}"#);
        let _: TestModel = manager(&client)
            .fetch("  HTTPS://Example.COM/api/character/1  ")
            .await
            .unwrap();
        assert_eq!(
            client.requested_urls(),
            vec!["https://example.com/api/character/1"]
        );
    }

    #[tokio::test]
    async fn concurrent_fetches_share_one_manager() {
        let client = MockHttpClient::respond_with(200, r#"{"id": 1, "name": "Rick"}"#);
        let network = manager(&client);

        let (a, b) = tokio::join!(
            network.fetch::<TestModel>("https://example.com/api/character/1"),
            network.fetch::<TestModel>("https://example.com/api/character/2"),
        );

        assert_eq!(a.unwrap().id, 1);
        assert_eq!(b.unwrap().name, "Rick");
        let mut urls = client.requested_urls();
        urls.sort();
        assert_eq!(
            urls,
            vec![
                "https://example.com/api/character/1",
                "https://example.com/api/character/2",
            ]
        );
    }

    #[tokio::test]
    async fn fetch_url_issues_exactly_one_request() {
        let client = MockHttpClient::respond_with(200, r#"{"id": 2, "name": "Morty"}"#);
        let url = Url::parse("https://example.com/api/character/2").unwrap();
        let _: TestModel = manager(&client).fetch_url(url.clone()).await.unwrap();
        let requests = client.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].url, url);
    }

    #[tokio::test]
    async fn malformed_url_issues_no_request() {
        let client = MockHttpClient::respond_with(200, r#"{"id": 1, "name": "Rick"}"#);
        for bad in ["invalid url", "", "/character/1", "http://"] {
            let err = manager(&client).fetch::<TestModel>(bad).await.unwrap_err();
            assert_eq!(err, FetchError::InvalidUrl, "{bad:?}");
        }
        assert!(client.requests().is_empty());
    }

    #[tokio::test]
    async fn transport_failure_is_request_failed() {
        let client = MockHttpClient::fail_with(TransportError::new(1234, "connection lost"));
        let err = manager(&client)
            .fetch::<TestModel>("https://example.com")
            .await
            .unwrap_err();
        match &err {
            FetchError::RequestFailed(cause) => assert_eq!(cause.code, 1234),
            other => panic!("expected RequestFailed, got {other:?}"),
        }
        assert_eq!(
            err,
            FetchError::RequestFailed(TransportError::new(1234, "different message"))
        );
        assert_eq!(client.requests().len(), 1);
    }

    #[tokio::test]
    async fn non_success_status_is_invalid_response() {
        for status in [100, 199, 301, 404, 500, 503] {
            let client = MockHttpClient::respond_with(status, r#"{"id": 1, "name": "Rick"}"#);
            let err = manager(&client)
                .fetch::<TestModel>("https://example.com")
                .await
                .unwrap_err();
            assert_eq!(err, FetchError::InvalidResponse, "status {status}");
        }
    }

    #[tokio::test]
    async fn missing_body_is_invalid_response() {
        let client = MockHttpClient::respond(HttpResponse::without_body(200));
        let err = manager(&client)
            .fetch::<TestModel>("https://example.com")
            .await
            .unwrap_err();
        assert_eq!(err, FetchError::InvalidResponse);
    }

    #[tokio::test]
    async fn shape_mismatch_is_decoding_failed() {
        for body in ["invalid json", "", r#"{"id": 1}"#, r#"{"id": "one", "name": "Rick"}"#] {
            let client = MockHttpClient::respond_with(204, body);
            let err = manager(&client)
                .fetch::<TestModel>("https://example.com")
                .await
                .unwrap_err();
            assert!(matches!(err, FetchError::DecodingFailed(_)), "{body:?}: {err:?}");
        }
    }

    #[test]
    fn decode_response_ignores_error_body() {
        let response = HttpResponse::new(404, r#"{"error": "Character not found"}"#);
        let err = decode_response::<serde_json::Value>(response).unwrap_err();
        assert_eq!(err, FetchError::InvalidResponse);
    }
}
