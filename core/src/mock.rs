//! Scripted `HttpClient` for tests.

use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;

use crate::error::TransportError;
use crate::http::{HttpClient, HttpRequest, HttpResponse};

/// `HttpClient` that returns a canned outcome and records every request.
///
/// Clones share state, so a test can hand one clone to a `NetworkManager`
/// and inspect the recorded requests through another.
#[derive(Clone, Default)]
pub struct MockHttpClient {
    state: Arc<Mutex<MockState>>,
}

#[derive(Default)]
struct MockState {
    outcome: Option<Result<HttpResponse, TransportError>>,
    requests: Vec<HttpRequest>,
}

impl MockHttpClient {
    /// Respond to every request with `status` and `body`.
    pub fn respond_with(status: u16, body: impl Into<Vec<u8>>) -> Self {
        Self::with_outcome(Ok(HttpResponse::new(status, body)))
    }

    /// Respond to every request with a full response.
    pub fn respond(response: HttpResponse) -> Self {
        Self::with_outcome(Ok(response))
    }

    /// Fail every request with `error`.
    pub fn fail_with(error: TransportError) -> Self {
        Self::with_outcome(Err(error))
    }

    fn with_outcome(outcome: Result<HttpResponse, TransportError>) -> Self {
        Self {
            state: Arc::new(Mutex::new(MockState {
                outcome: Some(outcome),
                requests: Vec::new(),
            })),
        }
    }

    /// Requests received so far, oldest first.
    pub fn requests(&self) -> Vec<HttpRequest> {
        self.lock().requests.clone()
    }

    /// URLs of the requests received so far, as strings.
    pub fn requested_urls(&self) -> Vec<String> {
        self.lock()
            .requests
            .iter()
            .map(|r| r.url.to_string())
            .collect()
    }

    fn lock(&self) -> MutexGuard<'_, MockState> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }
}

#[async_trait]
impl HttpClient for MockHttpClient {
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        let mut state = self.lock();
        state.requests.push(request);
        state.outcome.clone().unwrap_or_else(|| {
            Err(TransportError::new(
                TransportError::OTHER,
                "no response configured",
            ))
        })
    }
}

#[cfg(test)]
mod tests {
    use url::Url;

    use super::*;

    #[tokio::test]
    async fn records_requests_and_replays_outcome() {
        let client = MockHttpClient::respond_with(200, "{}");
        let observer = client.clone();
        let url = Url::parse("https://example.com/a").unwrap();

        let first = client.execute(HttpRequest::get(url.clone())).await.unwrap();
        let second = client.execute(HttpRequest::get(url)).await.unwrap();

        assert_eq!(first, second);
        assert_eq!(first.body.as_deref(), Some(&b"{}"[..]));
        assert_eq!(
            observer.requested_urls(),
            vec!["https://example.com/a", "https://example.com/a"]
        );
    }

    #[tokio::test]
    async fn unconfigured_mock_fails() {
        let client = MockHttpClient::default();
        let url = Url::parse("https://example.com/").unwrap();
        let err = client.execute(HttpRequest::get(url)).await.unwrap_err();
        assert_eq!(err.code, TransportError::OTHER);
        assert_eq!(client.requests().len(), 1);
    }
}
