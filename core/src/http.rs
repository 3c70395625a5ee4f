//! The injectable HTTP capability.
//!
//! # Design
//! Requests and responses are plain data. `HttpClient` is the only seam the
//! rest of the crate talks to the network through, so tests substitute a
//! scripted client (see `crate::mock`) and never open a socket.
//!
//! `UreqClient` is the default implementation. ureq is blocking, so each call
//! runs on tokio's blocking pool and the caller gets a future. Status codes
//! are returned as data (`http_status_as_error(false)`); interpreting them is
//! the job of `crate::network`.

use async_trait::async_trait;
use tracing::debug;
use url::Url;

use crate::config::ApiConfig;
use crate::error::TransportError;

/// An HTTP GET request described as plain data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub url: Url,
    pub headers: Vec<(String, String)>,
}

impl HttpRequest {
    /// A GET for `url` that asks for JSON.
    pub fn get(url: Url) -> Self {
        Self {
            url,
            headers: vec![("accept".to_string(), "application/json".to_string())],
        }
    }
}

/// An HTTP response described as plain data.
///
/// `body` is `None` when the transport delivered no payload at all, which is
/// different from an empty body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: Option<Vec<u8>>,
}

impl HttpResponse {
    pub fn new(status: u16, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            body: Some(body.into()),
        }
    }

    pub fn without_body(status: u16) -> Self {
        Self {
            status,
            body: None,
        }
    }

    pub fn is_success(&self) -> bool {
        (200..=299).contains(&self.status)
    }
}

/// Executes one HTTP request.
///
/// Implementations must deliver exactly one outcome per call and must be
/// safe to share between concurrent callers.
#[async_trait]
pub trait HttpClient: Send + Sync {
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, TransportError>;
}

/// `HttpClient` backed by a ureq agent.
#[derive(Clone)]
pub struct UreqClient {
    agent: ureq::Agent,
}

impl Default for UreqClient {
    fn default() -> Self {
        Self::from_config(&ApiConfig::default())
    }
}

impl UreqClient {
    pub fn from_config(config: &ApiConfig) -> Self {
        let agent = ureq::Agent::config_builder()
            .http_status_as_error(false)
            .timeout_global(config.timeout)
            .build()
            .new_agent();
        Self { agent }
    }

    pub fn with_agent(agent: ureq::Agent) -> Self {
        Self { agent }
    }

    fn execute_blocking(agent: &ureq::Agent, request: &HttpRequest) -> Result<HttpResponse, ureq::Error> {
        let mut builder = agent.get(request.url.as_str());
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        let mut response = builder.call()?;

        let status = response.status().as_u16();
        // A 2xx body of any size goes to the decoder rather than failing here.
        let body = response
            .body_mut()
            .with_config()
            .limit(u64::MAX)
            .read_to_vec()?;

        Ok(HttpResponse {
            status,
            body: Some(body),
        })
    }
}

#[async_trait]
impl HttpClient for UreqClient {
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        let agent = self.agent.clone();
        let url = request.url.clone();
        let outcome = tokio::task::spawn_blocking(move || UreqClient::execute_blocking(&agent, &request))
            .await
            .map_err(|e| TransportError::new(TransportError::OTHER, e.to_string()))?;

        match outcome {
            Ok(response) => {
                debug!(%url, status = response.status, "response received");
                Ok(response)
            }
            Err(err) => {
                let err = transport_error(err);
                debug!(%url, code = err.code, error = %err.message, "transport failure");
                Err(err)
            }
        }
    }
}

/// Map a ureq failure onto the transport error codes.
fn transport_error(err: ureq::Error) -> TransportError {
    let code = match &err {
        ureq::Error::BadUri(_) | ureq::Error::Http(_) => TransportError::UNSUPPORTED_URL,
        ureq::Error::Timeout(_) => TransportError::TIMED_OUT,
        ureq::Error::HostNotFound => TransportError::HOST_NOT_FOUND,
        ureq::Error::ConnectionFailed => TransportError::CONNECTION_FAILED,
        ureq::Error::Io(_) => TransportError::IO,
        _ => TransportError::OTHER,
    };
    TransportError::new(code, err.to_string())
}
