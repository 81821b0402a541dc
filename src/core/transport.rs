//! HTTP Transport
//!
//! Transport seam for the token endpoint. Token exchange is the only
//! network operation of this crate, so the interface narrows to "POST a
//! form, receive a response" and test code substitutes an in-memory fake
//! instead of opening sockets.

use async_trait::async_trait;
use std::collections::HashMap;
use std::collections::VecDeque;
use std::time::Duration;
use tracing::debug;

use crate::error::{NetworkError, OAuth2Error, ProtocolError};

/// A form-encoded POST to the token endpoint.
#[derive(Clone, Debug)]
pub struct FormRequest {
    /// Request URL.
    pub url: String,
    /// Request headers.
    pub headers: HashMap<String, String>,
    /// Form-urlencoded body.
    pub body: String,
    /// Request timeout.
    pub timeout: Option<Duration>,
}

/// Response from the token endpoint.
#[derive(Clone, Debug)]
pub struct HttpResponse {
    /// HTTP status code.
    pub status: u16,
    /// Response headers, lowercase keys.
    pub headers: HashMap<String, String>,
    /// Response body.
    pub body: String,
}

impl HttpResponse {
    /// Whether the status is in the 200–299 success range.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// HTTP transport interface (for dependency injection).
#[async_trait]
pub trait HttpTransport: Send + Sync {
    /// POST a form-encoded request. Exactly one outbound request per call.
    async fn post_form(&self, request: FormRequest) -> Result<HttpResponse, OAuth2Error>;
}

/// Default reqwest-based transport.
///
/// Redirects are not followed: a 3xx from a token endpoint is an answer to
/// surface, not a hop to take.
pub struct ReqwestHttpTransport {
    client: reqwest::Client,
    default_timeout: Duration,
    max_response_size: usize,
}

impl ReqwestHttpTransport {
    /// Create a transport with default settings.
    pub fn new() -> Result<Self, OAuth2Error> {
        Self::with_options(Duration::from_secs(30), 1048576) // 1MB
    }

    /// Create a transport with custom options.
    pub fn with_options(
        timeout: Duration,
        max_response_size: usize,
    ) -> Result<Self, OAuth2Error> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .redirect(reqwest::redirect::Policy::none())
            .build()
            .map_err(|e| {
                OAuth2Error::Network(NetworkError::ConnectionFailed {
                    message: e.to_string(),
                })
            })?;

        Ok(Self {
            client,
            default_timeout: timeout,
            max_response_size,
        })
    }
}

#[async_trait]
impl HttpTransport for ReqwestHttpTransport {
    async fn post_form(&self, request: FormRequest) -> Result<HttpResponse, OAuth2Error> {
        let timeout = request.timeout.unwrap_or(self.default_timeout);

        let mut req_builder = self.client.post(&request.url).timeout(timeout);
        for (key, value) in &request.headers {
            req_builder = req_builder.header(key, value);
        }
        req_builder = req_builder.body(request.body);

        debug!(url = %request.url, "sending token endpoint request");

        let response = req_builder.send().await.map_err(|e| {
            if e.is_timeout() {
                OAuth2Error::Network(NetworkError::Timeout { timeout })
            } else {
                OAuth2Error::Network(NetworkError::ConnectionFailed {
                    message: e.to_string(),
                })
            }
        })?;

        let status = response.status().as_u16();

        let mut headers = HashMap::new();
        for (key, value) in response.headers() {
            if let Ok(v) = value.to_str() {
                headers.insert(key.to_string().to_lowercase(), v.to_string());
            }
        }

        if let Some(len) = response.content_length() {
            if len as usize > self.max_response_size {
                return Err(OAuth2Error::Protocol(ProtocolError::ResponseTooLarge {
                    size: len as usize,
                }));
            }
        }

        let body = response.text().await.map_err(|e| {
            OAuth2Error::Protocol(ProtocolError::InvalidResponse {
                message: e.to_string(),
            })
        })?;

        if body.len() > self.max_response_size {
            return Err(OAuth2Error::Protocol(ProtocolError::ResponseTooLarge {
                size: body.len(),
            }));
        }

        Ok(HttpResponse {
            status,
            headers,
            body,
        })
    }
}

type ResponseFn = Box<dyn Fn(&FormRequest) -> HttpResponse + Send + Sync>;

/// Mock HTTP transport for testing.
///
/// Returns queued responses in FIFO order, or computes one per request via
/// [`respond_with`](Self::respond_with); records every request it sees.
#[derive(Default)]
pub struct MockHttpTransport {
    responses: std::sync::Mutex<VecDeque<HttpResponse>>,
    request_history: std::sync::Mutex<Vec<FormRequest>>,
    handler: std::sync::Mutex<Option<ResponseFn>>,
}

impl MockHttpTransport {
    /// Create a new mock transport.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a response to return.
    pub fn queue_response(&self, response: HttpResponse) -> &Self {
        self.responses.lock().unwrap().push_back(response);
        self
    }

    /// Queue a JSON response.
    pub fn queue_json_response(&self, status: u16, body: &serde_json::Value) -> &Self {
        self.queue_response(HttpResponse {
            status,
            headers: [("content-type".to_string(), "application/json".to_string())]
                .into_iter()
                .collect(),
            body: body.to_string(),
        })
    }

    /// Compute responses from the incoming request instead of a queue.
    pub fn respond_with<F>(&self, handler: F) -> &Self
    where
        F: Fn(&FormRequest) -> HttpResponse + Send + Sync + 'static,
    {
        *self.handler.lock().unwrap() = Some(Box::new(handler));
        self
    }

    /// Get request history.
    pub fn requests(&self) -> Vec<FormRequest> {
        self.request_history.lock().unwrap().clone()
    }

    /// Get the last request.
    pub fn last_request(&self) -> Option<FormRequest> {
        self.request_history.lock().unwrap().last().cloned()
    }
}

#[async_trait]
impl HttpTransport for MockHttpTransport {
    async fn post_form(&self, request: FormRequest) -> Result<HttpResponse, OAuth2Error> {
        self.request_history.lock().unwrap().push(request.clone());

        if let Some(handler) = self.handler.lock().unwrap().as_ref() {
            return Ok(handler(&request));
        }

        self.responses.lock().unwrap().pop_front().ok_or_else(|| {
            OAuth2Error::Network(NetworkError::ConnectionFailed {
                message: "no mock response queued".to_string(),
            })
        })
    }
}
