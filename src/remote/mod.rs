//! Remote storage over AWS HTTP APIs
//!
//! - `dynamo`: game-state records in DynamoDB
//! - `s3`: asset objects in S3, degrading to local asset paths
//! - `sigv4`: AWS Signature Version 4 request signing
//!
//! Requests are built and signed as `reqwest::Request`s and executed through
//! the [`Transport`] seam, so response handling can be exercised natively
//! against a fake.

pub mod dynamo;
pub mod s3;
pub mod sigv4;

use async_trait::async_trait;
use reqwest::{Client, Request, Response, Url};
use thiserror::Error;

pub use dynamo::DynamoDbStore;
pub use s3::{AssetPayload, AssetStore};

/// Errors from a remote call. All of them are absorbed by the gateway.
#[derive(Debug, Error)]
pub enum RemoteError {
    /// Credentials not configured; raised before any I/O
    #[error("AWS credentials are not configured")]
    MissingCredentials,

    #[error("request signing failed: {0}")]
    Signing(String),

    #[error("invalid request URL: {0}")]
    InvalidUrl(String),

    #[error("network error: {0}")]
    Network(String),

    #[error("throttled by remote service: {0}")]
    Throttled(String),

    #[error("HTTP {status}: {message}")]
    Http { status: u16, message: String },

    #[error("malformed response: {0}")]
    Malformed(String),
}

/// Executes signed requests. Single-threaded: futures need not be `Send`.
#[async_trait(?Send)]
pub trait Transport {
    async fn execute(&self, request: Request) -> Result<Response, RemoteError>;
}

/// [`Transport`] backed by a shared `reqwest::Client` (`fetch()` in the browser)
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    pub fn new() -> Result<Self, RemoteError> {
        let client = Client::builder()
            .build()
            .map_err(|e| RemoteError::Network(e.to_string()))?;
        Ok(Self { client })
    }
}

#[async_trait(?Send)]
impl Transport for HttpTransport {
    async fn execute(&self, request: Request) -> Result<Response, RemoteError> {
        self.client
            .execute(request)
            .await
            .map_err(|e| RemoteError::Network(e.to_string()))
    }
}

/// `https://<host><path>`; `path` must already be URI-encoded
pub(crate) fn https_url(host: &str, path: &str) -> Result<Url, RemoteError> {
    Url::parse(&format!("https://{}{}", host, path)).map_err(|e| RemoteError::InvalidUrl(e.to_string()))
}

/// Key-value record store for serialized game state
#[async_trait(?Send)]
pub trait RemoteStore {
    /// Write the payload for `user_id`, replacing any previous record
    async fn put_state(&self, user_id: &str, payload: &str) -> Result<(), RemoteError>;

    /// Read the payload for `user_id`; `Ok(None)` when no record exists
    async fn get_state(&self, user_id: &str) -> Result<Option<String>, RemoteError>;
}

#[cfg(test)]
pub(crate) mod testing {
    //! Scripted transport for exercising request/response handling

    use std::cell::RefCell;
    use std::collections::VecDeque;

    use super::*;

    /// A recorded outgoing request
    #[derive(Debug, Clone)]
    pub struct SentRequest {
        pub method: reqwest::Method,
        pub url: Url,
        pub headers: reqwest::header::HeaderMap,
        pub body: Vec<u8>,
    }

    impl SentRequest {
        pub fn header(&self, name: &str) -> Option<&str> {
            self.headers.get(name).and_then(|v| v.to_str().ok())
        }
    }

    #[derive(Default)]
    pub struct ScriptedTransport {
        pub requests: RefCell<Vec<SentRequest>>,
        responses: RefCell<VecDeque<Result<(u16, String), RemoteError>>>,
    }

    impl ScriptedTransport {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn respond(&self, status: u16, body: &str) {
            self.responses
                .borrow_mut()
                .push_back(Ok((status, body.to_string())));
        }

        pub fn fail(&self, error: RemoteError) {
            self.responses.borrow_mut().push_back(Err(error));
        }

        pub fn request_count(&self) -> usize {
            self.requests.borrow().len()
        }
    }

    #[async_trait(?Send)]
    impl Transport for ScriptedTransport {
        async fn execute(&self, request: Request) -> Result<Response, RemoteError> {
            self.requests.borrow_mut().push(SentRequest {
                method: request.method().clone(),
                url: request.url().clone(),
                headers: request.headers().clone(),
                body: request
                    .body()
                    .and_then(|b| b.as_bytes())
                    .unwrap_or_default()
                    .to_vec(),
            });
            let (status, body) = self
                .responses
                .borrow_mut()
                .pop_front()
                .unwrap_or_else(|| Err(RemoteError::Network("no scripted response".to_string())))?;
            let response = http::Response::builder()
                .status(status)
                .body(body)
                .map_err(|e| RemoteError::Malformed(e.to_string()))?;
            Ok(Response::from(response))
        }
    }
}
