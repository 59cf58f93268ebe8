//! Asset fetching from S3 with a local-path fallback

use std::rc::Rc;

use reqwest::{Method, Request};

use super::sigv4::{self, SigningParams, uri_encode};
use super::{RemoteError, Transport, https_url};
use crate::config::{ASSET_BUCKET, AwsConfig};
use crate::platform::now_ms;

const SERVICE: &str = "s3";

/// What an asset lookup produced
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssetPayload {
    /// Object contents fetched from the bucket
    Bytes(Vec<u8>),
    /// Path to the locally bundled copy, e.g. `/assets/logo.png`
    LocalPath(String),
}

impl AssetPayload {
    pub fn local(key: &str) -> Self {
        AssetPayload::LocalPath(format!("/assets/{}", key))
    }

    pub fn is_remote(&self) -> bool {
        matches!(self, AssetPayload::Bytes(_))
    }
}

/// Asset source: the S3 bucket when available, bundled files otherwise
pub struct AssetStore {
    transport: Option<Rc<dyn Transport>>,
    config: AwsConfig,
    bucket: String,
    clock: fn() -> f64,
}

impl AssetStore {
    pub fn new(transport: Rc<dyn Transport>, config: AwsConfig) -> Self {
        let transport = match config.validate() {
            Ok(()) => Some(transport),
            Err(e) => {
                log::warn!("S3 unavailable ({}), serving bundled assets", e);
                None
            }
        };
        Self {
            transport,
            config,
            bucket: ASSET_BUCKET.to_string(),
            clock: now_ms,
        }
    }

    /// Store that always answers with bundled asset paths
    pub fn local_only() -> Self {
        Self {
            transport: None,
            config: AwsConfig::default(),
            bucket: ASSET_BUCKET.to_string(),
            clock: now_ms,
        }
    }

    pub fn with_clock(mut self, clock: fn() -> f64) -> Self {
        self.clock = clock;
        self
    }

    /// Fetch an asset. Any failure degrades to the bundled path.
    pub async fn get_asset(&self, key: &str) -> AssetPayload {
        let Some(transport) = &self.transport else {
            return AssetPayload::local(key);
        };
        match self.fetch_object(transport.as_ref(), key).await {
            Ok(bytes) => AssetPayload::Bytes(bytes),
            Err(e) => {
                log::warn!("Falling back to local assets for {}: {}", key, e);
                AssetPayload::local(key)
            }
        }
    }

    async fn fetch_object(&self, transport: &dyn Transport, key: &str) -> Result<Vec<u8>, RemoteError> {
        let path = format!("/{}", uri_encode(key.trim_start_matches('/'), false));
        let url = https_url(&self.config.s3_host(&self.bucket), &path)?;
        let mut request = Request::new(Method::GET, url);
        sigv4::sign(
            &mut request,
            &SigningParams {
                credentials: &self.config.credentials,
                region: &self.config.region,
                service: SERVICE,
                timestamp_ms: (self.clock)(),
            },
        )?;

        let response = transport.execute(request).await?;
        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(RemoteError::Http {
                status: status.as_u16(),
                message,
            });
        }
        response
            .bytes()
            .await
            .map(|bytes| bytes.to_vec())
            .map_err(|e| RemoteError::Network(e.to_string()))
    }
}
