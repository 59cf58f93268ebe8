//! Build-time configuration
//!
//! AWS settings are baked in at compile time from the environment. Missing
//! values default to `us-east-1` and empty credentials; empty credentials make
//! every remote call fail fast so the game runs on LocalStorage alone.

use reqwest::Url;
use thiserror::Error;

/// DynamoDB table holding one save per user
pub const TABLE_NAME: &str = "NeonGenesisGameState";
/// S3 bucket serving game assets
pub const ASSET_BUCKET: &str = "neogenesis-assets";
/// User id the dashboard saves under
pub const USER_ID: &str = "current-user";
/// Autosave period (ms)
pub const AUTOSAVE_INTERVAL_MS: f64 = 60_000.0;
/// Region used when none is configured
pub const DEFAULT_REGION: &str = "us-east-1";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid AWS region: {0:?}")]
    InvalidRegion(String),
}

/// AWS access key pair
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Credentials {
    pub access_key_id: String,
    pub secret_access_key: String,
}

impl Credentials {
    pub fn new(access_key_id: impl Into<String>, secret_access_key: impl Into<String>) -> Self {
        Self {
            access_key_id: access_key_id.into(),
            secret_access_key: secret_access_key.into(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.access_key_id.is_empty() || self.secret_access_key.is_empty()
    }
}

// Never print the secret
impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("access_key_id", &self.access_key_id)
            .field("secret_access_key", &"<redacted>")
            .finish()
    }
}

/// Remote storage configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AwsConfig {
    pub region: String,
    pub credentials: Credentials,
}

impl Default for AwsConfig {
    fn default() -> Self {
        Self {
            region: DEFAULT_REGION.to_string(),
            credentials: Credentials::default(),
        }
    }
}

impl AwsConfig {
    /// Configuration compiled into this build
    pub fn from_build_env() -> Self {
        Self::from_values(
            option_env!("NEON_GENESIS_AWS_REGION"),
            option_env!("NEON_GENESIS_AWS_ACCESS_KEY_ID"),
            option_env!("NEON_GENESIS_AWS_SECRET_ACCESS_KEY"),
        )
    }

    /// Build from optional raw values, applying defaults for blanks
    pub fn from_values(
        region: Option<&str>,
        access_key_id: Option<&str>,
        secret_access_key: Option<&str>,
    ) -> Self {
        let region = region
            .map(str::trim)
            .filter(|r| !r.is_empty())
            .unwrap_or(DEFAULT_REGION);
        Self {
            region: region.to_string(),
            credentials: Credentials::new(
                access_key_id.unwrap_or_default().trim(),
                secret_access_key.unwrap_or_default().trim(),
            ),
        }
    }

    /// Region must be usable as a host name label, e.g. `eu-west-2`
    pub fn validate(&self) -> Result<(), ConfigError> {
        let ok = !self.region.is_empty()
            && self
                .region
                .chars()
                .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-');
        if ok {
            Ok(())
        } else {
            Err(ConfigError::InvalidRegion(self.region.clone()))
        }
    }

    /// DynamoDB API endpoint for the configured region
    pub fn dynamodb_endpoint(&self) -> Result<Url, ConfigError> {
        self.validate()?;
        Url::parse(&format!("https://dynamodb.{}.amazonaws.com/", self.region))
            .map_err(|_| ConfigError::InvalidRegion(self.region.clone()))
    }

    pub fn s3_host(&self, bucket: &str) -> String {
        format!("{}.s3.{}.amazonaws.com", bucket, self.region)
    }
}
