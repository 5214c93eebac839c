//! Client configuration.
//!
//! Settings are read from the environment:
//!
//! | Variable | Meaning | Default |
//! |---|---|---|
//! | `AWS_DYNAMODB_ENDPOINT_URL` | Custom endpoint, e.g. a local DynamoDB | none |
//! | `AWS_REGION` | Region | `us-east-1` |
//!
//! Credentials are resolved by the SDK default provider chain.

use aws_sdk_dynamodb::Client;

/// Environment variable holding a custom endpoint URL.
pub const ENDPOINT_URL_VARIABLE: &str = "AWS_DYNAMODB_ENDPOINT_URL";

/// Environment variable holding the region.
pub const REGION_VARIABLE: &str = "AWS_REGION";

/// Region used when none is configured.
pub const DEFAULT_REGION: &str = "us-east-1";

/// Attempts per request, the first one included.
pub const DEFAULT_MAX_ATTEMPTS: u32 = 2;

/// Settings used to build a DynamoDB client.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClientConfig {
    /// Custom endpoint URL, for local DynamoDB.
    pub endpoint_url: Option<String>,
    /// AWS region.
    pub region: String,
    /// Attempts per request, the first one included.
    pub max_attempts: u32,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            endpoint_url: None,
            region: DEFAULT_REGION.to_string(),
            max_attempts: DEFAULT_MAX_ATTEMPTS,
        }
    }
}

impl ClientConfig {
    /// Read the settings from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Read the settings through `lookup`. Blank values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let lookup = |name: &str| lookup(name).filter(|value: &String| !value.trim().is_empty());
        Self {
            endpoint_url: lookup(ENDPOINT_URL_VARIABLE),
            region: lookup(REGION_VARIABLE).unwrap_or_else(|| DEFAULT_REGION.to_string()),
            ..Default::default()
        }
    }

    /// Build a client from these settings.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(name = "dynamodb_console.connect")
    )]
    pub async fn connect(&self) -> Client {
        let retry_config =
            aws_config::retry::RetryConfig::standard().with_max_attempts(self.max_attempts);
        let mut loader = aws_config::defaults(aws_config::BehaviorVersion::latest())
            .region(aws_config::Region::new(self.region.clone()))
            .retry_config(retry_config);
        if let Some(endpoint_url) = &self.endpoint_url {
            loader = loader.endpoint_url(endpoint_url);
        }
        let sdk_config = loader.load().await;
        Client::new(&sdk_config)
    }
}
