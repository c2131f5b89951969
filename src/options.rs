//! # Options
//!
//! Reporter configuration, validated when constructed

use super::error::ConfigError;
use super::snapshot::MetricKind;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

/// Region used when none is configured
pub const DEFAULT_REGION: &str = "us-east-1";

/// Flush interval used when the configured interval is zero
pub const DEFAULT_FLUSH_INTERVAL: Duration = Duration::from_secs(10);

/// Static dimension attached to every datum
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dimension {
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Value")]
    pub value: String,
}

impl Dimension {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// Where PutMetricData requests are sent
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Endpoint {
    /// A region system name such as `eu-west-1`
    Region(String),
    /// An explicit service URL, e.g. a local CloudWatch emulator
    Url(String),
}

impl Endpoint {
    /// Effective service URL
    pub fn url(&self) -> String {
        match self {
            Endpoint::Region(region) => format!("https://monitoring.{region}.amazonaws.com"),
            Endpoint::Url(url) => url.clone(),
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        let (what, value) = match self {
            Endpoint::Region(region) => ("region", region),
            Endpoint::Url(url) => ("endpoint url", url),
        };
        if value.trim().is_empty() {
            return Err(ConfigError::InvalidConfiguration(format!("{what} must not be empty")));
        }
        Ok(())
    }
}

impl Default for Endpoint {
    fn default() -> Self {
        Endpoint::Region(DEFAULT_REGION.to_string())
    }
}

/// Static access key pair handed to the transport
#[derive(Clone, PartialEq, Eq)]
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

    fn is_complete(&self) -> bool {
        !self.access_key_id.is_empty() && !self.secret_access_key.is_empty()
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("access_key_id", &self.access_key_id)
            .field("secret_access_key", &"<redacted>")
            .finish()
    }
}

/// Predicate deciding which measurements are reported
///
/// Implemented for any `Fn(&str, MetricKind, &str) -> bool` taking (context, kind, name)
pub trait MetricFilter: Send + Sync {
    fn is_match(&self, context: &str, kind: MetricKind, name: &str) -> bool;
}

impl<F> MetricFilter for F
where
    F: Fn(&str, MetricKind, &str) -> bool + Send + Sync,
{
    fn is_match(&self, context: &str, kind: MetricKind, name: &str) -> bool {
        self(context, kind, name)
    }
}

/// Reporter configuration
///
/// The namespace is fixed at construction, the remaining fields may be adjusted before the
/// options are handed to a [Reporter](crate::Reporter)
#[derive(Clone)]
pub struct ReportingOptions {
    namespace: String,
    endpoint: Endpoint,
    credentials: Option<Credentials>,
    dimensions: Vec<Dimension>,
    flush_interval: Duration,
    filter: Option<Arc<dyn MetricFilter>>,
}

impl ReportingOptions {
    /// Fails with [ConfigError::InvalidConfiguration] if `namespace` is empty or whitespace
    pub fn new(namespace: impl Into<String>) -> Result<Self, ConfigError> {
        let namespace = namespace.into();
        if namespace.trim().is_empty() {
            return Err(ConfigError::InvalidConfiguration(
                "cloudwatch namespace must not be empty".to_string(),
            ));
        }

        Ok(Self {
            namespace,
            endpoint: Endpoint::default(),
            credentials: None,
            dimensions: Vec::new(),
            flush_interval: Duration::ZERO,
            filter: None,
        })
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    pub fn endpoint(&self) -> &Endpoint {
        &self.endpoint
    }

    /// Credentials, but only when both halves are present
    pub fn credentials(&self) -> Option<&Credentials> {
        self.credentials.as_ref().filter(|c| c.is_complete())
    }

    pub fn dimensions(&self) -> &[Dimension] {
        &self.dimensions
    }

    /// Configured interval, zero meaning [DEFAULT_FLUSH_INTERVAL]
    pub fn flush_interval(&self) -> Duration {
        self.flush_interval
    }

    /// Interval the scheduler should actually use
    pub fn effective_flush_interval(&self) -> Duration {
        if self.flush_interval.is_zero() {
            DEFAULT_FLUSH_INTERVAL
        } else {
            self.flush_interval
        }
    }

    pub fn filter(&self) -> Option<&dyn MetricFilter> {
        self.filter.as_deref()
    }

    pub fn set_endpoint(&mut self, endpoint: Endpoint) -> &mut Self {
        self.endpoint = endpoint;
        self
    }

    pub fn set_region(&mut self, region: impl Into<String>) -> &mut Self {
        self.set_endpoint(Endpoint::Region(region.into()))
    }

    pub fn set_credentials(&mut self, credentials: Credentials) -> &mut Self {
        self.credentials = Some(credentials);
        self
    }

    /// Adds a dimension sent with every datum, the order dimensions are added in is irrelevant
    pub fn add_dimension(&mut self, name: impl Into<String>, value: impl Into<String>) -> &mut Self {
        self.dimensions.push(Dimension::new(name, value));
        self
    }

    pub fn set_flush_interval(&mut self, interval: Duration) -> &mut Self {
        self.flush_interval = interval;
        self
    }

    pub fn set_filter(&mut self, filter: impl MetricFilter + 'static) -> &mut Self {
        self.set_shared_filter(Arc::new(filter))
    }

    pub(crate) fn set_shared_filter(&mut self, filter: Arc<dyn MetricFilter>) -> &mut Self {
        self.filter = Some(filter);
        self
    }

    /// Re-checks everything a mutation callback may have changed
    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        self.endpoint.validate()
    }
}

impl fmt::Debug for ReportingOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReportingOptions")
            .field("namespace", &self.namespace)
            .field("endpoint", &self.endpoint)
            .field("credentials", &self.credentials)
            .field("dimensions", &self.dimensions)
            .field("flush_interval", &self.flush_interval)
            .field("filter", &self.filter.is_some())
            .finish()
    }
}
