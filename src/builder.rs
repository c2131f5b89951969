use super::error::ConfigError;
use super::options::{Credentials, Endpoint, MetricFilter, ReportingOptions};
use super::reporter::Reporter;
use super::transport::Transport;
use std::sync::Arc;
use std::time::Duration;

type Setup = Box<dyn FnOnce(&mut ReportingOptions)>;

/// Builder for the CloudWatch metrics [Reporter]
///
/// # Example
/// ```
///  let reporter = metrics_cloudwatch_reporter::Builder::new()
///      .cloudwatch_namespace("MyApplication")
///      .with_dimension("Function", "My_Function_Name")
///      .build(metrics_cloudwatch_reporter::WriterTransport::new(std::io::sink()))
///      .unwrap();
/// ```
#[derive(Default)]
pub struct Builder {
    cloudwatch_namespace: Option<String>,
    endpoint: Option<Endpoint>,
    credentials: Option<Credentials>,
    default_dimensions: Vec<(String, String)>,
    flush_interval: Option<Duration>,
    filter: Option<Arc<dyn MetricFilter>>,
    setup: Vec<Setup>,
}

impl Builder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the CloudWatch namespace for all metrics
    /// * Must be set and not blank or build() will return [ConfigError::InvalidConfiguration]
    pub fn cloudwatch_namespace(self, namespace: impl Into<String>) -> Self {
        Self {
            cloudwatch_namespace: Some(namespace.into()),
            ..self
        }
    }

    /// Adds a static dimension (name, value), that will be sent with each MetricDatum.
    /// * This method can be called multiple times with distinct names
    pub fn with_dimension(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.default_dimensions.push((name.into(), value.into()));
        self
    }

    /// Sends to the given region, `us-east-1` unless set
    pub fn region(mut self, region: impl Into<String>) -> Self {
        self.endpoint = Some(Endpoint::Region(region.into()));
        self
    }

    /// Sends to an explicit service URL instead of a region
    pub fn endpoint_url(mut self, url: impl Into<String>) -> Self {
        self.endpoint = Some(Endpoint::Url(url.into()));
        self
    }

    /// Static credentials, only used when both the key id and secret are non-empty
    pub fn credentials(mut self, access_key_id: impl Into<String>, secret_access_key: impl Into<String>) -> Self {
        self.credentials = Some(Credentials::new(access_key_id, secret_access_key));
        self
    }

    /// Interval between scheduled flushes, zero selects the default of 10 seconds
    pub fn flush_interval(mut self, interval: Duration) -> Self {
        self.flush_interval = Some(interval);
        self
    }

    /// Only report measurements accepted by `filter`
    pub fn filter(mut self, filter: impl MetricFilter + 'static) -> Self {
        self.filter = Some(Arc::new(filter));
        self
    }

    /// Adjust the options directly, runs after every other builder setting is applied
    pub fn configure(mut self, setup: impl FnOnce(&mut ReportingOptions) + 'static) -> Self {
        self.setup.push(Box::new(setup));
        self
    }

    /// Private helper for consuming the builder into reporter options
    fn build_options(self) -> Result<ReportingOptions, ConfigError> {
        let namespace = self.cloudwatch_namespace.ok_or_else(|| {
            ConfigError::InvalidConfiguration("cloudwatch_namespace missing".to_string())
        })?;
        let mut options = ReportingOptions::new(namespace)?;

        if let Some(endpoint) = self.endpoint {
            options.set_endpoint(endpoint);
        }
        if let Some(credentials) = self.credentials {
            options.set_credentials(credentials);
        }
        for (name, value) in self.default_dimensions {
            options.add_dimension(name, value);
        }
        if let Some(interval) = self.flush_interval {
            options.set_flush_interval(interval);
        }
        if let Some(filter) = self.filter {
            options.set_shared_filter(filter);
        }
        for setup in self.setup {
            setup(&mut options);
        }

        options.validate()?;
        Ok(options)
    }

    /// Build a reporter sending through `transport`
    pub fn build<T: Transport>(self, transport: T) -> Result<Reporter<T>, ConfigError> {
        self.build_with(|_, _| transport)
    }

    /// Build a reporter whose transport is created from the effective endpoint and credentials
    pub fn build_with<T, F>(self, connect: F) -> Result<Reporter<T>, ConfigError>
    where
        T: Transport,
        F: FnOnce(&Endpoint, Option<&Credentials>) -> T,
    {
        let options = self.build_options()?;
        let transport = connect(options.endpoint(), options.credentials());
        Ok(Reporter::new(options, transport))
    }
}
