//! # metrics_cloudwatch_reporter
//!
//! Reports metrics snapshots to CloudWatch through `PutMetricData` requests, batching datums
//! under the service's per-request limit.
//!
//! # Example
//! ```
//! # async fn demo() -> Result<(), metrics_cloudwatch_reporter::ConfigError> {
//! use metrics_cloudwatch_reporter::{Builder, WriterTransport};
//!
//! let reporter = Builder::new()
//!     .cloudwatch_namespace("MyApplication")
//!     .with_dimension("Service", "checkout")
//!     .build(WriterTransport::new(std::io::stdout()))?;
//! # let _ = reporter;
//! # Ok(())
//! # }
//! ```

pub use {
    builder::Builder,
    error::{ConfigError, Error},
    options::{Credentials, Dimension, Endpoint, MetricFilter, ReportingOptions},
    reporter::{Reporter, SendOutcome},
    snapshot::{ApdexValue, ContextSnapshot, HistogramValue, Measurement, MeterValue, MetricKind, MetricValue, MetricsSnapshot, TimerValue},
    transport::{Transport, WriterTransport},
    unit::Unit,
};

pub mod batch;
mod builder;
mod error;
mod options;
mod reporter;
pub mod schedule;
mod snapshot;
mod transport;
mod unit;
pub mod wire;
#[cfg(test)]
mod test;
