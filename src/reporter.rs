//! # Reporter
//!
//! Walks a [MetricsSnapshot], batches datums and dispatches each batch to a [Transport]

use super::batch::PendingBatch;
use super::error::Error;
use super::options::{Dimension, ReportingOptions};
use super::snapshot::{Measurement, MetricsSnapshot};
use super::transport::Transport;
use super::unit::Unit;
use super::wire::{MetricDatum, PutMetricDataRequest, StandardUnit};
use futures::future::{self, Either};
use http::StatusCode;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tracing::{info, trace, warn};

/// Result of a single send attempt
#[derive(Debug)]
pub enum SendOutcome {
    /// The service answered with a success status
    Accepted,
    /// The service answered with any other status
    Rejected(StatusCode),
    /// The transport failed before a status was received
    Failed(Error),
    /// The cancellation signal fired while the request was in flight
    Cancelled,
}

impl SendOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, SendOutcome::Accepted)
    }
}

/// CloudWatch PutMetricData reporter
///
/// Use [Builder](super::Builder) to construct
///
/// A reporter holds no per-flush state, every call to [Reporter::flush] builds its own batch.
/// Callers are expected to run one flush at a time, as [schedule::run](crate::schedule::run) does
pub struct Reporter<T> {
    options: ReportingOptions,
    dimensions: Arc<[Dimension]>,
    transport: T,
}

impl<T: Transport> Reporter<T> {
    pub fn new(options: ReportingOptions, transport: T) -> Self {
        let dimensions = options.dimensions().into();
        let reporter = Self {
            options,
            dimensions,
            transport,
        };

        info!(
            "Using Metrics Reporter {reporter}. FlushInterval: {:?}",
            reporter.flush_interval()
        );

        reporter
    }

    pub fn options(&self) -> &ReportingOptions {
        &self.options
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Interval between scheduled flushes, substituting the default for zero
    pub fn flush_interval(&self) -> Duration {
        self.options.effective_flush_interval()
    }

    /// Report every measurement in `snapshot`
    ///
    /// Returns false as soon as a send fails, measurements after that point are not reported.
    /// `cancel` flipping to true aborts the request in flight
    pub async fn flush(&self, snapshot: &MetricsSnapshot, cancel: &watch::Receiver<bool>) -> bool {
        trace!("Flushing metrics snapshot");

        let mut batch = PendingBatch::new();

        for context in &snapshot.contexts {
            for measurement in context.measurements() {
                if !self.is_reported(&context.name, &measurement) {
                    continue;
                }

                let name = format!("[{}] {}", context.name, measurement.name);
                let added = self
                    .add_measurement(&mut batch, &name, measurement.unit, snapshot.timestamp, measurement.value, cancel)
                    .await;
                if !added {
                    return false;
                }
            }
        }

        // Nothing left over, avoid an empty request
        if batch.is_empty() {
            return true;
        }

        self.send(&mut batch, cancel).await.is_success()
    }

    fn is_reported(&self, context: &str, measurement: &Measurement<'_>) -> bool {
        match self.options.filter() {
            Some(filter) => filter.is_match(context, measurement.kind, measurement.name),
            None => true,
        }
    }

    /// Append one datum to `batch`, sending the batch once it is full
    ///
    /// NaN and infinite values can't be represented by CloudWatch and are skipped. Returns false
    /// only when a triggered send fails
    pub async fn add_measurement(
        &self,
        batch: &mut PendingBatch,
        name: &str,
        unit: Unit,
        timestamp: u64,
        value: f64,
        cancel: &watch::Receiver<bool>,
    ) -> bool {
        if !value.is_finite() {
            return true;
        }

        let full = batch.push(MetricDatum {
            metric_name: format!("{name}-{}", unit.display_name()),
            dimensions: self.dimensions.clone(),
            timestamp,
            unit: StandardUnit::None,
            value,
        });

        if full {
            return self.send(batch, cancel).await.is_success();
        }

        true
    }

    /// Send `batch` as a single request, the batch is empty afterwards whatever the outcome
    pub async fn send(&self, batch: &mut PendingBatch, cancel: &watch::Receiver<bool>) -> SendOutcome {
        let request = PutMetricDataRequest {
            namespace: self.options.namespace(),
            metric_data: batch.datums(),
        };

        let outcome = {
            let call = std::pin::pin!(self.transport.put_metric_data(&request));
            let cancelled = std::pin::pin!(cancelled(cancel.clone()));

            match future::select(call, cancelled).await {
                Either::Left((Ok(status), _)) if status.is_success() => SendOutcome::Accepted,
                Either::Left((Ok(status), _)) => {
                    warn!("CloudWatch returned error code {status}");
                    SendOutcome::Rejected(status)
                }
                Either::Left((Err(error), _)) => {
                    warn!(%error, "CloudWatch error");
                    SendOutcome::Failed(error)
                }
                Either::Right(_) => {
                    warn!(datums = batch.len(), "CloudWatch request cancelled");
                    SendOutcome::Cancelled
                }
            }
        };

        batch.clear();
        outcome
    }
}

impl<T> fmt::Display for Reporter<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CloudWatchReporter({})", self.options.namespace())
    }
}

/// Resolves once the signal reads true, never if the sender is dropped first
async fn cancelled(mut signal: watch::Receiver<bool>) {
    loop {
        if *signal.borrow_and_update() {
            return;
        }
        if signal.changed().await.is_err() {
            future::pending::<()>().await;
        }
    }
}
