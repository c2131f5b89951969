//! # Transport
//!
//! Outbound side of the reporter, one call per PutMetricData request

use super::error::Error;
use super::wire::PutMetricDataRequest;
use http::StatusCode;
use std::future::Future;
use std::io::Write;
use std::sync::Mutex;

/// Client bound to a CloudWatch endpoint
///
/// Signing and authentication belong to the implementation. A call is made exactly once per
/// batch, the reporter never retries
pub trait Transport: Send + Sync {
    fn put_metric_data(
        &self,
        request: &PutMetricDataRequest<'_>,
    ) -> impl Future<Output = Result<StatusCode, Error>> + Send;
}

/// Writes each request as a JSON line to an implementation of [std::io::Write]
///
/// Useful with a log shipper or for inspecting output locally
///
/// # Example
/// ```
/// let transport = metrics_cloudwatch_reporter::WriterTransport::new(std::io::stdout());
/// # let _ = transport;
/// ```
pub struct WriterTransport<W> {
    writer: Mutex<W>,
}

impl<W: Write + Send> WriterTransport<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer: Mutex::new(writer),
        }
    }

    /// Recover the writer, e.g. to inspect a buffer
    pub fn into_inner(self) -> W {
        self.writer.into_inner().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn write_request(&self, request: &PutMetricDataRequest<'_>) -> Result<(), Error> {
        let mut writer = self.writer.lock().map_err(|_| "writer lock poisoned")?;
        serde_json::to_writer(&mut *writer, request)?;
        writeln!(writer)?;
        writer.flush()?;
        Ok(())
    }
}

impl<W: Write + Send> Transport for WriterTransport<W> {
    fn put_metric_data(
        &self,
        request: &PutMetricDataRequest<'_>,
    ) -> impl Future<Output = Result<StatusCode, Error>> + Send {
        let result = self.write_request(request).map(|_| StatusCode::OK);
        std::future::ready(result)
    }
}
