//! # Wire
//!
//! Serde shapes of the CloudWatch PutMetricData request
//!
//! <https://docs.aws.amazon.com/AmazonCloudWatch/latest/APIReference/API_PutMetricData.html>

use super::options::Dimension;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

#[derive(Debug, Serialize)]
pub struct PutMetricDataRequest<'a> {
    #[serde(rename = "Namespace")]
    pub namespace: &'a str,
    #[serde(rename = "MetricData")]
    pub metric_data: &'a [MetricDatum],
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricDatum {
    /// `[context] name-Unit`
    #[serde(rename = "MetricName")]
    pub metric_name: String,
    // One allocation shared by every datum of a flush
    #[serde(rename = "Dimensions")]
    pub dimensions: Arc<[Dimension]>,
    /// Milliseconds since the unix epoch
    #[serde(rename = "Timestamp")]
    pub timestamp: u64,
    #[serde(rename = "Unit")]
    pub unit: StandardUnit,
    #[serde(rename = "Value")]
    pub value: f64,
}

/// Wire unit of a datum
///
/// Units travel in the metric name, so only the placeholder is ever sent
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum StandardUnit {
    #[default]
    None,
}
