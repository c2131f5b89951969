//! # Snapshot
//!
//! Read-only capture of metric values produced by the metrics collection subsystem

use super::unit::Unit;
use serde::{Deserialize, Serialize};

/// Timestamped tree of contexts, each holding its measurements grouped by kind
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MetricsSnapshot {
    /// Milliseconds since the unix epoch, shared by every datum of a flush
    pub timestamp: u64,
    #[serde(default)]
    pub contexts: Vec<ContextSnapshot>,
}

impl MetricsSnapshot {
    pub fn new(timestamp: u64) -> Self {
        Self {
            timestamp,
            contexts: Vec::new(),
        }
    }

    pub fn with_context(mut self, context: ContextSnapshot) -> Self {
        self.contexts.push(context);
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContextSnapshot {
    pub name: String,
    pub apdex_scores: Vec<MetricValue<ApdexValue>>,
    pub counters: Vec<MetricValue<u64>>,
    pub gauges: Vec<MetricValue<f64>>,
    pub meters: Vec<MetricValue<MeterValue>>,
    pub timers: Vec<MetricValue<TimerValue>>,
}

/// A named, unit tagged value of one metric kind
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricValue<T> {
    pub name: String,
    #[serde(default)]
    pub unit: Unit,
    pub value: T,
}

impl<T> MetricValue<T> {
    pub fn new(name: impl Into<String>, unit: Unit, value: T) -> Self {
        Self {
            name: name.into(),
            unit,
            value,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ApdexValue {
    pub score: f64,
    #[serde(default)]
    pub satisfied: u64,
    #[serde(default)]
    pub tolerating: u64,
    #[serde(default)]
    pub frustrating: u64,
    #[serde(default)]
    pub sample_size: u64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct MeterValue {
    pub count: u64,
    #[serde(default)]
    pub mean_rate: f64,
    #[serde(default)]
    pub one_minute_rate: f64,
    #[serde(default)]
    pub five_minute_rate: f64,
    #[serde(default)]
    pub fifteen_minute_rate: f64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct TimerValue {
    pub count: u64,
    pub histogram: HistogramValue,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HistogramValue {
    pub count: u64,
    pub min: f64,
    pub max: f64,
    pub mean: f64,
    pub median: f64,
    pub percentile_95: f64,
    pub percentile_99: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MetricKind {
    Apdex,
    Counter,
    Gauge,
    Meter,
    Timer,
}

/// One measurement reduced to the scalar that gets reported
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Measurement<'a> {
    pub kind: MetricKind,
    pub name: &'a str,
    pub unit: Unit,
    pub value: f64,
}

impl ContextSnapshot {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn with_apdex(mut self, name: impl Into<String>, unit: Unit, value: ApdexValue) -> Self {
        self.apdex_scores.push(MetricValue::new(name, unit, value));
        self
    }

    pub fn with_counter(mut self, name: impl Into<String>, unit: Unit, count: u64) -> Self {
        self.counters.push(MetricValue::new(name, unit, count));
        self
    }

    pub fn with_gauge(mut self, name: impl Into<String>, unit: Unit, value: f64) -> Self {
        self.gauges.push(MetricValue::new(name, unit, value));
        self
    }

    pub fn with_meter(mut self, name: impl Into<String>, unit: Unit, value: MeterValue) -> Self {
        self.meters.push(MetricValue::new(name, unit, value));
        self
    }

    pub fn with_timer(mut self, name: impl Into<String>, unit: Unit, value: TimerValue) -> Self {
        self.timers.push(MetricValue::new(name, unit, value));
        self
    }

    /// Iterate every measurement in reporting order: apdex, counters, gauges, meters then timers
    ///
    /// Apdex reports its score, counters and meters their count, gauges their value and timers
    /// their histogram mean
    pub fn measurements(&self) -> impl Iterator<Item = Measurement<'_>> {
        fn reduce<T>(
            kind: MetricKind,
            items: &[MetricValue<T>],
            scalar: fn(&T) -> f64,
        ) -> impl Iterator<Item = Measurement<'_>> {
            items.iter().map(move |item| Measurement {
                kind,
                name: &item.name,
                unit: item.unit,
                value: scalar(&item.value),
            })
        }

        reduce(MetricKind::Apdex, &self.apdex_scores, |apdex| apdex.score)
            .chain(reduce(MetricKind::Counter, &self.counters, |count| *count as f64))
            .chain(reduce(MetricKind::Gauge, &self.gauges, |value| *value))
            .chain(reduce(MetricKind::Meter, &self.meters, |meter| meter.count as f64))
            .chain(reduce(MetricKind::Timer, &self.timers, |timer| timer.histogram.mean))
    }
}
