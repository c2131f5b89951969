//! # Unit
//!
//! Measurement units and their CloudWatch display names

use serde::{Deserialize, Serialize};

/// Unit a measurement is expressed in
///
/// The display name is appended to every metric name, the wire `Unit` field is left as `None`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Unit {
    #[default]
    None,
    Items,
    Calls,
    Commands,
    Errors,
    Events,
    Requests,
    Results,
    Threads,
    Percent,
    Bytes,
    Kilobytes,
    Megabytes,
    Gigabytes,
    Terabytes,
    Seconds,
    Milliseconds,
    Microseconds,
    Nanoseconds,
    BitsPerSecond,
    KilobitsPerSecond,
    MegabitsPerSecond,
    GigabitsPerSecond,
    TerabitsPerSecond,
    ItemsPerSecond,
}

impl Unit {
    /// Title cased name used as the metric name suffix, e.g. `Items`
    pub fn display_name(&self) -> &'static str {
        match self {
            Unit::None => "None",
            Unit::Items => "Items",
            Unit::Calls => "Calls",
            Unit::Commands => "Commands",
            Unit::Errors => "Errors",
            Unit::Events => "Events",
            Unit::Requests => "Requests",
            Unit::Results => "Results",
            Unit::Threads => "Threads",
            Unit::Percent => "Percent",
            Unit::Bytes => "Bytes",
            Unit::Kilobytes => "Kilobytes",
            Unit::Megabytes => "Megabytes",
            Unit::Gigabytes => "Gigabytes",
            Unit::Terabytes => "Terabytes",
            Unit::Seconds => "Seconds",
            Unit::Milliseconds => "Milliseconds",
            Unit::Microseconds => "Microseconds",
            Unit::Nanoseconds => "Nanoseconds",
            Unit::BitsPerSecond => "Bits/Second",
            Unit::KilobitsPerSecond => "Kilobits/Second",
            Unit::MegabitsPerSecond => "Megabits/Second",
            Unit::GigabitsPerSecond => "Gigabits/Second",
            Unit::TerabitsPerSecond => "Terabits/Second",
            Unit::ItemsPerSecond => "Items/Second",
        }
    }
}

impl std::fmt::Display for Unit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Convert a [metrics::Unit] so snapshots can be built from `metrics` descriptions
impl From<metrics::Unit> for Unit {
    fn from(unit: metrics::Unit) -> Self {
        match unit.as_str() {
            "count" => Unit::Items,
            "percent" => Unit::Percent,
            "seconds" => Unit::Seconds,
            "milliseconds" => Unit::Milliseconds,
            "microseconds" => Unit::Microseconds,
            "nanoseconds" => Unit::Nanoseconds,
            "tebibytes" => Unit::Terabytes,
            "gibibytes" => Unit::Gigabytes,
            "mebibytes" => Unit::Megabytes,
            "kibibytes" => Unit::Kilobytes,
            "bytes" => Unit::Bytes,
            "terabits_per_second" => Unit::TerabitsPerSecond,
            "gigabits_per_second" => Unit::GigabitsPerSecond,
            "megabits_per_second" => Unit::MegabitsPerSecond,
            "kilobits_per_second" => Unit::KilobitsPerSecond,
            "bits_per_second" => Unit::BitsPerSecond,
            "count_per_second" => Unit::ItemsPerSecond,
            _ => Unit::None,
        }
    }
}
