//! Period payload decoding and metric derivation
//!
//! The portal's period endpoint returns a JSON document with a selected
//! (current) and comparison (previous) window, each carrying per-category
//! sample arrays for consumption and cost. This module decodes that document
//! into a typed [`PeriodPayload`] and derives the flat per-period metric set
//! the host platform consumes.
//!
//! Derivation conventions that must match the portal's displayed values:
//! consumption sums round to 3 decimal digits, cost sums to 2, null samples
//! contribute zero, and the generation cost (negative upstream) is reported
//! as a positive magnitude.

use crate::error::{OutlookError, Result};
use serde::Deserialize;
use std::collections::BTreeMap;

/// A single metric value: numeric for readings, text for labels and messages
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
#[serde(untagged)]
pub enum MetricValue {
    Number(f64),
    Text(String),
}

impl MetricValue {
    /// Numeric value, if this metric is a number
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            MetricValue::Number(v) => Some(*v),
            MetricValue::Text(_) => None,
        }
    }

    /// Text value, if this metric is a string
    pub fn as_str(&self) -> Option<&str> {
        match self {
            MetricValue::Number(_) => None,
            MetricValue::Text(s) => Some(s.as_str()),
        }
    }

    /// Convert a passthrough JSON value, preserving its shape
    fn from_json(value: &serde_json::Value) -> Self {
        match value {
            serde_json::Value::Number(n) => match n.as_f64() {
                Some(v) => MetricValue::Number(v),
                // Unrepresentable numbers keep their literal text rather
                // than turning into NaN.
                None => MetricValue::Text(n.to_string()),
            },
            serde_json::Value::String(s) => MetricValue::Text(s.clone()),
            other => MetricValue::Text(other.to_string()),
        }
    }
}

impl From<f64> for MetricValue {
    fn from(value: f64) -> Self {
        MetricValue::Number(value)
    }
}

impl From<&str> for MetricValue {
    fn from(value: &str) -> Self {
        MetricValue::Text(value.to_string())
    }
}

impl From<String> for MetricValue {
    fn from(value: String) -> Self {
        MetricValue::Text(value)
    }
}

impl std::fmt::Display for MetricValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MetricValue::Number(v) => write!(f, "{v}"),
            MetricValue::Text(s) => write!(f, "{s}"),
        }
    }
}

/// Flat mapping of metric key to value; rebuilt wholesale on every refresh
pub type MetricSet = BTreeMap<String, MetricValue>;

/// Sum an array of nullable samples, rounding to `precision` decimal digits.
///
/// Null entries contribute zero and an empty array sums to `0.0`.
pub fn sum_samples(samples: &[Option<f64>], precision: u32) -> f64 {
    let total: f64 = samples.iter().flatten().sum();
    round_to(total, precision)
}

fn round_to(value: f64, precision: u32) -> f64 {
    let factor = 10f64.powi(precision as i32);
    (value * factor).round() / factor
}

/// One reporting window: the selected period or the comparison period
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PeriodWindow {
    pub net_consumption: f64,
    pub average_net_consumption_per_sub_period: f64,
    pub consumption_data: ConsumptionSeries,
    pub cost_data: CostSeries,
}

/// Per-category nullable consumption samples (kWh)
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConsumptionSeries {
    pub peak: Vec<Option<f64>>,
    pub offpeak: Vec<Option<f64>>,
    pub shoulder: Vec<Option<f64>>,
    pub controlled_load: Vec<Option<f64>>,
    pub generation: Vec<Option<f64>>,
    pub suburb_average: Vec<Option<f64>>,
}

/// Per-category nullable cost samples (dollars)
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CostSeries {
    pub peak: Vec<Option<f64>>,
    pub offpeak: Vec<Option<f64>>,
    pub shoulder: Vec<Option<f64>>,
    pub controlled_load: Vec<Option<f64>>,
    pub generation: Vec<Option<f64>>,
}

/// Comparison message attached to the cost difference
#[derive(Debug, Clone, Deserialize)]
pub struct DifferenceMessage {
    pub text: String,
    /// Upstream type is undocumented; observed as a short word but kept loose
    pub change: serde_json::Value,
}

/// The full period endpoint payload
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PeriodPayload {
    pub selected_period: PeriodWindow,
    pub comparison_period: PeriodWindow,
    pub cost_difference: f64,
    pub cost_difference_message: DifferenceMessage,
    pub kwh_percentage_difference: f64,
}

impl PeriodPayload {
    /// Decode a period payload, failing fast on any missing required key.
    pub fn decode(value: serde_json::Value) -> Result<Self> {
        serde_json::from_value(value)
            .map_err(|e| OutlookError::malformed_payload(format!("Period payload: {e}")))
    }

    /// Derive the flat metric set for this payload.
    ///
    /// `current` and `previous` are the key prefixes for the selected and
    /// comparison windows (e.g. `"yesterday"` / `"previous_day"`).
    pub fn metrics(&self, current: &str, previous: &str) -> MetricSet {
        let selected = &self.selected_period;
        let comparison = &self.comparison_period;

        let peak = sum_samples(&selected.consumption_data.peak, 3);
        let offpeak = sum_samples(&selected.consumption_data.offpeak, 3);
        let shoulder = sum_samples(&selected.consumption_data.shoulder, 3);
        let controlled_load = sum_samples(&selected.consumption_data.controlled_load, 3);
        let generation = sum_samples(&selected.consumption_data.generation, 3);
        let suburb_average = sum_samples(&selected.consumption_data.suburb_average, 3);

        let cost_peak = sum_samples(&selected.cost_data.peak, 2);
        let cost_offpeak = sum_samples(&selected.cost_data.offpeak, 2);
        let cost_shoulder = sum_samples(&selected.cost_data.shoulder, 2);
        let cost_controlled_load = sum_samples(&selected.cost_data.controlled_load, 2);
        let cost_generation = sum_samples(&selected.cost_data.generation, 2);

        let previous_peak = sum_samples(&comparison.consumption_data.peak, 3);
        let previous_offpeak = sum_samples(&comparison.consumption_data.offpeak, 3);
        let previous_shoulder = sum_samples(&comparison.consumption_data.shoulder, 3);
        let previous_controlled_load = sum_samples(&comparison.consumption_data.controlled_load, 3);
        let previous_generation = sum_samples(&comparison.consumption_data.generation, 3);

        // Net importers are consumers; exactly zero counts as a generator.
        let user_type = if selected.net_consumption > 0.0 {
            "consumer"
        } else {
            "generator"
        };

        let mut metrics = MetricSet::new();
        let mut put = |suffix: &str, value: MetricValue| {
            metrics.insert(format!("{current}_{suffix}"), value);
        };

        put("user_type", user_type.into());
        put("usage", selected.net_consumption.into());
        put(
            "average_net_usage_per_sub_period",
            selected.average_net_consumption_per_sub_period.into(),
        );
        put(
            "consumption",
            round_to(peak + offpeak + shoulder + controlled_load, 3).into(),
        );
        put("consumption_peak", peak.into());
        put("consumption_offpeak", offpeak.into());
        put("consumption_shoulder", shoulder.into());
        put("consumption_controlled_load", controlled_load.into());
        put("generation", generation.into());
        put(
            "cost_total",
            round_to(
                cost_peak + cost_offpeak + cost_shoulder + cost_controlled_load + cost_generation,
                2,
            )
            .into(),
        );
        put(
            "cost_consumption",
            round_to(
                cost_peak + cost_offpeak + cost_shoulder + cost_controlled_load,
                2,
            )
            .into(),
        );
        // Generation earnings arrive as a negative cost; report the magnitude.
        put("cost_generation", cost_generation.abs().into());
        put("suburb_average", suburb_average.into());
        put("cost_difference", self.cost_difference.into());
        put(
            "difference_message",
            self.cost_difference_message.text.as_str().into(),
        );
        put(
            "percentage_difference",
            self.kwh_percentage_difference.into(),
        );
        put(
            "consumption_difference",
            round_to(selected.net_consumption - comparison.net_consumption, 3).into(),
        );
        put(
            "consumption_change",
            MetricValue::from_json(&self.cost_difference_message.change),
        );

        // The previous window has no raw netConsumption-based usage figure
        // upstream; its usage nets generation out of the category sums.
        metrics.insert(
            format!("{previous}_usage"),
            round_to(
                previous_peak + previous_offpeak + previous_shoulder + previous_controlled_load
                    - previous_generation,
                3,
            )
            .into(),
        );
        metrics.insert(
            format!("{previous}_consumption"),
            round_to(
                previous_peak + previous_offpeak + previous_shoulder + previous_controlled_load,
                3,
            )
            .into(),
        );
        metrics.insert(format!("{previous}_generation"), previous_generation.into());

        metrics
    }
}
