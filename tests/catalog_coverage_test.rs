//! The catalog must cover exactly the keys one full fetch cycle emits:
//! 21 metrics per period granularity across three granularities plus the
//! eight tariff rates.

use jemena_outlook::catalog;
use jemena_outlook::period::{MetricSet, PeriodPayload};
use jemena_outlook::tariff::extract_tariffs;
use std::collections::BTreeSet;

fn period_payload() -> PeriodPayload {
    let value = serde_json::json!({
        "selectedPeriod": {
            "netConsumption": 4.2,
            "averageNetConsumptionPerSubPeriod": 0.175,
            "consumptionData": {
                "peak": [1.0], "offpeak": [1.0], "shoulder": [1.0],
                "controlledLoad": [1.0], "generation": [0.5], "suburbAverage": [4.0]
            },
            "costData": {
                "peak": [0.3], "offpeak": [0.2], "shoulder": [0.1],
                "controlledLoad": [0.05], "generation": [-0.1]
            }
        },
        "comparisonPeriod": {
            "netConsumption": 4.0,
            "averageNetConsumptionPerSubPeriod": 0.167,
            "consumptionData": {
                "peak": [1.0], "offpeak": [1.0], "shoulder": [1.0],
                "controlledLoad": [1.0], "generation": [0.5], "suburbAverage": [4.0]
            },
            "costData": {
                "peak": [], "offpeak": [], "shoulder": [],
                "controlledLoad": [], "generation": []
            }
        },
        "costDifference": 0.1,
        "costDifferenceMessage": { "text": "Your cost went up", "change": "up" },
        "kwhPercentageDifference": 5.0
    });
    PeriodPayload::decode(value).unwrap()
}

const TARIFF_PAGE: &str = r#"<html><script>var tariff = {
    "supplyCharge": "$1.10", "weekdayPeakCost": "$0.30",
    "weekdayOffpeakCost": "$0.15", "weekdayShoulderCost": "$0.22",
    "controlledLoadCost": "$0.18", "weekendOffpeakCost": "$0.16",
    "singleRateCost": "$0.28", "generationCost": "$0.07"};</script></html>"#;

#[test]
fn catalog_covers_exactly_the_emitted_keys() {
    let payload = period_payload();
    let mut data = MetricSet::new();
    data.extend(extract_tariffs(TARIFF_PAGE).unwrap());
    data.extend(payload.metrics("yesterday", "previous_day"));
    data.extend(payload.metrics("this_week", "last_week"));
    data.extend(payload.metrics("this_month", "last_month"));

    let emitted: BTreeSet<&str> = data.keys().map(String::as_str).collect();
    let cataloged: BTreeSet<&str> = catalog::keys().collect();

    let missing: Vec<_> = emitted.difference(&cataloged).collect();
    assert!(missing.is_empty(), "keys missing from catalog: {missing:?}");

    let stale: Vec<_> = cataloged.difference(&emitted).collect();
    assert!(stale.is_empty(), "catalog keys never emitted: {stale:?}");

    assert_eq!(emitted.len(), 71);
    assert_eq!(catalog::METRICS.len(), 71);
}

#[test]
fn period_key_namespaces_are_disjoint() {
    let payload = period_payload();
    let daily = payload.metrics("yesterday", "previous_day");
    let weekly = payload.metrics("this_week", "last_week");
    let monthly = payload.metrics("this_month", "last_month");

    let mut merged = MetricSet::new();
    merged.extend(daily.clone());
    merged.extend(weekly.clone());
    merged.extend(monthly.clone());
    assert_eq!(merged.len(), daily.len() + weekly.len() + monthly.len());
}

#[test]
fn every_catalog_entry_has_display_metadata() {
    for metric in catalog::METRICS {
        assert!(!metric.name.is_empty(), "{} has no name", metric.key);
        assert!(!metric.unit.is_empty(), "{} has no unit", metric.key);
        assert!(
            metric.icon.starts_with("mdi:"),
            "{} has a bad icon",
            metric.key
        );
    }
}
