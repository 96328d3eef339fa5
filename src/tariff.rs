//! Tariff extraction from the electricity view page
//!
//! Tariff rates are not served by any JSON endpoint; the portal inlines them
//! as a `var tariff = {...};` script variable on `/electricityView/index`,
//! and only when the user has set their tariffs up. The brittle text match
//! lives behind this module's interface so it can be swapped if the upstream
//! markup changes.

use crate::currency::parse_dollars;
use crate::error::{OutlookError, Result};
use crate::period::{MetricSet, MetricValue};
use once_cell::sync::Lazy;
use regex::Regex;
use scraper::{Html, Selector};

/// Known rate-plan keys: upstream camelCase name and the metric key it maps to
const TARIFF_KEYS: &[(&str, &str)] = &[
    ("supplyCharge", "supply_charge"),
    ("weekdayPeakCost", "weekday_peak_cost"),
    ("weekdayOffpeakCost", "weekday_offpeak_cost"),
    ("weekdayShoulderCost", "weekday_shoulder_cost"),
    ("controlledLoadCost", "controlled_load_cost"),
    ("weekendOffpeakCost", "weekend_offpeak_cost"),
    ("singleRateCost", "single_rate_cost"),
    ("generationCost", "generation_cost"),
];

// The assignment may span multiple lines; capture the object literal only.
static TARIFF_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?s)var\s+tariff\s*=\s*(\{.*?\})\s*;")
        .unwrap_or_else(|e| unreachable!("invalid tariff pattern: {e}"))
});

/// Extract the tariff schedule from the electricity view page.
///
/// Returns an empty mapping when no tariff script is present; tariff setup
/// is optional on the portal side and its absence is not an error. A present
/// but malformed blob, or one missing a known rate key, is a [`ParseError`].
///
/// [`ParseError`]: OutlookError::Parse
pub fn extract_tariffs(html: &str) -> Result<MetricSet> {
    let Some(blob) = find_tariff_blob(html) else {
        return Ok(MetricSet::new());
    };

    let data: serde_json::Value = serde_json::from_str(&blob)
        .map_err(|e| OutlookError::parse(format!("Tariff blob is not valid JSON: {e}")))?;

    let mut tariffs = MetricSet::new();
    for (upstream, key) in TARIFF_KEYS {
        let value = data
            .get(upstream)
            .ok_or_else(|| OutlookError::parse(format!("Tariff key {upstream} has no value")))?;
        let dollars = match value {
            serde_json::Value::String(s) => parse_dollars(s)?,
            serde_json::Value::Number(n) => n.as_f64().ok_or_else(|| {
                OutlookError::parse(format!("Tariff key {upstream} is not a representable number"))
            })?,
            other => {
                return Err(OutlookError::parse(format!(
                    "Tariff key {upstream} has unexpected value {other}"
                )));
            }
        };
        tariffs.insert((*key).to_string(), MetricValue::Number(dollars));
    }
    Ok(tariffs)
}

/// Locate the script element carrying the tariff assignment and capture the
/// object-literal text.
fn find_tariff_blob(html: &str) -> Option<String> {
    let document = Html::parse_document(html);
    let selector = Selector::parse("script").ok()?;
    for script in document.select(&selector) {
        let text: String = script.text().collect();
        if let Some(captures) = TARIFF_PATTERN.captures(&text) {
            return Some(captures[1].to_string());
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    const TARIFF_PAGE: &str = r#"
        <html><head>
        <script type="text/javascript">
            var somethingElse = 1;
            var tariff = {
                "supplyCharge": "$1.10",
                "weekdayPeakCost": "$0.30",
                "weekdayOffpeakCost": "$0.15",
                "weekdayShoulderCost": "$0.22",
                "controlledLoadCost": "$0.18",
                "weekendOffpeakCost": "$0.16",
                "singleRateCost": "$0.28",
                "generationCost": "$0.07"
            };
        </script>
        </head><body><p>usage</p></body></html>
    "#;

    #[test]
    fn extracts_all_known_keys() {
        let tariffs = extract_tariffs(TARIFF_PAGE).unwrap();
        assert_eq!(tariffs.len(), 8);
        assert_eq!(tariffs["supply_charge"].as_f64(), Some(1.10));
        assert_eq!(tariffs["weekday_peak_cost"].as_f64(), Some(0.30));
        assert_eq!(tariffs["generation_cost"].as_f64(), Some(0.07));
    }

    #[test]
    fn missing_script_is_not_an_error() {
        let tariffs = extract_tariffs("<html><body>No tariffs here</body></html>").unwrap();
        assert!(tariffs.is_empty());
    }

    #[test]
    fn unrelated_scripts_are_ignored() {
        let page = "<html><script>var other = {\"a\": 1};</script></html>";
        let tariffs = extract_tariffs(page).unwrap();
        assert!(tariffs.is_empty());
    }

    #[test]
    fn malformed_blob_is_a_parse_error() {
        let page = "<html><script>var tariff = {not json};</script></html>";
        let err = extract_tariffs(page).unwrap_err();
        assert!(matches!(err, OutlookError::Parse { .. }));
    }

    #[test]
    fn missing_known_key_is_a_parse_error() {
        let page = r#"<html><script>var tariff = {"supplyCharge": "$1.10"};</script></html>"#;
        let err = extract_tariffs(page).unwrap_err();
        assert!(matches!(err, OutlookError::Parse { .. }));
    }

    #[test]
    fn numeric_values_are_accepted() {
        let page = r#"<html><script>var tariff = {
            "supplyCharge": 1.10, "weekdayPeakCost": 0.30,
            "weekdayOffpeakCost": 0.15, "weekdayShoulderCost": 0.22,
            "controlledLoadCost": 0.18, "weekendOffpeakCost": 0.16,
            "singleRateCost": 0.28, "generationCost": 0.07};</script></html>"#;
        let tariffs = extract_tariffs(page).unwrap();
        assert_eq!(tariffs["supply_charge"].as_f64(), Some(1.10));
        assert!(
            tariffs
                .values()
                .all(|v| v.as_f64().is_some_and(f64::is_finite))
        );
    }
}
