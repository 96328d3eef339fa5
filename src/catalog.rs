//! Static metric catalog
//!
//! Every key the client can emit, with the display metadata the host
//! monitoring platform needs to register a readable value: human name,
//! unit, icon, and optional state/device classes. The catalog is the full
//! key namespace: 21 metrics per period granularity across three
//! granularities, plus the eight tariff rates.

/// Unit of a catalog entry
pub mod unit {
    pub const KILOWATT_HOUR: &str = "kWh";
    pub const DOLLAR: &str = "$";
    pub const PERCENT: &str = "%";
    pub const TEXT: &str = "text";
    pub const USER_TYPE: &str = "type";
}

/// How the host platform should accumulate a metric
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StateClass {
    Total,
    Measurement,
}

/// Host-platform device class for a metric
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeviceClass {
    Energy,
    Monetary,
}

/// Display metadata for one metric key
#[derive(Debug, Clone, Copy)]
pub struct MetricInfo {
    pub key: &'static str,
    pub name: &'static str,
    pub unit: &'static str,
    pub icon: &'static str,
    pub state_class: Option<StateClass>,
    pub device_class: Option<DeviceClass>,
}

const fn energy(
    key: &'static str,
    name: &'static str,
    state_class: Option<StateClass>,
) -> MetricInfo {
    MetricInfo {
        key,
        name,
        unit: unit::KILOWATT_HOUR,
        icon: "mdi:flash",
        state_class,
        device_class: Some(DeviceClass::Energy),
    }
}

const fn cost(key: &'static str, name: &'static str, state_class: Option<StateClass>) -> MetricInfo {
    MetricInfo {
        key,
        name,
        unit: unit::DOLLAR,
        icon: "mdi:currency-usd",
        state_class,
        device_class: Some(DeviceClass::Monetary),
    }
}

const fn info(
    key: &'static str,
    name: &'static str,
    unit: &'static str,
    icon: &'static str,
) -> MetricInfo {
    MetricInfo {
        key,
        name,
        unit,
        icon,
        state_class: None,
        device_class: None,
    }
}

use StateClass::{Measurement, Total};

/// The full metric catalog
pub const METRICS: &[MetricInfo] = &[
    // Yesterday (daily selected period)
    info("yesterday_user_type", "Yesterday user type", unit::USER_TYPE, "mdi:home-account"),
    energy("yesterday_usage", "Yesterday usage", Some(Total)),
    energy(
        "yesterday_average_net_usage_per_sub_period",
        "Yesterday average net usage per sub period",
        None,
    ),
    energy("yesterday_consumption", "Yesterday consumption", Some(Total)),
    energy("yesterday_consumption_peak", "Yesterday consumption peak", None),
    energy("yesterday_consumption_offpeak", "Yesterday consumption offpeak", None),
    energy("yesterday_consumption_shoulder", "Yesterday consumption shoulder", None),
    energy(
        "yesterday_consumption_controlled_load",
        "Yesterday consumption controlled load",
        None,
    ),
    energy("yesterday_generation", "Yesterday generation", None),
    cost("yesterday_cost_total", "Yesterday cost total", None),
    cost("yesterday_cost_consumption", "Yesterday cost consumption", None),
    cost("yesterday_cost_generation", "Yesterday cost generation", None),
    cost("yesterday_cost_difference", "Yesterday cost difference", None),
    info(
        "yesterday_percentage_difference",
        "Yesterday percentage difference",
        unit::PERCENT,
        "mdi:percent",
    ),
    info(
        "yesterday_difference_message",
        "Yesterday difference message",
        unit::TEXT,
        "mdi:clipboard-text",
    ),
    energy("yesterday_consumption_difference", "Yesterday consumption difference", None),
    info(
        "yesterday_consumption_change",
        "Yesterday consumption change",
        unit::TEXT,
        "mdi:swap-vertical",
    ),
    energy("yesterday_suburb_average", "Yesterday suburb average", None),
    // Previous day (daily comparison period)
    energy("previous_day_usage", "Previous day usage", None),
    energy("previous_day_consumption", "Previous day consumption", None),
    energy("previous_day_generation", "Previous day generation", None),
    // This week (weekly selected period)
    info("this_week_user_type", "This week user type", unit::USER_TYPE, "mdi:home-account"),
    energy("this_week_usage", "This week usage", Some(Total)),
    energy(
        "this_week_average_net_usage_per_sub_period",
        "This week average net usage per sub period",
        None,
    ),
    energy("this_week_consumption", "This week consumption", Some(Total)),
    energy("this_week_consumption_peak", "This week consumption peak", None),
    energy("this_week_consumption_offpeak", "This week consumption offpeak", None),
    energy("this_week_consumption_shoulder", "This week consumption shoulder", None),
    energy(
        "this_week_consumption_controlled_load",
        "This week consumption controlled load",
        None,
    ),
    energy("this_week_generation", "This week generation", Some(Total)),
    cost("this_week_cost_total", "This week cost total", Some(Total)),
    cost("this_week_cost_consumption", "This week cost consumption", Some(Total)),
    cost("this_week_cost_generation", "This week cost generation", None),
    cost("this_week_cost_difference", "This week cost difference", None),
    info(
        "this_week_percentage_difference",
        "This week percentage difference",
        unit::PERCENT,
        "mdi:percent",
    ),
    info(
        "this_week_difference_message",
        "This week difference message",
        unit::TEXT,
        "mdi:clipboard-text",
    ),
    energy("this_week_consumption_difference", "This week consumption difference", None),
    info(
        "this_week_consumption_change",
        "This week consumption change",
        unit::TEXT,
        "mdi:swap-vertical",
    ),
    energy("this_week_suburb_average", "This week suburb average", Some(Measurement)),
    // Last week (weekly comparison period)
    energy("last_week_usage", "Last week usage", Some(Total)),
    energy("last_week_consumption", "Last week consumption", Some(Total)),
    energy("last_week_generation", "Last week generation", Some(Total)),
    // This month (monthly selected period)
    info("this_month_user_type", "This month user type", unit::USER_TYPE, "mdi:home-account"),
    energy("this_month_usage", "This month usage", Some(Total)),
    energy(
        "this_month_average_net_usage_per_sub_period",
        "This month average net usage per sub period",
        None,
    ),
    energy("this_month_consumption", "This month consumption", Some(Total)),
    energy("this_month_consumption_peak", "This month consumption peak", Some(Total)),
    energy("this_month_consumption_offpeak", "This month consumption offpeak", None),
    energy("this_month_consumption_shoulder", "This month consumption shoulder", None),
    energy(
        "this_month_consumption_controlled_load",
        "This month consumption controlled load",
        None,
    ),
    energy("this_month_generation", "This month generation", Some(Total)),
    cost("this_month_cost_total", "This month cost total", Some(Total)),
    cost("this_month_cost_consumption", "This month cost consumption", Some(Total)),
    cost("this_month_cost_generation", "This month cost generation", Some(Total)),
    cost("this_month_cost_difference", "This month cost difference", None),
    info(
        "this_month_percentage_difference",
        "This month percentage difference",
        unit::PERCENT,
        "mdi:percent",
    ),
    info(
        "this_month_difference_message",
        "This month difference message",
        unit::TEXT,
        "mdi:clipboard-text",
    ),
    energy("this_month_consumption_difference", "This month consumption difference", None),
    info(
        "this_month_consumption_change",
        "This month consumption change",
        unit::TEXT,
        "mdi:swap-vertical",
    ),
    energy("this_month_suburb_average", "This month suburb average", Some(Measurement)),
    // Last month (monthly comparison period)
    energy("last_month_usage", "Last month usage", Some(Total)),
    energy("last_month_consumption", "Last month consumption", Some(Total)),
    energy("last_month_generation", "Last month generation", Some(Total)),
    // Tariff rates
    cost("supply_charge", "Supply charge", None),
    cost("weekday_peak_cost", "Weekday peak cost", None),
    cost("weekday_offpeak_cost", "Weekday offpeak cost", None),
    cost("weekday_shoulder_cost", "Weekday shoulder cost", None),
    cost("controlled_load_cost", "Controlled load cost", None),
    cost("weekend_offpeak_cost", "Weekend offpeak cost", None),
    cost("single_rate_cost", "Single rate cost", None),
    cost("generation_cost", "Generation cost", None),
];

/// Look up display metadata for a metric key.
pub fn find(key: &str) -> Option<&'static MetricInfo> {
    METRICS.iter().find(|m| m.key == key)
}

/// All recognized metric keys.
pub fn keys() -> impl Iterator<Item = &'static str> {
    METRICS.iter().map(|m| m.key)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_by_key() {
        let metric = find("yesterday_usage").unwrap();
        assert_eq!(metric.unit, unit::KILOWATT_HOUR);
        assert_eq!(metric.state_class, Some(StateClass::Total));
        assert!(find("no_such_metric").is_none());
    }

    #[test]
    fn keys_are_unique() {
        let mut seen = std::collections::BTreeSet::new();
        for key in keys() {
            assert!(seen.insert(key), "duplicate catalog key {key}");
        }
    }
}
