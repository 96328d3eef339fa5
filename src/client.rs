//! Outlook portal client
//!
//! Orchestrates one full refresh cycle against the Electricity Outlook
//! portal: open a fresh session, log in, pull tariffs from the electricity
//! view page, pull the daily/weekly/monthly period payloads, and merge
//! everything into a single flat metric set.

use crate::cache::MetricsSource;
use crate::config::PortalConfig;
use crate::error::Result;
use crate::logging::get_logger;
use crate::period::{MetricSet, PeriodPayload};
use crate::session::PortalSession;
use crate::tariff::extract_tariffs;
use async_trait::async_trait;
use std::time::Duration;

/// Path of the page carrying the embedded tariff script
const ELECTRICITY_VIEW_PATH: &str = "/electricityView/index";

/// Period endpoints fetched each cycle: granularity, periods-ago offset,
/// and the current/previous metric key prefixes.
const PERIOD_FETCHES: &[(&str, u32, &str, &str)] = &[
    ("day", 1, "yesterday", "previous_day"),
    ("week", 0, "this_week", "last_week"),
    ("month", 0, "this_month", "last_month"),
];

/// Client for the Electricity Outlook portal
pub struct OutlookClient {
    username: String,
    password: String,
    base_url: String,
    timeout: Duration,
    logger: crate::logging::StructuredLogger,
}

impl OutlookClient {
    /// Create a client from portal configuration.
    pub fn new(config: &PortalConfig) -> Self {
        Self {
            username: config.username.clone(),
            password: config.password.clone(),
            base_url: config.base_url.clone(),
            timeout: Duration::from_secs(config.timeout_seconds),
            logger: get_logger("client"),
        }
    }

    /// Run one full refresh cycle and return the merged metric set.
    ///
    /// Each cycle uses a fresh session; cookies never survive across
    /// refreshes. Any step's failure aborts the whole cycle and leaves the
    /// caller's cached data untouched.
    pub async fn fetch_data(&self) -> Result<MetricSet> {
        let mut session = PortalSession::new(&self.base_url, self.timeout)?;
        session.login(&self.username, &self.password).await?;

        let mut data = MetricSet::new();

        // Tariffs must be set up by the user on the portal and are often
        // absent; an empty schedule is fine, a malformed one is not.
        let view_page = session.get_html(ELECTRICITY_VIEW_PATH).await?;
        let tariffs = extract_tariffs(&view_page)?;
        if tariffs.is_empty() {
            self.logger.warn("No tariff data on the electricity view page");
        }
        data.extend(tariffs);

        for (granularity, offset, current, previous) in PERIOD_FETCHES {
            let path = format!("/electricityView/period/{granularity}/{offset}");
            let json = session.get_json(&path).await?;
            let payload = PeriodPayload::decode(json)?;
            data.extend(payload.metrics(current, previous));
        }

        self.logger
            .info(&format!("Fetched {} metrics from the portal", data.len()));
        Ok(data)
    }
}

#[async_trait]
impl MetricsSource for OutlookClient {
    async fn fetch(&self) -> Result<MetricSet> {
        self.fetch_data().await
    }
}
