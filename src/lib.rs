//! # Jemena Electricity Outlook client
//!
//! Retrieves electricity usage, generation, and cost figures from the Jemena
//! Electricity Outlook portal and exposes them as a flat set of named metrics
//! for a host monitoring platform.
//!
//! The portal has no documented API: the client logs in through the web login
//! form, scrapes tariff rates out of an embedded script variable, and calls
//! the undocumented period JSON endpoints for daily, weekly, and monthly
//! windows. Results are normalized into one metric mapping per refresh and
//! served from a throttled cache.
//!
//! ## Architecture
//!
//! - `config`: Configuration management and validation
//! - `logging`: Structured logging and tracing
//! - `currency`: Locale-formatted currency parsing
//! - `period`: Period payload decoding and metric derivation
//! - `tariff`: Tariff extraction from embedded script content
//! - `session`: Cookie-backed authenticated portal session
//! - `client`: Full refresh cycle orchestration
//! - `cache`: Last-known-good snapshot with interval throttling
//! - `catalog`: Static metric key and display metadata table

pub mod cache;
pub mod catalog;
pub mod client;
pub mod config;
pub mod currency;
pub mod error;
pub mod logging;
pub mod period;
pub mod session;
pub mod tariff;

// Re-export commonly used types
pub use cache::{MetricsCache, MetricsSource, RefreshOutcome};
pub use client::OutlookClient;
pub use config::Config;
pub use error::{OutlookError, Result};
pub use period::{MetricSet, MetricValue};
