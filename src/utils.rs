use crate::time::TimeProvider;
use chrono::{DateTime, SecondsFormat, TimeZone, Utc};
use std::sync::Arc;
use tracing_subscriber::{fmt::time::FormatTime, EnvFilter};

/// Format a Unix UTC timestamp the way packets and logs carry it,
/// e.g. "2024-01-01T00:00:00Z".
pub fn ux_ts_to_string(ts: i64) -> String {
    match Utc.timestamp_opt(ts, 0).single() {
        Some(t) => t.to_rfc3339_opts(SecondsFormat::Secs, true),
        None => String::from("invalid-time"),
    }
}

// test helper
pub fn parse_datetime_to_utc_timestamp(datetime: &str, fmt: &str) -> Option<i64> {
    DateTime::parse_from_str(datetime, fmt).ok().map(|t| t.with_timezone(&Utc).timestamp())
}

/// Stamps log lines from an injected clock so simulated runs log simulated time.
pub struct ProviderTimeFormat<T: TimeProvider> {
    pub time_provider: Arc<T>,
}

impl<T: TimeProvider> FormatTime for ProviderTimeFormat<T> {
    fn format_time(&self, w: &mut tracing_subscriber::fmt::format::Writer<'_>) -> std::fmt::Result {
        write!(w, "{}", ux_ts_to_string(self.time_provider.now()))
    }
}

pub fn start_log<T: TimeProvider + 'static>(time_provider: Option<Arc<T>>) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    match time_provider {
        Some(tp) => {
            _ = tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_timer(ProviderTimeFormat { time_provider: tp })
                .try_init();
        }
        None => {
            _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
        }
    }
}
