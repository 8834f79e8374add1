//! Golden-fixture recorder for telemetry sample events
//!
//! Captures one representative sample event from a pluggable fetcher,
//! standardizes it onto fixed reference values so the output is byte-stable
//! across runs, and writes it as a pretty-printed `_meta/data.json` fixture.
//! All file writes are gated by an explicit [`FixtureConfig`]; the recorder
//! is inert unless a data-generation run enables it.

pub mod event;
pub mod fetcher;
pub mod harness;
pub mod recorder;

pub use event::{add_metric_set_info, EventModifier, Fields, FullEvent, Namespace, SampleEvent};
pub use fetcher::{EventFetcher, EventsFetcher, FetchError, SampleSource};
pub use recorder::{
    standardize_event, FixtureConfig, FixtureError, FixtureRecorder, RecordOutcome,
    SelectionCondition,
};

use chrono::{DateTime, Utc};
use std::time::Duration;

/// Reference instant every recorded fixture carries, regardless of when the
/// sample was actually fetched.
pub const REFERENCE_TIME_RFC3339: &str = "2017-10-12T08:05:34.853Z";

/// Reference round-trip time every recorded fixture carries.
pub const REFERENCE_LATENCY: Duration = Duration::from_micros(115);

/// Fixed agent identity injected into every fixture.
pub const AGENT_HOSTNAME: &str = "host.example.com";

/// The reference instant as a timestamp.
pub fn reference_timestamp() -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(REFERENCE_TIME_RFC3339)
        .unwrap()
        .with_timezone(&Utc)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Timelike;

    #[test]
    fn test_reference_timestamp_parses() {
        let ts = reference_timestamp();
        assert_eq!(ts.nanosecond(), 853_000_000);
        assert_eq!(
            ts.to_rfc3339_opts(chrono::SecondsFormat::Millis, true),
            REFERENCE_TIME_RFC3339
        );
    }
}
