//! Fixture recording operations
//!
//! One representative sample is selected, standardized onto the fixed
//! reference instant and latency, and written as indented JSON. Writes only
//! happen when the recorder's config enables them; every other caller gets
//! [`RecordOutcome::Skipped`] and no filesystem activity.

use crate::config::FixtureSettings;
use crate::fixtures::event::{
    add_metric_set_info, EventModifier, Fields, FullEvent, SampleEvent,
};
use crate::fixtures::fetcher::{EventFetcher, EventsFetcher, FetchError, SampleSource};
use crate::fixtures::{reference_timestamp, AGENT_HOSTNAME, REFERENCE_LATENCY};
use chrono::SecondsFormat;
use serde::Serialize;
use serde_json::{json, Value};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

/// Predicate picking a representative sample out of a fetched sequence.
/// `None` means "take the first".
pub type SelectionCondition<'a> = Option<&'a dyn Fn(&Fields) -> bool>;

/// Recorder-side error type
#[derive(Debug, Error)]
pub enum FixtureError {
    /// Fetch failure, passed through verbatim. The write step never ran.
    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error("no events were generated")]
    NoEvents,

    #[error("no events satisfied the condition")]
    NoMatch,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Explicit recorder configuration, passed in at construction.
///
/// Replaces a process-wide "write fixtures" flag so recorders stay testable
/// in isolation and parallel suites cannot observe each other's state.
#[derive(Debug, Clone, Default)]
pub struct FixtureConfig {
    /// Gate for all file writes. Off by default; a disabled recorder is
    /// inert.
    pub write_enabled: bool,
    /// Root that relative fixture paths resolve against. `None` means the
    /// current working directory.
    pub output_root: Option<PathBuf>,
}

impl From<&FixtureSettings> for FixtureConfig {
    fn from(settings: &FixtureSettings) -> Self {
        Self {
            write_enabled: settings.write_enabled,
            output_root: if settings.output_root.is_empty() {
                None
            } else {
                Some(PathBuf::from(&settings.output_root))
            },
        }
    }
}

/// Outcome of one recording operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordOutcome {
    /// File writing is disabled; nothing was fetched or written.
    Skipped,
    /// The fixture was written to the given path.
    Written(PathBuf),
}

/// Records standardized sample events as golden `data.json` fixtures.
#[derive(Debug, Clone, Default)]
pub struct FixtureRecorder {
    config: FixtureConfig,
}

impl FixtureRecorder {
    pub fn new(config: FixtureConfig) -> Self {
        Self { config }
    }

    pub fn is_enabled(&self) -> bool {
        self.config.write_enabled
    }

    /// Fetch a single sample event and write it to the default fixture path.
    ///
    /// Fetch errors are returned verbatim and skip the write step.
    pub async fn write_single_event(
        &self,
        fetcher: &dyn EventFetcher,
    ) -> Result<RecordOutcome, FixtureError> {
        if !self.config.write_enabled {
            debug!("fixture writes disabled, skipping data generation");
            return Ok(RecordOutcome::Skipped);
        }

        let fields = fetcher.fetch_one().await?;
        let full_event =
            standardize_event(fetcher, SampleEvent::new(fields), &[add_metric_set_info]);
        self.write_event_to_data_json(full_event, ".")
    }

    /// Fetch a sequence of sample events, select one, and write it.
    ///
    /// Fails with [`FixtureError::NoEvents`] on an empty sequence and
    /// [`FixtureError::NoMatch`] when nothing satisfies the condition.
    pub async fn write_events(
        &self,
        fetcher: &dyn EventsFetcher,
        condition: SelectionCondition<'_>,
    ) -> Result<RecordOutcome, FixtureError> {
        if !self.config.write_enabled {
            debug!("fixture writes disabled, skipping data generation");
            return Ok(RecordOutcome::Skipped);
        }

        let events = fetcher.fetch_all().await?;
        if events.is_empty() {
            return Err(FixtureError::NoEvents);
        }

        let selected = select_event(&events, condition)?.clone();
        let full_event =
            standardize_event(fetcher, SampleEvent::new(selected), &[add_metric_set_info]);
        self.write_event_to_data_json(full_event, "")
    }

    /// Write one standardized event as indented JSON.
    ///
    /// An empty `path_hint`, or a hint naming an existing directory, resolves
    /// to `<hint>/_meta/data.json` under the configured root (defaulting to
    /// the current working directory). Any other hint is used verbatim as the
    /// full file path. The event's timestamp is injected into the fields as
    /// `@timestamp` before serialization.
    pub fn write_event_to_data_json(
        &self,
        mut full_event: FullEvent,
        path_hint: &str,
    ) -> Result<RecordOutcome, FixtureError> {
        if !self.config.write_enabled {
            return Ok(RecordOutcome::Skipped);
        }

        let target = self.resolve_output_path(path_hint)?;

        full_event.fields.insert(
            "@timestamp".to_string(),
            json!(full_event
                .timestamp
                .to_rfc3339_opts(SecondsFormat::Millis, true)),
        );

        let mut output = Vec::new();
        let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
        let mut serializer = serde_json::Serializer::with_formatter(&mut output, formatter);
        full_event.fields.serialize(&mut serializer)?;

        std::fs::write(&target, &output)?;
        set_fixture_permissions(&target)?;

        info!(path = %target.display(), "wrote fixture data.json");
        Ok(RecordOutcome::Written(target))
    }

    fn resolve_output_path(&self, path_hint: &str) -> Result<PathBuf, FixtureError> {
        let root = match &self.config.output_root {
            Some(root) => root.clone(),
            None => std::env::current_dir()?,
        };

        let candidate = root.join(path_hint);
        if path_hint.is_empty() || candidate.is_dir() {
            Ok(candidate.join("_meta").join("data.json"))
        } else {
            Ok(PathBuf::from(path_hint))
        }
    }
}

/// Select the first event that satisfies the condition.
///
/// An unset condition over a non-empty sequence selects the first event
/// unchanged. A full scan with no match fails, as does an empty sequence:
/// "nothing to search" and "searched and found nothing" are deliberately not
/// distinguished.
pub fn select_event<'a>(
    events: &'a [Fields],
    condition: SelectionCondition<'_>,
) -> Result<&'a Fields, FixtureError> {
    match condition {
        None => events.first().ok_or(FixtureError::NoMatch),
        Some(cond) => events
            .iter()
            .find(|event| cond(event))
            .ok_or(FixtureError::NoMatch),
    }
}

/// Standardize a sample event onto the fixed reference values.
///
/// The timestamp and round-trip time are overwritten with the reference
/// constants so fixtures are byte-stable regardless of wall-clock time or
/// real latency. The namespace is filled from the source's registration only
/// when the sample did not name one. Modifiers run in order on the full
/// event, and the fixed agent identity is injected last.
pub fn standardize_event<S: SampleSource + ?Sized>(
    source: &S,
    mut event: SampleEvent,
    modifiers: &[EventModifier],
) -> FullEvent {
    event.timestamp = reference_timestamp();
    event.took = REFERENCE_LATENCY;
    event.host = source.host();
    if event.namespace.is_none() {
        event.namespace = source.default_namespace();
    }

    // Metric-set data nests under <module>.<namespace-or-metricset-name>.
    let dataset_key = event
        .namespace
        .as_ref()
        .map(|ns| ns.to_string())
        .unwrap_or_else(|| source.name().to_string());

    let mut nested = Fields::new();
    nested.insert(dataset_key, Value::Object(event.metric_set_fields));
    let mut fields = Fields::new();
    fields.insert(source.module_name().to_string(), Value::Object(nested));

    let mut full_event = FullEvent {
        timestamp: event.timestamp,
        took: event.took,
        host: event.host,
        fields,
    };

    for modifier in modifiers {
        modifier(source.module_name(), source.name(), &mut full_event);
    }

    full_event.fields.insert(
        "agent".to_string(),
        json!({
            "name": AGENT_HOSTNAME,
            "hostname": AGENT_HOSTNAME,
        }),
    );

    full_event
}

#[cfg(unix)]
fn set_fixture_permissions(path: &Path) -> std::io::Result<()> {
    use std::os::unix::fs::PermissionsExt;
    std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o644))
}

#[cfg(not(unix))]
fn set_fixture_permissions(_path: &Path) -> std::io::Result<()> {
    Ok(())
}
