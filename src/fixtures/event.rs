//! Sample event shapes and the modifier pipeline

use chrono::{DateTime, Utc};
use nutype::nutype;
use serde_json::{json, Map, Value};
use std::time::Duration;

/// Field mapping of one sample data point.
pub type Fields = Map<String, Value>;

/// Telemetry namespace a metric set reports under
#[nutype(
    sanitize(trim),
    validate(not_empty),
    derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Display, AsRef)
)]
pub struct Namespace(String);

/// One fetched sample data point, prior to standardization.
#[derive(Debug, Clone)]
pub struct SampleEvent {
    pub timestamp: DateTime<Utc>,
    /// Round-trip time of the fetch that produced this sample.
    pub took: Duration,
    pub host: Option<String>,
    /// Namespace the sample reports under, when the sample names one itself.
    pub namespace: Option<Namespace>,
    pub metric_set_fields: Fields,
}

impl SampleEvent {
    /// Wrap raw fetched fields in an event carrying the fetch time.
    pub fn new(metric_set_fields: Fields) -> Self {
        Self {
            timestamp: Utc::now(),
            took: Duration::ZERO,
            host: None,
            namespace: None,
            metric_set_fields,
        }
    }
}

/// Fully shaped event, ready for fixture serialization.
#[derive(Debug, Clone)]
pub struct FullEvent {
    pub timestamp: DateTime<Utc>,
    pub took: Duration,
    pub host: Option<String>,
    pub fields: Fields,
}

/// Modifier applied after the event takes its full shape. Modifiers run in
/// the order given and may add or rewrite any field.
pub type EventModifier = fn(module: &str, metric_set: &str, event: &mut FullEvent);

/// Attach metric-set descriptive fields: the owning module, the dataset
/// name, the fetch duration, and the sampled service address.
pub fn add_metric_set_info(module: &str, metric_set: &str, event: &mut FullEvent) {
    event.fields.insert(
        "event".to_string(),
        json!({
            "module": module,
            "dataset": format!("{module}.{metric_set}"),
            "duration": event.took.as_nanos() as u64,
        }),
    );
    event
        .fields
        .insert("metricset".to_string(), json!({ "name": metric_set }));

    if let Some(host) = &event.host {
        event
            .fields
            .insert("service".to_string(), json!({ "address": host }));
    }
}
