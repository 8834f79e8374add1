//! Abort-on-infrastructure-error policy for test harnesses
//!
//! The recorder returns filesystem and serialization failures like any other
//! error so the library stays composable. Tests that want the traditional
//! fail-fast behavior wrap recorder calls in these helpers: infrastructure
//! errors abort the running test, while data-availability errors
//! ([`FixtureError::NoEvents`], [`FixtureError::NoMatch`]) are handed back
//! for the test to assert on.

use crate::fixtures::fetcher::{EventFetcher, EventsFetcher};
use crate::fixtures::recorder::{
    FixtureError, FixtureRecorder, RecordOutcome, SelectionCondition,
};

fn abort_on_infrastructure_error(
    result: Result<RecordOutcome, FixtureError>,
) -> Result<RecordOutcome, FixtureError> {
    match result {
        Err(FixtureError::Io(e)) => panic!("fixture write failed: {e}"),
        Err(FixtureError::Serialize(e)) => panic!("fixture serialization failed: {e}"),
        other => other,
    }
}

/// [`FixtureRecorder::write_single_event`] with the abort policy applied.
pub async fn write_single_event_or_abort(
    recorder: &FixtureRecorder,
    fetcher: &dyn EventFetcher,
) -> Result<RecordOutcome, FixtureError> {
    abort_on_infrastructure_error(recorder.write_single_event(fetcher).await)
}

/// [`FixtureRecorder::write_events`] with the abort policy applied.
pub async fn write_events_or_abort(
    recorder: &FixtureRecorder,
    fetcher: &dyn EventsFetcher,
    condition: SelectionCondition<'_>,
) -> Result<RecordOutcome, FixtureError> {
    abort_on_infrastructure_error(recorder.write_events(fetcher, condition).await)
}
