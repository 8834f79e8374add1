//! Pluggable sample fetchers
//!
//! Fetching is split into capability traits over a shared [`SampleSource`]:
//! a source either produces one sample per fetch or a sequence per fetch.
//! The recorder takes whichever capability the operation needs, never a
//! concrete source type.

use crate::fixtures::event::{Fields, Namespace};
use async_trait::async_trait;
use thiserror::Error;

/// Fetch-side error type. Fetch failures pass through the recorder verbatim.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Source unavailable: {0}")]
    Unavailable(String),

    #[error("Malformed sample: {0}")]
    Malformed(String),
}

/// Naming and registration metadata of the thing being sampled.
pub trait SampleSource {
    /// Module the metric set belongs to.
    fn module_name(&self) -> &str;

    /// Metric set name.
    fn name(&self) -> &str;

    /// Address of the monitored service, when there is one.
    fn host(&self) -> Option<String> {
        None
    }

    /// Namespace from the source's registration, used only when a sample
    /// does not name its own.
    fn default_namespace(&self) -> Option<Namespace> {
        None
    }
}

/// Capability: produce exactly one sample per fetch.
#[async_trait]
pub trait EventFetcher: SampleSource + Send + Sync {
    async fn fetch_one(&self) -> Result<Fields, FetchError>;
}

/// Capability: produce a sequence of samples per fetch.
#[async_trait]
pub trait EventsFetcher: SampleSource + Send + Sync {
    async fn fetch_all(&self) -> Result<Vec<Fields>, FetchError>;
}
