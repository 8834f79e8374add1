//! Request bindings for the file-transfer control API
//!
//! Each operation follows the same shape: a typed input is validated,
//! wrapped in an [`OperationRequest`] carrying its [`OperationDescriptor`],
//! dispatched exactly once through the [`Transport`](transport::Transport)
//! seam, and the response body is deserialized into a typed output with
//! response metadata attached for introspection.

pub mod params;
pub mod transport;
pub mod update_user;

pub use params::{InvalidParams, ParamError};
pub use update_user::{
    UpdateUserInput, UpdateUserOutput, UpdateUserRequest, UpdateUserResponse,
};

use crate::client::transport::{HttpTransport, Transport, TransportError};
use crate::config::ClientSettings;
use bytes::Bytes;
use nutype::nutype;
use serde::{de::DeserializeOwned, Serialize};
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

/// Operation name as carried in the service envelope
#[nutype(
    sanitize(trim),
    validate(not_empty, regex = r"^[A-Za-z][A-Za-z0-9]*$"),
    derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Display, AsRef)
)]
pub struct OperationName(String);

/// Static description of one control-API operation: envelope name, HTTP
/// method, and HTTP path.
#[derive(Debug, Clone)]
pub struct OperationDescriptor {
    pub name: OperationName,
    pub http_method: http::Method,
    pub http_path: &'static str,
}

/// A built, not-yet-sent operation request.
///
/// Pure value: nothing touches the wire until the request is sent. Re-invoking
/// the build-and-send pair is the manual retry path; the client itself never
/// retries.
#[derive(Debug, Clone)]
pub struct OperationRequest<I> {
    pub descriptor: OperationDescriptor,
    pub input: I,
}

/// Response metadata retained alongside the typed output.
#[derive(Debug, Clone)]
pub struct ResponseMetadata {
    pub status: u16,
    pub request_id: Option<String>,
}

/// Client-side error type for operation bindings
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// One or more required input fields were missing; nothing was sent.
    #[error(transparent)]
    MissingParams(#[from] InvalidParams),

    /// Transport or remote failure, passed through unwrapped.
    #[error(transparent)]
    Transport(#[from] TransportError),

    #[error("Failed to deserialize response: {0}")]
    Deserialize(#[from] serde_json::Error),
}

/// Control-API client. Operation constructors live alongside their input
/// types (see [`update_user`]).
#[derive(Clone)]
pub struct Client {
    transport: Arc<dyn Transport>,
    request_timeout: Option<Duration>,
}

impl Client {
    /// Create a client with an HTTP transport targeting the given endpoint
    /// and no dispatch deadline.
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            transport: Arc::new(HttpTransport::new(endpoint)),
            request_timeout: None,
        }
    }

    /// Create a client from loaded settings: an HTTP transport at the
    /// configured endpoint, with the configured request timeout applied
    /// around each dispatch. A zero timeout means no deadline.
    pub fn from_settings(settings: &ClientSettings) -> Self {
        let request_timeout = (settings.request_timeout_ms > 0)
            .then(|| Duration::from_millis(settings.request_timeout_ms));
        Self {
            transport: Arc::new(HttpTransport::new(settings.endpoint.clone())),
            request_timeout,
        }
    }

    /// Create a client over a caller-supplied transport (for testing).
    pub fn with_transport(transport: Arc<dyn Transport>) -> Self {
        Self {
            transport,
            request_timeout: None,
        }
    }

    /// Apply a deadline around each dispatch. A lapsed deadline surfaces as
    /// [`TransportError::TimedOut`].
    #[must_use]
    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = Some(timeout);
        self
    }

    /// Deadline applied around each dispatch, when one is configured.
    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout
    }

    /// Serialize and dispatch one built request, deserializing the response
    /// body into the operation's output type.
    pub(crate) async fn dispatch<I, O>(
        &self,
        request: &OperationRequest<I>,
    ) -> Result<(O, ResponseMetadata), ClientError>
    where
        I: Serialize,
        O: DeserializeOwned,
    {
        let body = Bytes::from(serde_json::to_vec(&request.input)?);
        let send = self.transport.send_raw(&request.descriptor, body);
        let response = match self.request_timeout {
            Some(limit) => tokio::time::timeout(limit, send)
                .await
                .map_err(|_| TransportError::TimedOut(limit))??,
            None => send.await?,
        };

        debug!(
            operation = %request.descriptor.name,
            status = response.status,
            "operation response received"
        );

        let output = serde_json::from_slice(&response.body)?;
        let metadata = ResponseMetadata {
            status: response.status,
            request_id: response.request_id,
        };
        Ok((output, metadata))
    }
}
