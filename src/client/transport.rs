//! One-shot HTTP transport for control-API operations
//!
//! The transport owns the wire envelope: each operation is a `POST` to the
//! service endpoint with the operation name carried in a target header. One
//! attempt per call; retry policy belongs to callers.

use crate::client::OperationDescriptor;
use async_trait::async_trait;
use bytes::Bytes;
use http_body_util::{BodyExt, Full};
use hyper::Request;
use hyper_util::client::legacy::{connect::HttpConnector, Client as HyperClient};
use thiserror::Error;
use tracing::debug;
use uuid::Uuid;

/// Header naming the operation inside the service envelope.
pub const TARGET_HEADER: &str = "x-mrg-target";

/// Header carrying the client-generated request id, echoed in traces.
pub const CLIENT_REQUEST_ID_HEADER: &str = "x-mrg-client-request-id";

/// Header on which the service reports its own request id.
pub const REQUEST_ID_HEADER: &str = "x-mrg-request-id";

/// Envelope prefix for the target header, e.g. `TransferService.UpdateUser`.
pub const SERVICE_TARGET_PREFIX: &str = "TransferService";

/// Transport-layer error type
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("Invalid endpoint URL: {0}")]
    InvalidEndpoint(String),

    #[error("Request failed: {0}")]
    RequestFailed(String),

    #[error("Request timed out after {0:?}")]
    TimedOut(std::time::Duration),

    #[error("Service returned {status}: {message}")]
    Service { status: u16, message: String },
}

/// Raw response handed back by a transport.
#[derive(Debug, Clone)]
pub struct TransportResponse {
    pub status: u16,
    pub request_id: Option<String>,
    pub body: Bytes,
}

/// Seam between operation bindings and the wire.
///
/// Cancellation is cooperative: dropping the returned future abandons the
/// call. The client applies its configured deadline around each dispatch and
/// surfaces a lapsed one as [`TransportError::TimedOut`].
#[async_trait]
pub trait Transport: Send + Sync {
    /// Send one serialized operation payload. Exactly one attempt.
    async fn send_raw(
        &self,
        descriptor: &OperationDescriptor,
        body: Bytes,
    ) -> Result<TransportResponse, TransportError>;
}

/// HTTP transport over a hyper legacy client.
pub struct HttpTransport {
    endpoint: String,
    client: HyperClient<HttpConnector, Full<Bytes>>,
}

impl HttpTransport {
    /// Create a transport targeting the given service endpoint,
    /// e.g. `https://transfer.example.com`.
    pub fn new(endpoint: impl Into<String>) -> Self {
        let client =
            HyperClient::builder(hyper_util::rt::TokioExecutor::new()).build_http::<Full<Bytes>>();
        Self {
            endpoint: endpoint.into(),
            client,
        }
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send_raw(
        &self,
        descriptor: &OperationDescriptor,
        body: Bytes,
    ) -> Result<TransportResponse, TransportError> {
        let target_url = format!("{}{}", self.endpoint, descriptor.http_path);
        let uri: hyper::Uri = target_url
            .parse()
            .map_err(|_| TransportError::InvalidEndpoint(target_url))?;

        let client_request_id = Uuid::now_v7();
        debug!(
            operation = %descriptor.name,
            %client_request_id,
            "dispatching control-API operation"
        );

        let request = Request::builder()
            .method(descriptor.http_method.clone())
            .uri(uri)
            .header(
                TARGET_HEADER,
                format!("{SERVICE_TARGET_PREFIX}.{}", descriptor.name),
            )
            .header(CLIENT_REQUEST_ID_HEADER, client_request_id.to_string())
            .header(http::header::CONTENT_TYPE, "application/json")
            .body(Full::new(body))
            .map_err(|e| TransportError::RequestFailed(e.to_string()))?;

        let response = self
            .client
            .request(request)
            .await
            .map_err(|e| TransportError::RequestFailed(format!("Request failed: {e}")))?;

        let (parts, incoming) = response.into_parts();
        let request_id = parts
            .headers
            .get(REQUEST_ID_HEADER)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);

        let body = incoming
            .collect()
            .await
            .map_err(|e| TransportError::RequestFailed(format!("Failed to read body: {e}")))?
            .to_bytes();

        if !parts.status.is_success() {
            return Err(TransportError::Service {
                status: parts.status.as_u16(),
                message: String::from_utf8_lossy(&body).into_owned(),
            });
        }

        Ok(TransportResponse {
            status: parts.status.as_u16(),
            request_id,
            body,
        })
    }
}
