//! `UpdateUser` operation binding
//!
//! Assigns new properties to a user on a file-transfer server instance.
//! Parameters passed modify any or all of the home directory, role, and
//! policy for the `user_name` and `server_id` given.

use crate::client::params::{InvalidParams, ParamError};
use crate::client::{
    Client, ClientError, OperationDescriptor, OperationName, OperationRequest, ResponseMetadata,
};
use serde::{Deserialize, Serialize};

const OPERATION_NAME: &str = "UpdateUser";

/// Input for the `UpdateUser` operation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct UpdateUserInput {
    /// Landing directory (folder) for the user when they log in to the
    /// server, for example `/home/username`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub home_directory: Option<String>,

    /// Scope-down policy for the user, stored as an opaque JSON blob rather
    /// than a policy ARN. Lets the same role be shared across users while
    /// narrowing each user's effective access.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub policy: Option<String>,

    /// Access-control role governing the user's access to storage when the
    /// server services transfer requests on their behalf.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,

    /// System-assigned unique identifier for the server instance the user
    /// account is assigned to. Required.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub server_id: Option<String>,

    /// Unique string identifying the user on the given server. 3-32
    /// characters of `a-z`, `A-Z`, `0-9`, underscore, and hyphen; cannot
    /// start with a hyphen. Required.
    ///
    /// Length and character-set constraints are enforced by the remote
    /// service, not by [`validate`](Self::validate).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_name: Option<String>,
}

impl UpdateUserInput {
    /// Check that every required field is present.
    ///
    /// Collects all violations before returning rather than stopping at the
    /// first. Optional fields are never inspected here.
    pub fn validate(&self) -> Result<(), InvalidParams> {
        let mut invalid = InvalidParams::new("UpdateUserInput");

        if self.server_id.is_none() {
            invalid.add(ParamError::Required { field: "server_id" });
        }

        if self.user_name.is_none() {
            invalid.add(ParamError::Required { field: "user_name" });
        }

        invalid.into_result()
    }
}

/// Output of a successful `UpdateUser` call: echoes the identifying keys of
/// the updated record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct UpdateUserOutput {
    /// Identifier of the server instance the user is assigned to.
    pub server_id: String,

    /// Identifier of the user that was updated.
    pub user_name: String,
}

/// Typed response for the `UpdateUser` operation.
#[derive(Debug, Clone)]
pub struct UpdateUserResponse {
    pub output: UpdateUserOutput,
    metadata: ResponseMetadata,
}

impl UpdateUserResponse {
    /// Response metadata for introspection (HTTP status, service request id).
    pub fn metadata(&self) -> &ResponseMetadata {
        &self.metadata
    }
}

/// A built `UpdateUser` request, ready to send.
///
/// One send per build: success and failure are both terminal, and retrying
/// means building a fresh request.
pub struct UpdateUserRequest {
    client: Client,
    pub request: OperationRequest<UpdateUserInput>,
}

impl UpdateUserRequest {
    /// Validate required fields, then marshal and send the request once.
    ///
    /// Validation failures mean nothing was sent. Transport and remote
    /// failures are returned unwrapped.
    pub async fn send(self) -> Result<UpdateUserResponse, ClientError> {
        self.request.input.validate()?;

        let (output, metadata) = self.client.dispatch(&self.request).await?;
        Ok(UpdateUserResponse { output, metadata })
    }
}

impl Client {
    /// Build an `UpdateUser` request. Pure construction; the request is not
    /// sent until [`UpdateUserRequest::send`] is invoked, and a default
    /// (empty) input is accepted at build time.
    pub fn update_user_request(&self, input: UpdateUserInput) -> UpdateUserRequest {
        let descriptor = OperationDescriptor {
            name: OperationName::try_new(OPERATION_NAME.to_string()).unwrap(),
            http_method: http::Method::POST,
            http_path: "/",
        };

        UpdateUserRequest {
            client: self.clone(),
            request: OperationRequest { descriptor, input },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_input() -> UpdateUserInput {
        UpdateUserInput {
            home_directory: Some("/home/charlie".to_string()),
            policy: Some(r#"{"Version":"2012-10-17"}"#.to_string()),
            role: Some("transfer-access".to_string()),
            server_id: Some("s-01234567890abcdef".to_string()),
            user_name: Some("charlie".to_string()),
        }
    }

    #[test]
    fn test_validate_accepts_complete_input() {
        assert!(full_input().validate().is_ok());
    }

    #[test]
    fn test_validate_ignores_optional_fields() {
        let input = UpdateUserInput {
            server_id: Some("s-01234567890abcdef".to_string()),
            user_name: Some("charlie".to_string()),
            ..Default::default()
        };
        assert!(input.validate().is_ok());
    }

    #[test]
    fn test_validate_does_not_enforce_user_name_format() {
        // Charset and length checks belong to the remote service.
        let input = UpdateUserInput {
            server_id: Some("s-01234567890abcdef".to_string()),
            user_name: Some("-starts-with-hyphen-and-is-far-too-long-for-the-documented-limit"
                .to_string()),
            ..Default::default()
        };
        assert!(input.validate().is_ok());
    }

    #[test]
    fn test_validate_reports_every_missing_field() {
        let input = UpdateUserInput {
            home_directory: Some("/home/charlie".to_string()),
            ..Default::default()
        };

        let err = input.validate().unwrap_err();
        assert_eq!(err.len(), 2);
        let fields: Vec<_> = err.violations().iter().map(|v| v.field()).collect();
        assert_eq!(fields, vec!["server_id", "user_name"]);
    }

    #[test]
    fn test_validate_reports_single_missing_server_id() {
        let input = UpdateUserInput {
            user_name: Some("charlie".to_string()),
            ..Default::default()
        };

        let err = input.validate().unwrap_err();
        assert_eq!(err.len(), 1);
        assert_eq!(err.violations()[0].field(), "server_id");
    }

    #[test]
    fn test_request_descriptor_shape() {
        let client = Client::new("https://transfer.example.com");
        let req = client.update_user_request(UpdateUserInput::default());

        assert_eq!(req.request.descriptor.name.to_string(), "UpdateUser");
        assert_eq!(req.request.descriptor.http_method, http::Method::POST);
        assert_eq!(req.request.descriptor.http_path, "/");
    }

    #[test]
    fn test_input_serializes_pascal_case_and_skips_unset() {
        let input = UpdateUserInput {
            server_id: Some("s-01234567890abcdef".to_string()),
            user_name: Some("charlie".to_string()),
            ..Default::default()
        };

        let value = serde_json::to_value(&input).unwrap();
        assert_eq!(value["ServerId"], "s-01234567890abcdef");
        assert_eq!(value["UserName"], "charlie");
        assert!(value.get("HomeDirectory").is_none());
        assert!(value.get("Policy").is_none());
        assert!(value.get("Role").is_none());
    }

    #[test]
    fn test_output_deserializes_from_wire_shape() {
        let output: UpdateUserOutput = serde_json::from_str(
            r#"{"ServerId":"s-01234567890abcdef","UserName":"charlie"}"#,
        )
        .unwrap();
        assert_eq!(output.server_id, "s-01234567890abcdef");
        assert_eq!(output.user_name, "charlie");
    }
}
