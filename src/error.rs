use crate::client::{transport::TransportError, ClientError};
use crate::fixtures::FixtureError;
use thiserror::Error;

/// Moorage application error types
#[derive(Error, Debug)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(#[from] crate::config::ConfigError),

    #[error("Client error: {0}")]
    Client(#[from] ClientError),

    #[error("Transport error: {0}")]
    Transport(#[from] TransportError),

    #[error("Fixture error: {0}")]
    Fixture(#[from] FixtureError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
