//! Moorage - typed client bindings for a managed file-transfer control API
//!
//! This crate provides two independent components: a request binding for the
//! control-plane `UpdateUser` operation of a managed file-transfer service,
//! and a fixture recorder that captures standardized telemetry sample events
//! as golden `data.json` files for use in other test suites.

pub mod client;
pub mod config;
pub mod error;
pub mod fixtures;

pub use client::Client;
pub use error::{Error, Result};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_functionality() {
        // Basic smoke test to ensure the library compiles and basic types work
        let result: Result<()> = Ok(());
        assert!(result.is_ok());
    }
}
