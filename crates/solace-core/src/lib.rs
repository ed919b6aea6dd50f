//! Shared foundation for the Solace client: configuration and errors.

pub mod config;
pub mod error;

pub use config::{BackendConfig, ChatConfig, LogConfig, SolaceConfig};
pub use error::{Result, SolaceError};
