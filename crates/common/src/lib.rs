//! Shared types for the Kick OAuth client workspace

pub mod config;
mod error;
mod secret;

pub use config::{ClientConfig, Environment};
pub use error::{Error, Result};
pub use secret::Secret;
