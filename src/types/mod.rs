//! Shared types for Echo Journal

pub mod error;

pub use error::{EchoError, Result};
