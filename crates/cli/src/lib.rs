//! recordgen - CLI shell around recordgen_core.

pub mod cli;
pub mod config;
pub mod error;
pub mod input;
pub mod output;

pub use config::Config;
pub use error::{CliError, Result};
