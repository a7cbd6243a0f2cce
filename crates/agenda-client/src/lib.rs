//! CLI, configuration, agenda pipeline
//!
//! This crate provides the `agenda` command-line interface.

pub mod cli;
pub mod collector;
pub mod commands;
pub mod config;
pub mod error;
pub mod pipeline;

pub use cli::Cli;
pub use collector::collect;
pub use config::{AgendaConfig, RunConfig};
pub use error::{AgendaError, AgendaResult};
pub use pipeline::Pipeline;
