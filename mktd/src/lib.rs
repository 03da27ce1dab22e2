#![warn(missing_docs)]
#![doc = include_str!("../README.md")]

mod cli;
mod config;
mod sweep;

pub mod impls;

pub use cli::Cli;
pub use config::AppConfig;
pub use sweep::{SweepConfig, settle_due};
