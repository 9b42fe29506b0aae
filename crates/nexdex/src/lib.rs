//! NexDex CLI - run failure simulations against a service dependency map.
//!
//! The heavy lifting lives in [`nexdex_core`]; this crate adds argument
//! parsing ([`cli`]), terminal output ([`output`]), and file-backed scenario
//! storage ([`store`]).

#![forbid(unsafe_code)]

pub mod cli;
pub mod output;
pub mod store;

pub use cli::{execute, Cli, Commands};
pub use output::OutputConfig;
pub use store::ScenarioStore;
