//! CLI module for voicedesk - command-line interface and subcommands.
//!
//! Lists agents, prints manifests for the hosted runtime, and runs tool calls
//! locally, either one at a time or as a JSON-lines session.

pub mod commands;

pub use commands::Cli;
