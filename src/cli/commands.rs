//! CLI command definitions using clap.
//!
//! Defines the main CLI structure and subcommands:
//! - agents: list the available agents
//! - manifest: print an agent's manifest JSON
//! - call: run a single tool call
//! - session: run JSON-lines tool calls from stdin

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// voicedesk - tool sets for hosted voice agents
#[derive(Parser, Debug)]
#[command(name = "voicedesk")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Optional config file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Check if verbose mode is enabled
    pub fn is_verbose(&self) -> bool {
        self.verbose
    }
}

/// Main subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List available agents
    Agents,

    /// Print the manifest (instructions, session settings, tool schemas) for an agent
    Manifest {
        /// Agent name (fraud, sdr, grocery, tutor, story)
        agent: String,

        /// Print compact JSON instead of pretty JSON
        #[arg(long)]
        compact: bool,
    },

    /// Run one tool call in a fresh session
    Call {
        /// Agent name
        agent: String,

        /// Tool name
        tool: String,

        /// Tool arguments as a JSON object
        #[arg(short, long, default_value = "{}")]
        input: String,
    },

    /// Run JSON-lines tool calls from stdin in one session
    Session {
        /// Agent name
        agent: String,

        /// Session ID to use in logs (generated when omitted)
        #[arg(short, long)]
        session_id: Option<String>,
    },
}
