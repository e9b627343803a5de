//! CLI command definitions for the `groundchat` binary.
//!
//! Uses clap derive macros for argument parsing. Subcommands are verbs
//! (e.g., `groundchat serve`, `groundchat ask "..."`).

pub mod ask;
pub mod classify;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Chat API that grounds model answers in live web data.
#[derive(Parser)]
#[command(name = "groundchat", version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output machine-readable JSON instead of styled text.
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress all output except errors.
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Detailed output (-v for verbose, -vv for debug/trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Path to config.toml (defaults to the platform config directory).
    #[arg(long, global = true, env = "GROUNDCHAT_CONFIG")]
    pub config: Option<PathBuf>,

    /// Export tracing spans through OpenTelemetry (stdout exporter).
    #[arg(long, global = true)]
    pub otel: bool,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Default log filter for the chosen verbosity, used when RUST_LOG is unset.
    pub fn log_filter(&self) -> &'static str {
        groundchat_observe::tracing_setup::verbosity_filter(self.verbose, self.quiet)
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the HTTP API server.
    Serve {
        /// Port to listen on (overrides server.port).
        #[arg(long)]
        port: Option<u16>,

        /// Host to bind to (overrides server.host).
        #[arg(long)]
        host: Option<String>,
    },

    /// Run one chat turn locally and print its events.
    Ask {
        /// The user message.
        text: String,

        /// Model identifier (defaults to the first configured route's model).
        #[arg(long)]
        model: Option<String>,
    },

    /// Show how an utterance would be classified, without calling anything.
    Classify {
        /// The user message.
        text: String,
    },
}
