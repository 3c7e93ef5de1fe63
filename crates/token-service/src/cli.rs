//! Command-line interface definitions for token-tool.

use clap::{Parser, Subcommand};

/// Issue and verify identity tokens from the command line.
///
/// Signing configuration comes from the environment: `TOKEN_SECRET`,
/// `TOKEN_ISSUER`, `TOKEN_VALIDITY_HOURS` and `TOKEN_ISSUER_POLICY`.
#[derive(Debug, Parser)]
#[command(name = "token-tool")]
#[command(about = "Issue and verify signed identity tokens")]
pub struct Cli {
    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    pub json_logs: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Issue a token and print it to stdout
    Issue {
        /// Opaque subject identifier (for example a UUID)
        #[arg(long)]
        subject_id: String,

        /// Opaque subject label (for example an email address)
        #[arg(long, default_value = "")]
        label: String,
    },

    /// Verify a token and print its claims as JSON
    Validate {
        /// Token to verify; read from stdin when omitted
        token: Option<String>,
    },
}
