//! # CLI Argument Definitions

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// The main CLI structure parsing command-line arguments.
#[derive(Debug, Parser)]
#[command(name = "mgate")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(arg_required_else_help = true)]
#[command(about = "Negotiate response formats and transcode payloads through the MediaGate gateway")]
pub struct Cli {
    /// Gateway configuration file (format picked from the extension)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Log gateway decisions to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Resolve the response media type for an Accept header
    Negotiate {
        /// Raw Accept header value (e.g. 'text/html, application/xml;q=0.9')
        #[arg(short, long)]
        accept: String,
        /// Media type used when nothing in the Accept header is supported
        #[arg(short, long)]
        default: Option<String>,
    },
    /// Read a payload in its declared format and write it in the negotiated one
    Transcode {
        /// Media type of the input (e.g. 'application/json')
        #[arg(short = 't', long)]
        content_type: String,
        /// Raw Accept header value
        #[arg(short, long)]
        accept: String,
        /// Media type used when nothing in the Accept header is supported
        #[arg(short, long)]
        default: Option<String>,
        /// Input file, stdin when omitted
        #[arg(short, long)]
        input: Option<PathBuf>,
    },
}
