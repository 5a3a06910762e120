use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Faultline error translator
#[derive(Debug, Parser)]
#[command(name = "faultline", about = "Translate structured errors between HTTP and gRPC")]
pub struct Args {
    /// Path to configuration file
    #[arg(short, long, default_value = "faultline.toml", env = "FAULTLINE_CONFIG")]
    pub config: PathBuf,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Show the HTTP and gRPC translation of an error code
    Explain {
        /// Error code, registered or not
        #[arg(allow_negative_numbers = true)]
        code: i32,
    },
    /// Decode a wire-encoded error, e.g. the message of a gRPC status
    Decode {
        /// Wire string
        wire: String,
    },
    /// Show the HTTP status for a gRPC status code
    RpcToHttp {
        /// Numeric `grpc-status` value
        #[arg(allow_negative_numbers = true)]
        ordinal: i32,
    },
    /// Serve the translation tables over HTTP
    Serve {
        /// Override the listen address
        #[arg(long, env = "FAULTLINE_LISTEN")]
        listen: Option<std::net::SocketAddr>,
    },
}
