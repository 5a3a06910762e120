//! Structured errors shared by HTTP and gRPC services
//!
//! A [`StructuredError`] carries a code, a client-facing message, an
//! internal diagnostic message and a log level. This crate translates codes
//! between the internal, HTTP and gRPC code spaces, and encodes errors so
//! they survive a gRPC hop intact.

#![allow(clippy::must_use_candidate)]

mod chain;
mod code;
mod error;
mod http_error;
mod level;
mod log;
pub mod message;
mod rpc;
mod wire;

pub use chain::{Annotated, BoxError, annotate, classify, root_cause};
pub use code::{ErrorCode, rpc_ordinal_to_http, rpc_to_http};
pub use error::{ErrorOptions, HttpResult, StructuredError};
pub use http_error::HttpError;
pub use level::LogLevel;
pub use log::{LogRecord, LogSink, TracingSink};
pub use message::{MSG_UNKNOWN, default_message};
pub use rpc::recover_from_rpc_error;
pub use wire::WireError;
