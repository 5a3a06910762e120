use crate::{ErrorCode, LogLevel, StructuredError};

/// What gets logged for an error: never the client message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LogRecord<'a> {
    pub code: ErrorCode,
    pub internal_message: &'a str,
}

/// Destination for error log records
pub trait LogSink {
    fn log(&self, level: LogLevel, record: &LogRecord<'_>);
}

/// Sink that emits `tracing` events
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl LogSink for TracingSink {
    fn log(&self, level: LogLevel, record: &LogRecord<'_>) {
        let code = record.code.as_i32();
        let internal_message = record.internal_message;

        match level {
            LogLevel::Debug => tracing::debug!(code, internal_message, "structured error"),
            LogLevel::Info => tracing::info!(code, internal_message, "structured error"),
            LogLevel::Warn => tracing::warn!(code, internal_message, "structured error"),
            LogLevel::Error => tracing::error!(code, internal_message, "structured error"),
            LogLevel::Fatal => tracing::error!(code, internal_message, fatal = true, "structured error"),
        }
    }
}

impl StructuredError {
    /// Hand this error to `sink` at its own level
    pub fn log(&self, sink: &dyn LogSink) {
        sink.log(
            self.level(),
            &LogRecord {
                code: self.code(),
                internal_message: self.internal_message(),
            },
        );
    }
}
