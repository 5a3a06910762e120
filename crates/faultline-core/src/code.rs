use std::fmt;

use http::StatusCode;
use serde::{Deserialize, Serialize};
use tonic::Code;

/// Application error code, independent of any transport
///
/// The registered values mirror HTTP status numbers, except
/// [`ErrorCode::CLIENT_CLOSED`] which borrows nginx's non-standard 499.
/// Any other `i32` is a legal code; it simply hits the fallback branch of
/// every translation table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ErrorCode(i32);

impl ErrorCode {
    /// Operation succeeded
    pub const SUCCESS: Self = Self(200);
    /// Invalid argument
    pub const BAD_REQUEST: Self = Self(400);
    /// Caller is not authenticated
    pub const UNAUTHORIZED: Self = Self(401);
    /// Caller lacks permission
    pub const FORBIDDEN: Self = Self(403);
    /// Resource does not exist
    pub const NOT_FOUND: Self = Self(404);
    /// Concurrent modification conflict
    pub const CONFLICT: Self = Self(409);
    /// Caller is sending requests too often
    pub const TOO_MANY_REQUESTS: Self = Self(429);
    /// Client closed the connection before the response was sent
    pub const CLIENT_CLOSED: Self = Self(499);
    /// Unexpected server failure
    pub const INTERNAL: Self = Self(500);
    /// Feature is not supported
    pub const NOT_IMPLEMENTED: Self = Self(501);
    /// Service is temporarily unavailable
    pub const UNAVAILABLE: Self = Self(503);
    /// Processing took too long
    pub const TIMEOUT: Self = Self(504);

    /// Every code with a canonical mapping and default message
    pub const REGISTERED: [Self; 12] = [
        Self::SUCCESS,
        Self::BAD_REQUEST,
        Self::UNAUTHORIZED,
        Self::FORBIDDEN,
        Self::NOT_FOUND,
        Self::CONFLICT,
        Self::TOO_MANY_REQUESTS,
        Self::CLIENT_CLOSED,
        Self::INTERNAL,
        Self::NOT_IMPLEMENTED,
        Self::UNAVAILABLE,
        Self::TIMEOUT,
    ];

    /// Wrap a raw code, registered or not
    pub const fn new(code: i32) -> Self {
        Self(code)
    }

    /// Raw numeric value
    pub const fn as_i32(self) -> i32 {
        self.0
    }

    /// Whether the code belongs to the documented enumeration
    pub fn is_registered(self) -> bool {
        Self::REGISTERED.contains(&self)
    }

    /// HTTP status for this code
    ///
    /// `CLIENT_CLOSED` has no entry here and falls through to 500 along
    /// with every unregistered code.
    pub fn http_status(self) -> StatusCode {
        match self {
            Self::SUCCESS => StatusCode::OK,
            Self::BAD_REQUEST => StatusCode::BAD_REQUEST,
            Self::UNAUTHORIZED => StatusCode::UNAUTHORIZED,
            Self::FORBIDDEN => StatusCode::FORBIDDEN,
            Self::NOT_FOUND => StatusCode::NOT_FOUND,
            Self::CONFLICT => StatusCode::CONFLICT,
            Self::TOO_MANY_REQUESTS => StatusCode::TOO_MANY_REQUESTS,
            Self::NOT_IMPLEMENTED => StatusCode::NOT_IMPLEMENTED,
            Self::UNAVAILABLE => StatusCode::SERVICE_UNAVAILABLE,
            Self::TIMEOUT => StatusCode::GATEWAY_TIMEOUT,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// gRPC status code for this code
    ///
    /// Unregistered codes are reinterpreted as a gRPC code ordinal. Ordinals
    /// outside the gRPC range come out as [`Code::Unknown`].
    pub fn rpc_code(self) -> Code {
        match self {
            Self::SUCCESS => Code::Ok,
            Self::BAD_REQUEST => Code::InvalidArgument,
            Self::UNAUTHORIZED => Code::Unauthenticated,
            Self::FORBIDDEN => Code::PermissionDenied,
            Self::NOT_FOUND => Code::NotFound,
            Self::CONFLICT => Code::Aborted,
            Self::TOO_MANY_REQUESTS => Code::ResourceExhausted,
            Self::INTERNAL => Code::Internal,
            Self::NOT_IMPLEMENTED => Code::Unimplemented,
            Self::UNAVAILABLE => Code::Unavailable,
            Self::TIMEOUT => Code::DeadlineExceeded,
            Self::CLIENT_CLOSED => Code::Cancelled,
            Self(other) => Code::from_i32(other),
        }
    }
}

impl Default for ErrorCode {
    fn default() -> Self {
        Self::INTERNAL
    }
}

impl From<i32> for ErrorCode {
    fn from(code: i32) -> Self {
        Self(code)
    }
}

impl From<ErrorCode> for i32 {
    fn from(code: ErrorCode) -> Self {
        code.0
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// HTTP status for a gRPC status code, following the grpc-gateway table
///
/// Independent of [`ErrorCode`]: errors raised by transport or
/// infrastructure layers carry gRPC codes the application never produces.
pub fn rpc_to_http(code: Code) -> StatusCode {
    match code {
        Code::Ok => StatusCode::OK,
        Code::Cancelled => client_closed_status(),
        Code::Unknown | Code::Internal | Code::DataLoss => StatusCode::INTERNAL_SERVER_ERROR,
        Code::InvalidArgument | Code::FailedPrecondition | Code::OutOfRange => StatusCode::BAD_REQUEST,
        Code::DeadlineExceeded => StatusCode::GATEWAY_TIMEOUT,
        Code::NotFound => StatusCode::NOT_FOUND,
        Code::AlreadyExists | Code::Aborted => StatusCode::CONFLICT,
        Code::PermissionDenied => StatusCode::FORBIDDEN,
        Code::Unauthenticated => StatusCode::UNAUTHORIZED,
        Code::ResourceExhausted => StatusCode::TOO_MANY_REQUESTS,
        Code::Unimplemented => StatusCode::NOT_IMPLEMENTED,
        Code::Unavailable => StatusCode::SERVICE_UNAVAILABLE,
    }
}

/// HTTP status for a raw `grpc-status` value
///
/// Ordinals that name no gRPC code map to 500.
pub fn rpc_ordinal_to_http(ordinal: i32) -> StatusCode {
    rpc_to_http(Code::from_i32(ordinal))
}

/// Non-standard 499 status used for client-closed requests
fn client_closed_status() -> StatusCode {
    StatusCode::from_u16(499).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
}
