use std::error::Error;

use tonic::Status;

use crate::StructuredError;

impl StructuredError {
    /// gRPC status carrying this error across a process boundary
    ///
    /// The status code comes from [`ErrorCode::rpc_code`](crate::ErrorCode::rpc_code)
    /// and the status message is the wire encoding.
    pub fn to_rpc_status(&self) -> Status {
        Status::new(self.code().rpc_code(), self.to_wire())
    }

    /// Decode the error a peer embedded in `status`
    ///
    /// Returns `None` if the status message is not a wire encoding, e.g.
    /// because the status was produced by a transport layer.
    pub fn from_rpc_status(status: &Status) -> Option<Self> {
        Self::from_wire(status.message()).ok()
    }

    /// Recover an error from anything a gRPC call may have returned
    ///
    /// Looks for a [`Status`] in `err` or any of its sources and decodes its
    /// message.
    pub fn recover(err: &(dyn Error + 'static)) -> Option<Self> {
        let status = find_status(err)?;
        Self::from_rpc_status(status)
    }
}

impl From<StructuredError> for Status {
    fn from(err: StructuredError) -> Self {
        err.to_rpc_status()
    }
}

/// Receiving half of the gRPC round-trip
///
/// `None` input, errors without a gRPC status and statuses whose message
/// does not decode all yield `None`. Never panics.
pub fn recover_from_rpc_error(err: Option<&(dyn Error + 'static)>) -> Option<StructuredError> {
    err.and_then(StructuredError::recover)
}

fn find_status<'a>(err: &'a (dyn Error + 'static)) -> Option<&'a Status> {
    let mut current = Some(err);
    while let Some(err) = current {
        if let Some(status) = err.downcast_ref::<Status>() {
            return Some(status);
        }
        current = err.source();
    }
    None
}
