//! Context annotation and root-cause classification
//!
//! Intermediate layers wrap errors with [`annotate`] to add diagnostic
//! context as they propagate. [`classify`] walks the `source()` chain back
//! to the root cause and recovers the original [`StructuredError`], if that
//! is what the root is.

use std::error::Error;
use std::fmt;
use std::panic::Location;

use crate::StructuredError;

/// Boxed error accepted by annotation and the middleware adapters
pub type BoxError = Box<dyn Error + Send + Sync + 'static>;

/// An error wrapped with a context message and the call site that added it
#[derive(Debug)]
pub struct Annotated {
    message: String,
    location: &'static Location<'static>,
    source: BoxError,
}

impl Annotated {
    /// Wrap `source` with `message`, recording the caller's location
    #[track_caller]
    pub fn new(source: impl Into<BoxError>, message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            location: Location::caller(),
            source: source.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// Where the annotation was added
    pub const fn location(&self) -> &'static Location<'static> {
        self.location
    }

    /// The wrapped error
    pub fn inner(&self) -> &(dyn Error + Send + Sync + 'static) {
        &*self.source
    }

    /// Unwrap into the wrapped error
    pub fn into_inner(self) -> BoxError {
        self.source
    }
}

impl fmt::Display for Annotated {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.message, self.source)
    }
}

impl Error for Annotated {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        Some(&*self.source)
    }
}

/// Wrap any error with a context message and the caller's location
#[track_caller]
pub fn annotate(err: impl Into<BoxError>, message: impl Into<String>) -> Annotated {
    Annotated::new(err, message)
}

/// Innermost error of a `source()` chain
pub fn root_cause<'a>(err: &'a (dyn Error + 'static)) -> &'a (dyn Error + 'static) {
    let mut current = err;
    while let Some(next) = current.source() {
        current = next;
    }
    current
}

/// The [`StructuredError`] at the root of `err`, if there is one
pub fn classify<'a>(err: &'a (dyn Error + 'static)) -> Option<&'a StructuredError> {
    root_cause(err).downcast_ref::<StructuredError>()
}
