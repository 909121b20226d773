//! Error types for the zoom core
//!
//! Every public transition returns a [`ZoomResult`]. An `Err` means the call
//! was rejected before touching the DOM: no style changed, no listener moved
//! and no callback fired.

/// Errors that can occur in zoom operations
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ZoomError {
    /// An operation was attempted that is not valid in the current state
    InvalidOperation {
        /// The operation that was attempted
        op: &'static str,
        /// Why the operation failed
        reason: &'static str,
    },

    /// The element handed to `open` is not an `<img>`
    NotAnImage,

    /// A selector matched no element
    TargetNotFound(String),

    /// An option value could not be interpreted
    InvalidOption(String),
}

impl ZoomError {
    pub(crate) fn locked(op: &'static str) -> Self {
        Self::InvalidOperation {
            op,
            reason: "a transition is in progress",
        }
    }

    pub(crate) fn not_shown(op: &'static str) -> Self {
        Self::InvalidOperation {
            op,
            reason: "no image is zoomed",
        }
    }

    pub(crate) fn already_shown(op: &'static str) -> Self {
        Self::InvalidOperation {
            op,
            reason: "an image is already zoomed",
        }
    }
}

impl std::fmt::Display for ZoomError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidOperation { op, reason } => {
                write!(f, "invalid operation '{}': {}", op, reason)
            }
            Self::NotAnImage => write!(f, "target is not an image element"),
            Self::TargetNotFound(selector) => write!(f, "no element matches '{}'", selector),
            Self::InvalidOption(msg) => write!(f, "invalid option: {}", msg),
        }
    }
}

impl std::error::Error for ZoomError {}

/// Result type alias for zoom operations
pub type ZoomResult<T> = Result<T, ZoomError>;
