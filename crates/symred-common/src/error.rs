//! Error types for symred

use thiserror::Error;

/// Errors raised while resolving a backend request.
///
/// All variants are terminal for the call that produced them.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BackendError {
    #[error("Invalid backend '{mode}'. Should be one of {allowed:?}")]
    InvalidArgument { mode: String, allowed: &'static [&'static str] },
    #[error("All variables should be either arrays or tensors: {reason}")]
    TypeMismatch { reason: String },
    #[error(
        "Variables have different memory locations: {on_device} on device, {on_host} on host"
    )]
    InconsistentLocation { on_device: usize, on_host: usize },
}

impl BackendError {
    /// Short stable identifier for the error class, used in logs and JSON output.
    pub fn kind(&self) -> &'static str {
        match self {
            BackendError::InvalidArgument { .. } => "invalid_argument",
            BackendError::TypeMismatch { .. } => "type_mismatch",
            BackendError::InconsistentLocation { .. } => "inconsistent_location",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::ALLOWED_MODES;

    #[test]
    fn invalid_argument_lists_allowed_modes() {
        let err =
            BackendError::InvalidArgument { mode: "not_a_mode".to_string(), allowed: ALLOWED_MODES };
        let msg = err.to_string();
        assert!(msg.contains("not_a_mode"), "got: {msg}");
        for mode in ALLOWED_MODES {
            assert!(msg.contains(mode), "missing {mode} in: {msg}");
        }
    }

    #[test]
    fn kinds_are_distinct() {
        let errors = [
            BackendError::InvalidArgument { mode: String::new(), allowed: ALLOWED_MODES },
            BackendError::TypeMismatch { reason: String::new() },
            BackendError::InconsistentLocation { on_device: 1, on_host: 1 },
        ];
        let kinds: std::collections::HashSet<_> = errors.iter().map(BackendError::kind).collect();
        assert_eq!(kinds.len(), 3);
    }
}
