use symred_common::BackendError;

// Exit codes for scripted callers. 2 is left to clap for usage errors.
pub const EXIT_SUCCESS: i32 = 0;
pub const EXIT_GENERIC_FAIL: i32 = 1;
pub const EXIT_INVALID_ARGUMENT: i32 = 3;
pub const EXIT_TYPE_MISMATCH: i32 = 4;
pub const EXIT_INCONSISTENT_LOCATION: i32 = 5;

/// Map a command failure to its process exit code.
///
/// Only [`BackendError`]s get a dedicated code; the lookup sees through any
/// `anyhow` context attached on the way up.
pub fn exit_code_for(err: &anyhow::Error) -> i32 {
    match err.downcast_ref::<BackendError>() {
        Some(BackendError::InvalidArgument { .. }) => EXIT_INVALID_ARGUMENT,
        Some(BackendError::TypeMismatch { .. }) => EXIT_TYPE_MISMATCH,
        Some(BackendError::InconsistentLocation { .. }) => EXIT_INCONSISTENT_LOCATION,
        None => EXIT_GENERIC_FAIL,
    }
}
