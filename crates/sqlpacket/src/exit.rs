use std::fmt;

use sqlpacket_builder::{BuilderError, InspectError};

// Exit code constants.
pub const SUCCESS: i32 = 0;
pub const DATA_INVALID: i32 = 60;
pub const USAGE: i32 = 64;
pub const ALLOCATION_FAILED: i32 = 70;
pub const INTERNAL: i32 = 125;

pub type CliResult<T> = Result<T, CliError>;

#[derive(Debug)]
pub struct CliError {
    pub code: i32,
    pub message: String,
}

impl CliError {
    pub fn new(code: i32, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CliError {}

pub fn builder_error(context: &str, err: BuilderError) -> CliError {
    match err {
        BuilderError::Allocation(_) => {
            CliError::new(ALLOCATION_FAILED, format!("{context}: {err}"))
        }
        BuilderError::InvalidFragmentLen { .. } => {
            CliError::new(USAGE, format!("{context}: {err}"))
        }
    }
}

pub fn inspect_error(context: &str, err: InspectError) -> CliError {
    CliError::new(INTERNAL, format!("{context}: {err}"))
}

#[cfg(test)]
mod tests {
    use sqlpacket_builder::AllocationError;

    use super::*;

    #[test]
    fn allocation_maps_to_dedicated_code() {
        let err = builder_error(
            "encode failed",
            BuilderError::Allocation(AllocationError::CapacityExceeded {
                requested: 9,
                max: 8,
            }),
        );
        assert_eq!(err.code, ALLOCATION_FAILED);
        assert!(err.message.starts_with("encode failed: allocation failed"));
    }

    #[test]
    fn invalid_cap_is_usage_error() {
        let err = builder_error(
            "encode failed",
            BuilderError::InvalidFragmentLen { len: 0, max: 1 },
        );
        assert_eq!(err.code, USAGE);
    }
}
