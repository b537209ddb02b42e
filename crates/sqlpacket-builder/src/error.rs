use sqlpacket_buffer::AllocationError;

/// Errors that can occur while building a packet.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BuilderError {
    /// The backing buffer could not grow.
    #[error(transparent)]
    Allocation(#[from] AllocationError),

    /// The configured fragment cap is zero or does not fit the header.
    #[error("invalid max fragment length {len} (must be 1..={max})")]
    InvalidFragmentLen { len: usize, max: usize },
}

/// Errors that can occur while walking the fragments of a finalized buffer.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InspectError {
    /// The buffer ends inside a header or a payload.
    #[error("truncated fragment at offset {offset}")]
    Truncated { offset: usize },
}

pub type Result<T> = std::result::Result<T, BuilderError>;
