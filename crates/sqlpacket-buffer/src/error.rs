/// Errors raised when a [`PacketBuffer`](crate::PacketBuffer) cannot grow.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AllocationError {
    /// Growing would push the buffer past its configured ceiling.
    #[error("allocation failed: {requested} bytes requested, max capacity {max}")]
    CapacityExceeded { requested: usize, max: usize },

    /// The requested length does not fit in `usize`.
    #[error("allocation failed: length overflow ({len} + {additional})")]
    Overflow { len: usize, additional: usize },
}

pub type Result<T> = std::result::Result<T, AllocationError>;
