//! Growable byte buffer for outgoing protocol packets.
//!
//! This is the lowest layer of sqlpacket. A [`PacketBuffer`] is an
//! exclusively-owned, contiguous byte region that only ever grows through
//! [`PacketBuffer::ensure_capacity`]. Growth is bounded by
//! [`BufferConfig::max_capacity`] so that exhaustion is deterministic and
//! reported as an [`AllocationError`] instead of aborting the process.

pub mod buffer;
pub mod config;
pub mod error;

pub use buffer::PacketBuffer;
pub use config::{BufferConfig, DEFAULT_INITIAL_CAPACITY};
pub use error::{AllocationError, Result};
