//! Fragmenting packet builder for MySQL-family client/server protocols.
//!
//! Every packet on the wire is a sequence of fragments, each with:
//! - A 3-byte little-endian payload length (`0xFFFFFF` = full, more follows)
//! - A 1-byte sequence number, incremented per fragment and wrapping at 256
//!
//! [`PacketBuilder`] appends typed values to a
//! [`PacketBuffer`](sqlpacket_buffer::PacketBuffer) and inserts fragment
//! headers as the payload crosses the fragment cap. Callers never see the
//! framing.

pub mod builder;
pub mod config;
pub mod error;
pub mod header;
pub mod lenenc;

pub use builder::{Packet, PacketBuilder};
pub use config::BuilderConfig;
pub use error::{BuilderError, InspectError, Result};
pub use header::{
    split_fragments, split_fragments_with_cap, Fragment, FrameHeader, CONTINUATION_LEN,
    HEADER_LEN, MAX_FRAGMENT_LEN,
};
pub use sqlpacket_buffer::{AllocationError, BufferConfig, PacketBuffer};
