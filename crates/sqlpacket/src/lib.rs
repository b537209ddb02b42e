//! Outgoing packet framing for MySQL-family database protocols.
//!
//! sqlpacket turns typed values into the fragmented, sequence-numbered
//! packets a MySQL-compatible server expects, without ever exposing the
//! framing to the caller.
//!
//! # Crate Structure
//!
//! - [`buffer`]: Bounded, growable byte buffer that packets are built into
//! - [`builder`]: Typed writers, fragment rollover and header backpatching
//!
//! # Example
//!
//! ```
//! use sqlpacket::buffer::PacketBuffer;
//! use sqlpacket::builder::PacketBuilder;
//!
//! let mut buf = PacketBuffer::new();
//! let mut packet = PacketBuilder::new(&mut buf, 0).unwrap();
//! packet.write_u8(0x03).unwrap();
//! packet.write_buffer(b"SELECT 1").unwrap();
//! let summary = packet.finalize();
//!
//! assert_eq!(summary.next_seq, 1);
//! assert_eq!(&buf.as_bytes()[..4], &[9, 0, 0, 0]);
//! ```

/// Re-export buffer types.
pub mod buffer {
    pub use sqlpacket_buffer::*;
}

/// Re-export builder types.
pub mod builder {
    pub use sqlpacket_builder::*;
}
