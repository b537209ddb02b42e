use std::ffi::CStr;

use sqlpacket_buffer::PacketBuffer;

use crate::config::BuilderConfig;
use crate::error::Result;
use crate::header::{FrameHeader, CONTINUATION_LEN, HEADER_LEN};
use crate::lenenc::{Width, PREFIX_U16, PREFIX_U24, PREFIX_U64};

/// Summary of a finalized packet, handed to the transport layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Packet {
    /// Total bytes in the buffer, headers included.
    pub wire_len: usize,
    /// Number of fragments, including an empty trailing one.
    pub fragments: usize,
    /// Sequence number the next packet on this connection starts from.
    pub next_seq: u8,
}

/// Streams typed values into a [`PacketBuffer`], splitting them into
/// fragments of at most `max_fragment_len` payload bytes.
///
/// Exactly one fragment is open at a time. Its header is written as a
/// placeholder and patched with the real length once it is known: with the
/// `0xFFFFFF` sentinel when the fragment fills up, or with the true length
/// by [`finalize`](Self::finalize).
///
/// A fragment that fills exactly is always followed by a new one, so a
/// payload that is an exact multiple of the cap ends with an empty fragment.
/// Readers rely on that empty fragment to detect the end of the message.
///
/// If a write fails, the builder keeps the state of the last successful
/// append. The message is incomplete at that point and must be discarded.
#[derive(Debug)]
pub struct PacketBuilder<'a> {
    buffer: &'a mut PacketBuffer,
    config: BuilderConfig,
    header_offset: usize,
    fragment_length: usize,
    seq: u8,
    fragments: usize,
}

impl<'a> PacketBuilder<'a> {
    /// Reset `buffer` and open the first fragment with sequence `seq`.
    pub fn new(buffer: &'a mut PacketBuffer, seq: u8) -> Result<Self> {
        Self::with_config(buffer, seq, BuilderConfig::default())
    }

    /// Same as [`new`](Self::new) with an explicit fragment cap.
    pub fn with_config(
        buffer: &'a mut PacketBuffer,
        seq: u8,
        config: BuilderConfig,
    ) -> Result<Self> {
        config.validate()?;
        buffer.reset();

        let mut builder = Self {
            buffer,
            config,
            header_offset: 0,
            fragment_length: 0,
            seq,
            fragments: 0,
        };
        builder.write_header()?;
        Ok(builder)
    }

    fn write_header(&mut self) -> Result<()> {
        self.buffer.ensure_capacity(HEADER_LEN)?;

        self.header_offset = self.buffer.len();
        self.fragment_length = 0;

        self.buffer.append_raw(&FrameHeader::new(0, self.seq).encode());
        self.seq = self.seq.wrapping_add(1);
        self.fragments += 1;

        Ok(())
    }

    fn open_new_fragment(&mut self) -> Result<()> {
        tracing::trace!(
            header_offset = self.header_offset,
            next_seq = self.seq,
            "fragment full, opening continuation"
        );
        self.buffer.patch(self.header_offset, &CONTINUATION_LEN);
        self.write_header()
    }

    /// Patch the open fragment's header with its true length.
    ///
    /// Call once after the last write and before transmitting the buffer.
    pub fn finalize(&mut self) -> Packet {
        let header = FrameHeader::new(self.fragment_length as u32, 0).encode();
        self.buffer.patch(self.header_offset, &header[..3]);

        let packet = Packet {
            wire_len: self.buffer.len(),
            fragments: self.fragments,
            next_seq: self.seq,
        };
        tracing::debug!(
            wire_len = packet.wire_len,
            fragments = packet.fragments,
            next_seq = packet.next_seq,
            "packet finalized"
        );
        packet
    }

    /// Write one byte, rolling over to a new fragment if this one fills.
    pub fn write_u8(&mut self, value: u8) -> Result<()> {
        self.buffer.ensure_capacity(1)?;

        self.buffer.append_u8(value);
        self.fragment_length += 1;

        if self.fragment_length == self.config.max_fragment_len {
            self.open_new_fragment()?;
        }

        Ok(())
    }

    /// Write a little-endian `u16`.
    pub fn write_u16(&mut self, value: u16) -> Result<()> {
        self.write_le(&value.to_le_bytes())
    }

    /// Write the low 24 bits of `value`.
    pub fn write_u24(&mut self, value: u32) -> Result<()> {
        self.write_le(&value.to_le_bytes()[..3])
    }

    /// Write a little-endian `u32`.
    pub fn write_u32(&mut self, value: u32) -> Result<()> {
        self.write_le(&value.to_le_bytes())
    }

    /// Write a little-endian `u64`.
    pub fn write_u64(&mut self, value: u64) -> Result<()> {
        self.write_le(&value.to_le_bytes())
    }

    // Byte-at-a-time so a fragment boundary can fall inside an integer.
    fn write_le(&mut self, bytes: &[u8]) -> Result<()> {
        for &byte in bytes {
            self.write_u8(byte)?;
        }
        Ok(())
    }

    /// Write a length-encoded integer (see [`crate::lenenc`]).
    pub fn write_lenenc(&mut self, value: u64) -> Result<()> {
        match Width::of(value) {
            Width::Literal => self.write_u8(value as u8),
            Width::U16 => {
                self.write_u8(PREFIX_U16)?;
                self.write_u16(value as u16)
            }
            Width::U24 => {
                self.write_u8(PREFIX_U24)?;
                self.write_u24(value as u32)
            }
            Width::U64 => {
                self.write_u8(PREFIX_U64)?;
                self.write_u64(value)
            }
        }
    }

    /// Copy raw bytes, splitting them across fragments as needed.
    ///
    /// Space is reserved one chunk at a time, so at most one fragment's
    /// worth of growth is requested per step.
    pub fn write_buffer(&mut self, data: &[u8]) -> Result<()> {
        let mut data = data;
        let mut remaining = self.config.max_fragment_len - self.fragment_length;

        while data.len() >= remaining {
            let (chunk, rest) = data.split_at(remaining);
            self.append_chunk(chunk)?;
            data = rest;

            self.open_new_fragment()?;
            remaining = self.config.max_fragment_len;
        }

        if !data.is_empty() {
            self.append_chunk(data)?;
        }

        Ok(())
    }

    fn append_chunk(&mut self, chunk: &[u8]) -> Result<()> {
        self.buffer.ensure_capacity(chunk.len())?;

        self.buffer.append_raw(chunk);
        self.fragment_length += chunk.len();

        Ok(())
    }

    /// Write `data` prefixed with its length-encoded length.
    pub fn write_lenenc_buffer(&mut self, data: &[u8]) -> Result<()> {
        self.write_lenenc(data.len() as u64)?;
        self.write_buffer(data)
    }

    /// Write `data` followed by a single `0x00`. Embedded zeros are copied
    /// as-is.
    pub fn write_string(&mut self, data: &[u8]) -> Result<()> {
        self.write_buffer(data)?;
        self.write_u8(0)
    }

    /// Write a UTF-8 string followed by a `0x00` terminator.
    pub fn write_str(&mut self, data: &str) -> Result<()> {
        self.write_string(data.as_bytes())
    }

    /// Write a C string up to its terminator, then the terminator.
    pub fn write_cstr(&mut self, data: &CStr) -> Result<()> {
        self.write_string(data.to_bytes())
    }

    /// Payload bytes written into the open fragment.
    pub fn fragment_length(&self) -> usize {
        self.fragment_length
    }

    /// Offset of the open fragment's header in the buffer.
    pub fn header_offset(&self) -> usize {
        self.header_offset
    }

    /// Sequence number the next fragment will get.
    pub fn next_seq(&self) -> u8 {
        self.seq
    }

    /// Fragments opened so far, the open one included.
    pub fn fragments(&self) -> usize {
        self.fragments
    }

    /// Current builder configuration.
    pub fn config(&self) -> &BuilderConfig {
        &self.config
    }

    /// The bytes written so far. Headers of the open fragment are provisional.
    pub fn as_bytes(&self) -> &[u8] {
        self.buffer.as_bytes()
    }
}
