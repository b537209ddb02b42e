use bytes::{BufMut, Bytes, BytesMut};

use crate::config::BufferConfig;
use crate::error::{AllocationError, Result};

/// Exclusively-owned, growable byte region for one outgoing message.
///
/// Writers reserve space with [`ensure_capacity`](Self::ensure_capacity) and
/// then append with [`append_raw`](Self::append_raw). Bytes already written
/// can be overwritten in place with [`patch`](Self::patch), which is how
/// frame headers get their final length once it is known.
#[derive(Debug)]
pub struct PacketBuffer {
    buf: BytesMut,
    config: BufferConfig,
}

impl PacketBuffer {
    /// Create an unbounded buffer with the default initial capacity.
    pub fn new() -> Self {
        Self::with_config(BufferConfig::default())
    }

    /// Create a buffer with explicit allocation limits.
    pub fn with_config(config: BufferConfig) -> Self {
        let initial = config.initial_capacity.min(config.max_capacity);
        Self {
            buf: BytesMut::with_capacity(initial),
            config,
        }
    }

    /// Make room for at least `additional` more bytes past the current length.
    ///
    /// Capacity at least doubles on growth, but never beyond
    /// `max_capacity`. On failure the buffer is left untouched.
    pub fn ensure_capacity(&mut self, additional: usize) -> Result<()> {
        let len = self.buf.len();
        let required = len
            .checked_add(additional)
            .ok_or(AllocationError::Overflow { len, additional })?;

        if required > self.config.max_capacity {
            tracing::warn!(
                requested = required,
                max = self.config.max_capacity,
                "packet buffer exhausted"
            );
            return Err(AllocationError::CapacityExceeded {
                requested: required,
                max: self.config.max_capacity,
            });
        }

        let capacity = self.buf.capacity();
        if required <= capacity {
            return Ok(());
        }

        let target = required
            .max(capacity.saturating_mul(2))
            .min(self.config.max_capacity);
        tracing::trace!(from = capacity, to = target, "growing packet buffer");
        self.buf.reserve(target - len);
        Ok(())
    }

    /// Append bytes. Callers reserve the space first with `ensure_capacity`.
    pub fn append_raw(&mut self, data: &[u8]) {
        debug_assert!(
            self.buf.capacity() - self.buf.len() >= data.len(),
            "append_raw without ensure_capacity"
        );
        self.buf.put_slice(data);
    }

    /// Append a single byte. Same contract as [`append_raw`](Self::append_raw).
    pub fn append_u8(&mut self, byte: u8) {
        debug_assert!(self.buf.capacity() > self.buf.len());
        self.buf.put_u8(byte);
    }

    /// Overwrite already-written bytes starting at `offset`.
    ///
    /// # Panics
    ///
    /// Panics if `offset + data.len()` is past the current length.
    pub fn patch(&mut self, offset: usize, data: &[u8]) {
        self.buf[offset..offset + data.len()].copy_from_slice(data);
    }

    /// Drop all written bytes, keeping the allocation.
    pub fn reset(&mut self) {
        self.buf.clear();
    }

    /// Number of bytes written.
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// Bytes currently allocated.
    pub fn capacity(&self) -> usize {
        self.buf.capacity()
    }

    /// The bytes written so far.
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf
    }

    /// Allocation limits this buffer was created with.
    pub fn config(&self) -> &BufferConfig {
        &self.config
    }

    /// Freeze the written bytes for transmission.
    pub fn into_bytes(self) -> Bytes {
        self.buf.freeze()
    }
}

impl Default for PacketBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl AsRef<[u8]> for PacketBuffer {
    fn as_ref(&self) -> &[u8] {
        self.as_bytes()
    }
}
