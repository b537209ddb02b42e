/// Default initial allocation: 8 KiB.
pub const DEFAULT_INITIAL_CAPACITY: usize = 8 * 1024;

/// Controls how a [`PacketBuffer`](crate::PacketBuffer) allocates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BufferConfig {
    /// Bytes allocated up front. Clamped to `max_capacity`.
    pub initial_capacity: usize,
    /// Hard ceiling on the buffer length. Default: unbounded.
    pub max_capacity: usize,
}

impl BufferConfig {
    /// A config with the given ceiling and the default initial capacity.
    pub fn bounded(max_capacity: usize) -> Self {
        Self {
            max_capacity,
            ..Self::default()
        }
    }
}

impl Default for BufferConfig {
    fn default() -> Self {
        Self {
            initial_capacity: DEFAULT_INITIAL_CAPACITY,
            max_capacity: usize::MAX,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_unbounded() {
        let cfg = BufferConfig::default();
        assert_eq!(cfg.initial_capacity, DEFAULT_INITIAL_CAPACITY);
        assert_eq!(cfg.max_capacity, usize::MAX);
    }

    #[test]
    fn bounded_keeps_initial_capacity() {
        let cfg = BufferConfig::bounded(64);
        assert_eq!(cfg.max_capacity, 64);
        assert_eq!(cfg.initial_capacity, DEFAULT_INITIAL_CAPACITY);
    }
}
