use crate::error::{BuilderError, Result};
use crate::header::MAX_FRAGMENT_LEN;

/// Configuration for the packet builder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BuilderConfig {
    /// Payload bytes per fragment before rolling over. Default: `0xFFFFFF`.
    ///
    /// Peers always expect the protocol maximum; smaller values exist to
    /// exercise fragmentation without multi-megabyte payloads.
    pub max_fragment_len: usize,
}

impl BuilderConfig {
    /// Config with an explicit fragment cap.
    pub fn with_max_fragment_len(max_fragment_len: usize) -> Self {
        Self { max_fragment_len }
    }

    pub(crate) fn validate(&self) -> Result<()> {
        if self.max_fragment_len == 0 || self.max_fragment_len > MAX_FRAGMENT_LEN {
            return Err(BuilderError::InvalidFragmentLen {
                len: self.max_fragment_len,
                max: MAX_FRAGMENT_LEN,
            });
        }
        Ok(())
    }
}

impl Default for BuilderConfig {
    fn default() -> Self {
        Self {
            max_fragment_len: MAX_FRAGMENT_LEN,
        }
    }
}
