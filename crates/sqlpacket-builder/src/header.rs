use crate::error::InspectError;

/// Frame header: length (3) + sequence (1) = 4 bytes.
pub const HEADER_LEN: usize = 4;

/// Largest payload a single fragment can carry (24-bit length field).
pub const MAX_FRAGMENT_LEN: usize = 0xFF_FFFF;

/// Length field of a full fragment that is followed by a continuation.
pub const CONTINUATION_LEN: [u8; 3] = [0xFF, 0xFF, 0xFF];

/// A decoded fragment header.
///
/// Wire format:
/// ```text
/// ┌─────────────────────┬──────────┬─────────────────────┐
/// │ Length (3B LE)      │ Seq (1B) │ Payload             │
/// │ 0xFFFFFF = full,    │          │ (Length bytes)      │
/// │ continuation follows│          │                     │
/// └─────────────────────┴──────────┴─────────────────────┘
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameHeader {
    /// Raw 24-bit length field.
    pub payload_len: u32,
    /// Sequence number of this fragment.
    pub seq: u8,
}

impl FrameHeader {
    /// Create a header, keeping only the low 24 bits of `payload_len`.
    pub fn new(payload_len: u32, seq: u8) -> Self {
        Self {
            payload_len: payload_len & 0xFF_FFFF,
            seq,
        }
    }

    /// Encode into the 4 header bytes.
    pub fn encode(&self) -> [u8; HEADER_LEN] {
        let [lo, mid, hi, _] = self.payload_len.to_le_bytes();
        [lo, mid, hi, self.seq]
    }

    /// Decode the first 4 bytes of `src`, or `None` if it is too short.
    pub fn decode(src: &[u8]) -> Option<Self> {
        let [lo, mid, hi, seq] = *src.first_chunk::<HEADER_LEN>()?;
        Some(Self {
            payload_len: u32::from_le_bytes([lo, mid, hi, 0]),
            seq,
        })
    }

    /// True if the length field carries the "full, more follows" sentinel.
    pub fn is_continuation(&self) -> bool {
        self.payload_len == MAX_FRAGMENT_LEN as u32
    }
}

/// One fragment of a finalized packet buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Fragment<'a> {
    /// Byte offset of the header within the buffer.
    pub offset: usize,
    pub header: FrameHeader,
    pub payload: &'a [u8],
}

/// Split a finalized buffer into its fragments.
pub fn split_fragments(wire: &[u8]) -> Result<Vec<Fragment<'_>>, InspectError> {
    split_fragments_with_cap(wire, MAX_FRAGMENT_LEN)
}

/// Split a finalized buffer built with a non-default fragment cap.
///
/// A sentinel length field stands for `cap` payload bytes.
pub fn split_fragments_with_cap(
    wire: &[u8],
    cap: usize,
) -> Result<Vec<Fragment<'_>>, InspectError> {
    let mut fragments = Vec::new();
    let mut offset = 0usize;

    while offset < wire.len() {
        let header =
            FrameHeader::decode(&wire[offset..]).ok_or(InspectError::Truncated { offset })?;
        let payload_len = if header.is_continuation() {
            cap
        } else {
            header.payload_len as usize
        };

        let start = offset + HEADER_LEN;
        let end = start + payload_len;
        let payload = wire
            .get(start..end)
            .ok_or(InspectError::Truncated { offset })?;

        fragments.push(Fragment {
            offset,
            header,
            payload,
        });
        offset = end;
    }

    Ok(fragments)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_layout_is_little_endian() {
        let header = FrameHeader::new(0x0A_0B0C, 7);
        assert_eq!(header.encode(), [0x0C, 0x0B, 0x0A, 7]);
        assert_eq!(FrameHeader::decode(&header.encode()), Some(header));
    }

    #[test]
    fn new_masks_to_24_bits() {
        let header = FrameHeader::new(0x1FF_FFFF, 0);
        assert_eq!(header.payload_len, 0xFF_FFFF);
        assert!(header.is_continuation());
    }

    #[test]
    fn decode_short_input() {
        assert_eq!(FrameHeader::decode(&[1, 0, 0]), None);
    }

    #[test]
    fn sentinel_detection() {
        let header = FrameHeader::decode(&[0xFF, 0xFF, 0xFF, 3]).unwrap();
        assert!(header.is_continuation());
        assert_eq!(header.seq, 3);

        let header = FrameHeader::decode(&[0xFE, 0xFF, 0xFF, 3]).unwrap();
        assert!(!header.is_continuation());
    }

    #[test]
    fn split_walks_every_fragment() {
        let wire = [0xFF, 0xFF, 0xFF, 1, b'a', b'b', 1, 0, 0, 2, b'c'];
        let fragments = split_fragments_with_cap(&wire, 2).unwrap();

        assert_eq!(fragments.len(), 2);
        assert_eq!(fragments[0].offset, 0);
        assert_eq!(fragments[0].header.seq, 1);
        assert_eq!(fragments[0].payload, b"ab");
        assert_eq!(fragments[1].offset, 6);
        assert_eq!(fragments[1].header, FrameHeader::new(1, 2));
        assert_eq!(fragments[1].payload, b"c");
    }

    #[test]
    fn split_empty_buffer() {
        assert!(split_fragments(&[]).unwrap().is_empty());
    }

    #[test]
    fn split_truncated_header() {
        let err = split_fragments(&[0, 0, 0, 0, 0, 0]).unwrap_err();
        assert_eq!(err, InspectError::Truncated { offset: 4 });
    }

    #[test]
    fn split_truncated_payload() {
        let err = split_fragments(&[5, 0, 0, 0, b'x']).unwrap_err();
        assert_eq!(err, InspectError::Truncated { offset: 0 });
    }
}
