use std::str::FromStr;

use sqlpacket_builder::PacketBuilder;

/// Bytes written per step when expanding `fill:COUNT:BYTE`.
const FILL_CHUNK: usize = 4096;

/// One typed value from the command line, e.g. `u16:300` or `str:root`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    U8(u8),
    U16(u16),
    U24(u32),
    U32(u32),
    U64(u64),
    Lenenc(u64),
    Str(String),
    LenencStr(String),
    Hex(Vec<u8>),
    LenencHex(Vec<u8>),
    Fill { count: usize, byte: u8 },
}

impl Value {
    pub fn write(&self, builder: &mut PacketBuilder<'_>) -> sqlpacket_builder::Result<()> {
        match self {
            Value::U8(v) => builder.write_u8(*v),
            Value::U16(v) => builder.write_u16(*v),
            Value::U24(v) => builder.write_u24(*v),
            Value::U32(v) => builder.write_u32(*v),
            Value::U64(v) => builder.write_u64(*v),
            Value::Lenenc(v) => builder.write_lenenc(*v),
            Value::Str(s) => builder.write_str(s),
            Value::LenencStr(s) => builder.write_lenenc_buffer(s.as_bytes()),
            Value::Hex(bytes) => builder.write_buffer(bytes),
            Value::LenencHex(bytes) => builder.write_lenenc_buffer(bytes),
            Value::Fill { count, byte } => write_fill(builder, *count, *byte),
        }
    }
}

// Streamed so a huge count hits the buffer ceiling instead of the allocator.
fn write_fill(
    builder: &mut PacketBuilder<'_>,
    count: usize,
    byte: u8,
) -> sqlpacket_builder::Result<()> {
    let chunk = [byte; FILL_CHUNK];
    let mut left = count;
    while left > 0 {
        let n = left.min(FILL_CHUNK);
        builder.write_buffer(&chunk[..n])?;
        left -= n;
    }
    Ok(())
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid value {token:?}: {reason}")]
pub struct ValueError {
    token: String,
    reason: String,
}

impl ValueError {
    fn new(token: &str, reason: impl Into<String>) -> Self {
        Self {
            token: token.to_string(),
            reason: reason.into(),
        }
    }
}

impl FromStr for Value {
    type Err = ValueError;

    fn from_str(token: &str) -> Result<Self, Self::Err> {
        let (kind, body) = token
            .split_once(':')
            .ok_or_else(|| ValueError::new(token, "expected KIND:VALUE"))?;

        let value = match kind {
            "u8" => Value::U8(parse_int(token, body)?),
            "u16" => Value::U16(parse_int(token, body)?),
            "u24" => {
                let v: u32 = parse_int(token, body)?;
                if v > 0xFF_FFFF {
                    return Err(ValueError::new(token, "does not fit in 24 bits"));
                }
                Value::U24(v)
            }
            "u32" => Value::U32(parse_int(token, body)?),
            "u64" => Value::U64(parse_int(token, body)?),
            "lenenc" => Value::Lenenc(parse_int(token, body)?),
            "str" => Value::Str(body.to_string()),
            "lenenc-str" => Value::LenencStr(body.to_string()),
            "hex" => Value::Hex(parse_hex(token, body)?),
            "lenenc-hex" => Value::LenencHex(parse_hex(token, body)?),
            "fill" => {
                let (count, byte) = body
                    .split_once(':')
                    .ok_or_else(|| ValueError::new(token, "expected fill:COUNT:BYTE"))?;
                Value::Fill {
                    count: parse_int(token, count)?,
                    byte: parse_int(token, byte)?,
                }
            }
            other => return Err(ValueError::new(token, format!("unknown kind {other:?}"))),
        };

        Ok(value)
    }
}

/// Parse a decimal or `0x`-prefixed hexadecimal integer.
fn parse_int<T>(token: &str, input: &str) -> Result<T, ValueError>
where
    T: TryFrom<u64>,
{
    let parsed = match input.strip_prefix("0x").or_else(|| input.strip_prefix("0X")) {
        Some(hex) => u64::from_str_radix(hex, 16),
        None => input.parse::<u64>(),
    }
    .map_err(|err| ValueError::new(token, err.to_string()))?;

    T::try_from(parsed).map_err(|_| ValueError::new(token, "out of range"))
}

fn parse_hex(token: &str, input: &str) -> Result<Vec<u8>, ValueError> {
    if input.len() % 2 != 0 {
        return Err(ValueError::new(token, "odd number of hex digits"));
    }
    (0..input.len())
        .step_by(2)
        .map(|i| {
            input
                .get(i..i + 2)
                .and_then(|pair| u8::from_str_radix(pair, 16).ok())
                .ok_or_else(|| ValueError::new(token, "invalid hex digit"))
        })
        .collect()
}

/// Lowercase hex rendering used by every output format.
pub fn to_hex(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{b:02x}")).collect()
}

#[cfg(test)]
mod tests {
    use sqlpacket_buffer::{BufferConfig, PacketBuffer};
    use sqlpacket_builder::BuilderError;

    use super::*;

    #[test]
    fn parses_integers() {
        assert_eq!("u8:255".parse::<Value>(), Ok(Value::U8(255)));
        assert_eq!("u16:0x1234".parse::<Value>(), Ok(Value::U16(0x1234)));
        assert_eq!("u24:16777215".parse::<Value>(), Ok(Value::U24(0xFF_FFFF)));
        assert_eq!("u64:1".parse::<Value>(), Ok(Value::U64(1)));
        assert_eq!("lenenc:251".parse::<Value>(), Ok(Value::Lenenc(251)));
    }

    #[test]
    fn rejects_out_of_range() {
        assert!("u8:256".parse::<Value>().is_err());
        assert!("u24:16777216".parse::<Value>().is_err());
        assert!("u16:-1".parse::<Value>().is_err());
    }

    #[test]
    fn strings_keep_colons() {
        assert_eq!(
            "str:a:b".parse::<Value>(),
            Ok(Value::Str("a:b".to_string()))
        );
        assert_eq!(
            "lenenc-str:".parse::<Value>(),
            Ok(Value::LenencStr(String::new()))
        );
    }

    #[test]
    fn parses_hex_payloads() {
        assert_eq!("hex:00ff7A".parse::<Value>(), Ok(Value::Hex(vec![0x00, 0xFF, 0x7A])));
        assert_eq!("lenenc-hex:".parse::<Value>(), Ok(Value::LenencHex(Vec::new())));
        assert!("hex:abc".parse::<Value>().is_err());
        assert!("hex:zz".parse::<Value>().is_err());
    }

    #[test]
    fn parses_fill() {
        assert_eq!(
            "fill:3:0xAA".parse::<Value>(),
            Ok(Value::Fill {
                count: 3,
                byte: 0xAA
            })
        );
        assert!("fill:3".parse::<Value>().is_err());
    }

    #[test]
    fn rejects_unknown_kind() {
        let err = "i8:1".parse::<Value>().unwrap_err();
        assert_eq!(err.to_string(), "invalid value \"i8:1\": unknown kind \"i8\"");
        assert!("nocolon".parse::<Value>().is_err());
    }

    #[test]
    fn fill_spans_several_chunks() {
        let mut buf = PacketBuffer::new();
        let mut builder = PacketBuilder::new(&mut buf, 0).unwrap();
        Value::Fill {
            count: FILL_CHUNK + 3,
            byte: 0x5A,
        }
        .write(&mut builder)
        .unwrap();
        builder.finalize();

        assert_eq!(buf.len(), 4 + FILL_CHUNK + 3);
        assert!(buf.as_bytes()[4..].iter().all(|&b| b == 0x5A));
    }

    #[test]
    fn huge_fill_stops_at_buffer_ceiling() {
        let mut buf = PacketBuffer::with_config(BufferConfig::bounded(64));
        let mut builder = PacketBuilder::new(&mut buf, 0).unwrap();
        let err = Value::Fill {
            count: usize::MAX,
            byte: 0,
        }
        .write(&mut builder)
        .unwrap_err();

        assert!(matches!(err, BuilderError::Allocation(_)));
        assert_eq!(builder.fragment_length(), 0);
    }

    #[test]
    fn hex_rendering() {
        assert_eq!(to_hex(&[0x00, 0xAB, 0x10]), "00ab10");
        assert_eq!(to_hex(&[]), "");
    }
}
