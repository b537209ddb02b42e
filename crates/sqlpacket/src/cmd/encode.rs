use sqlpacket_buffer::{BufferConfig, PacketBuffer};
use sqlpacket_builder::{split_fragments_with_cap, BuilderConfig, PacketBuilder};

use crate::cmd::EncodeArgs;
use crate::exit::{builder_error, inspect_error, CliError, CliResult, DATA_INVALID, SUCCESS};
use crate::output::{print_packet, OutputFormat};
use crate::value::Value;

pub fn run(args: EncodeArgs, format: OutputFormat) -> CliResult<i32> {
    let values = parse_values(&args.values)?;

    let mut buffer = match args.max_capacity {
        Some(max) => PacketBuffer::with_config(BufferConfig::bounded(max)),
        None => PacketBuffer::new(),
    };
    let config = BuilderConfig::with_max_fragment_len(args.max_fragment_len);

    let mut builder = PacketBuilder::with_config(&mut buffer, args.seq, config)
        .map_err(|err| builder_error("encode failed", err))?;
    for (index, value) in values.iter().enumerate() {
        value.write(&mut builder).map_err(|err| {
            tracing::warn!(index, error = %err, "value write failed");
            builder_error(&format!("encode failed at value {index}"), err)
        })?;
    }
    let packet = builder.finalize();

    let wire = buffer.as_bytes();
    let fragments = split_fragments_with_cap(wire, args.max_fragment_len)
        .map_err(|err| inspect_error("inspect failed", err))?;
    tracing::info!(
        values = values.len(),
        fragments = fragments.len(),
        wire_len = packet.wire_len,
        "packet encoded"
    );

    print_packet(&packet, &fragments, wire, format);
    Ok(SUCCESS)
}

fn parse_values(tokens: &[String]) -> CliResult<Vec<Value>> {
    tokens
        .iter()
        .map(|token| {
            token
                .parse::<Value>()
                .map_err(|err| CliError::new(DATA_INVALID, err.to_string()))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_values_in_order() {
        let tokens = vec!["u8:3".to_string(), "str:db".to_string()];
        let values = parse_values(&tokens).unwrap();
        assert_eq!(values, vec![Value::U8(3), Value::Str("db".to_string())]);
    }

    #[test]
    fn bad_token_is_data_invalid() {
        let tokens = vec!["u8:3".to_string(), "u8:x".to_string()];
        let err = parse_values(&tokens).unwrap_err();
        assert_eq!(err.code, DATA_INVALID);
    }
}
