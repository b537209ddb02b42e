use std::io::{IsTerminal, Write};

use clap::ValueEnum;
use comfy_table::{presets::UTF8_FULL, ContentArrangement, Table};
use serde::Serialize;
use sqlpacket_builder::{Fragment, Packet};

use crate::value::to_hex;

/// Payload bytes shown per fragment in table and pretty output.
const PREVIEW_BYTES: usize = 16;

#[derive(Clone, Debug, Copy, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Pretty,
    Raw,
}

impl OutputFormat {
    pub fn default_for_stdout() -> Self {
        if std::io::stdout().is_terminal() {
            Self::Table
        } else {
            Self::Json
        }
    }
}

#[derive(Serialize)]
struct FragmentOutput {
    index: usize,
    offset: usize,
    seq: u8,
    payload_len: usize,
    continuation: bool,
    payload: String,
}

#[derive(Serialize)]
struct PacketOutput {
    wire_len: usize,
    next_seq: u8,
    fragments: Vec<FragmentOutput>,
    wire: String,
}

pub fn print_packet(
    packet: &Packet,
    fragments: &[Fragment<'_>],
    wire: &[u8],
    format: OutputFormat,
) {
    match format {
        OutputFormat::Json => {
            let out = PacketOutput {
                wire_len: packet.wire_len,
                next_seq: packet.next_seq,
                fragments: fragments
                    .iter()
                    .enumerate()
                    .map(|(index, f)| FragmentOutput {
                        index,
                        offset: f.offset,
                        seq: f.header.seq,
                        payload_len: f.payload.len(),
                        continuation: f.header.is_continuation(),
                        payload: to_hex(f.payload),
                    })
                    .collect(),
                wire: to_hex(wire),
            };
            println!(
                "{}",
                serde_json::to_string(&out).unwrap_or_else(|_| "{}".to_string())
            );
        }
        OutputFormat::Table => {
            let mut table = Table::new();
            table
                .load_preset(UTF8_FULL)
                .set_content_arrangement(ContentArrangement::Dynamic)
                .set_header(vec!["#", "OFFSET", "SEQ", "LENGTH", "CONT", "PAYLOAD"]);
            for (index, f) in fragments.iter().enumerate() {
                table.add_row(vec![
                    index.to_string(),
                    f.offset.to_string(),
                    f.header.seq.to_string(),
                    f.payload.len().to_string(),
                    if f.header.is_continuation() { "yes" } else { "no" }.to_string(),
                    payload_preview(f.payload),
                ]);
            }
            println!("{table}");
            println!("wire_len={} next_seq={}", packet.wire_len, packet.next_seq);
        }
        OutputFormat::Pretty => {
            for f in fragments {
                println!(
                    "seq={} len={} cont={} payload={}",
                    f.header.seq,
                    f.payload.len(),
                    f.header.is_continuation(),
                    payload_preview(f.payload)
                );
            }
        }
        OutputFormat::Raw => {
            print_raw(wire);
        }
    }
}

pub fn print_raw(data: &[u8]) {
    let mut out = std::io::stdout();
    let _ = out.write_all(data);
    let _ = out.flush();
}

fn payload_preview(payload: &[u8]) -> String {
    if payload.len() <= PREVIEW_BYTES {
        return to_hex(payload);
    }
    format!(
        "{}… (+{} bytes)",
        to_hex(&payload[..PREVIEW_BYTES]),
        payload.len() - PREVIEW_BYTES
    )
}
