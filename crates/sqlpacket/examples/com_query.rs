//! Build a COM_QUERY packet and print its fragments.
//!
//! Run with: cargo run -p sqlpacket --example com-query -- "SELECT 1"

use sqlpacket::buffer::PacketBuffer;
use sqlpacket::builder::{split_fragments, PacketBuilder};

const COM_QUERY: u8 = 0x03;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let sql = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "SELECT @@version".to_string());

    let mut buf = PacketBuffer::new();
    let mut packet = PacketBuilder::new(&mut buf, 0)?;
    packet.write_u8(COM_QUERY)?;
    packet.write_buffer(sql.as_bytes())?;
    let summary = packet.finalize();

    for fragment in split_fragments(buf.as_bytes())? {
        println!(
            "seq={} len={} continuation={}",
            fragment.header.seq,
            fragment.payload.len(),
            fragment.header.is_continuation()
        );
    }
    println!(
        "{} bytes on the wire, next sequence {}",
        summary.wire_len, summary.next_seq
    );

    Ok(())
}
