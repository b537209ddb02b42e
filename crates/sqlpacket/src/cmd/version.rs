use sqlpacket_builder::MAX_FRAGMENT_LEN;

use crate::cmd::VersionArgs;
use crate::exit::{CliResult, SUCCESS};

pub fn run(args: VersionArgs) -> CliResult<i32> {
    if !args.extended {
        println!("sqlpacket {}", env!("CARGO_PKG_VERSION"));
        return Ok(SUCCESS);
    }

    println!("name: sqlpacket");
    println!("version: {}", env!("CARGO_PKG_VERSION"));
    println!(
        "target: {}",
        option_env!("SQLPACKET_BUILD_TARGET").unwrap_or("unknown")
    );
    println!(
        "profile: {}",
        option_env!("SQLPACKET_BUILD_PROFILE").unwrap_or("unknown")
    );
    println!("max_fragment_len: {MAX_FRAGMENT_LEN:#x}");

    Ok(SUCCESS)
}
