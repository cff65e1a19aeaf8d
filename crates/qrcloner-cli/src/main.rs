//! Binary entrypoint for the `qrcloner` CLI.

use std::process;

#[tokio::main]
async fn main() {
    let exit_code = qrcloner_cli::run().await;
    process::exit(exit_code);
}
