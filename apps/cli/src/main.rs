#![allow(clippy::print_stdout)]

mod cli;
mod commands;

use clap::Parser;
use genu_logger::Logger;

#[genu_runtime::main(cli)]
async fn main() -> anyhow::Result<()> {
    let cli = cli::Cli::parse();
    let _logger = Logger::builder()
        .name(env!("CARGO_PKG_NAME"))
        .console(true)
        .level(cli.log_level())
        .init()?;

    commands::run(cli.command).await
}
