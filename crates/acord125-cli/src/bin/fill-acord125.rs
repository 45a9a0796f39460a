use acord125_cli::cli::FillCli;
use acord125_cli::{fill_cmd, shared};
use clap::Parser;

fn main() {
    shared::init_tracing();
    let cli = FillCli::parse();

    if let Err(code) = fill_cmd::run(&cli.options()) {
        std::process::exit(code);
    }
}
