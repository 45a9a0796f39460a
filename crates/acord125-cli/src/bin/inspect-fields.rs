use acord125_cli::cli::InspectCli;
use acord125_cli::{inspect_cmd, shared};
use clap::Parser;

fn main() {
    shared::init_tracing();
    let cli = InspectCli::parse();

    if let Err(code) = inspect_cmd::run(&cli.options()) {
        std::process::exit(code);
    }
}
