use std::path::PathBuf;
use std::process;

use anyhow;
use clap::Parser;

use symtensor::interfaces::cli::{init_logging, log_heading, Cli};
use symtensor::interfaces::input::Input;
use symtensor::interfaces::InputHandle;
use symtensor::io::read_symtensor_yaml;

fn run(cli: &Cli) -> Result<(), anyhow::Error> {
    let input = match cli.config.as_ref() {
        Some(config) => read_symtensor_yaml::<Input, _>(config)?,
        None => Input::default(),
    };
    input.handle()
}

fn main() {
    let cli = Cli::parse();
    let output = cli
        .output
        .clone()
        .unwrap_or_else(|| PathBuf::from("symtensor.out"));
    if let Err(err) = init_logging(&output, cli.debug) {
        eprintln!("Unable to initialise logging: {err}");
        process::exit(1);
    }

    log_heading();
    if let Err(err) = run(&cli) {
        log::error!("{err}");
        process::exit(1);
    }
}
