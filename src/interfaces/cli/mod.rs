//! Command-line interface of the `symtensor` binary.

use std::path::{Path, PathBuf};

use anyhow;
use clap::Parser;
use log::LevelFilter;
use log4rs::append::console::{ConsoleAppender, Target};
use log4rs::append::file::FileAppender;
use log4rs::config::{Appender, Config, Logger, Root};
use log4rs::encode::pattern::PatternEncoder;

use crate::io::format::symtensor_output;

const VERSION: Option<&str> = option_env!("CARGO_PKG_VERSION");

/// Logs a nicely formatted `symtensor` heading to the `symtensor-output` logger.
pub fn log_heading() {
    let version = if let Some(ver) = VERSION {
        format!("v{ver}")
    } else {
        "v unknown".to_string()
    };
    symtensor_output!("╭─────────────────────────────────────────────────────────────────────────────────────────────────────╮");
    symtensor_output!("│                                                                                                     │");
    symtensor_output!("│   ███████╗██╗   ██╗███╗   ███╗████████╗███████╗███╗   ██╗███████╗ ██████╗ ██████╗                   │");
    symtensor_output!("│   ██╔════╝╚██╗ ██╔╝████╗ ████║╚══██╔══╝██╔════╝████╗  ██║██╔════╝██╔═══██╗██╔══██╗                  │");
    symtensor_output!("│   ███████╗ ╚████╔╝ ██╔████╔██║   ██║   █████╗  ██╔██╗ ██║███████╗██║   ██║██████╔╝                  │");
    symtensor_output!("│   ╚════██║  ╚██╔╝  ██║╚██╔╝██║   ██║   ██╔══╝  ██║╚██╗██║╚════██║██║   ██║██╔══██╗                  │");
    symtensor_output!("│   ███████║   ██║   ██║ ╚═╝ ██║   ██║   ███████╗██║ ╚████║███████║╚██████╔╝██║  ██║                  │");
    symtensor_output!("│   ╚══════╝   ╚═╝   ╚═╝     ╚═╝   ╚═╝   ╚══════╝╚═╝  ╚═══╝╚══════╝ ╚═════╝ ╚═╝  ╚═╝                  │");
    symtensor_output!("│                                                                                                     │");
    symtensor_output!("│   Symmetric tensors and multipole expansions of gravitational fields                {version:>13}   │");
    symtensor_output!("│                                                                                                     │");
    symtensor_output!("╰─────────────────────────────────────────────────────────────────────────────────────────────────────╯");
    symtensor_output!("");
}

/// Command-line arguments of the `symtensor` binary.
#[derive(Parser)]
#[command(author, version, about)]
pub struct Cli {
    /// Path to a YAML configuration file. If absent, a gravity approximation with default
    /// parameters is run.
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Path to the main output file.
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Also log debugging messages to the console.
    #[arg(short, long)]
    pub debug: bool,
}

/// Initialises logging for the `symtensor` binary.
///
/// The `symtensor-output` logger writes to `output` with a bare message pattern. All other
/// messages go to the console at the warning level, or at the debug level if `debug` is set.
///
/// # Errors
///
/// Errors if the output file cannot be created or if a logger has already been initialised.
pub fn init_logging(output: &Path, debug: bool) -> Result<(), anyhow::Error> {
    let output_appender = FileAppender::builder()
        .encoder(Box::new(PatternEncoder::new("{m}{n}")))
        .append(false)
        .build(output)?;
    let console_appender = ConsoleAppender::builder()
        .target(Target::Stderr)
        .encoder(Box::new(PatternEncoder::new(
            "{d(%Y-%m-%d %H:%M:%S)} {h({l:<5})} {t} - {m}{n}",
        )))
        .build();
    let root_level = if debug {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    };

    let config = Config::builder()
        .appender(Appender::builder().build("output", Box::new(output_appender)))
        .appender(Appender::builder().build("console", Box::new(console_appender)))
        .logger(
            Logger::builder()
                .appender("output")
                .additive(false)
                .build("symtensor-output", LevelFilter::Info),
        )
        .build(Root::builder().appender("console").build(root_level))?;
    log4rs::init_config(config)?;
    Ok(())
}
