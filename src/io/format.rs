//! Nice `symtensor` output formatting.

use std::fmt;

use log;

const SYMTENSOR_BANNER_LENGTH: usize = 103;

/// Logs an error to both the root logger and the `symtensor-output` logger.
macro_rules! symtensor_error {
    ($fmt:expr $(, $($arg:tt)*)?) => {
        log::error!($fmt, $($($arg)*)?);
        log::error!(target: "symtensor-output", $fmt, $($($arg)*)?);
    }
}

/// Logs a main output line to the `symtensor-output` logger.
macro_rules! symtensor_output {
    ($fmt:expr $(, $($arg:tt)*)?) => { log::info!(target: "symtensor-output", $fmt, $($($arg)*)?) }
}

pub(crate) use {symtensor_error, symtensor_output};

/// Logs a nicely formatted section title to the `symtensor-output` logger.
pub(crate) fn log_title(title: &str) {
    let length = title.chars().count().max(SYMTENSOR_BANNER_LENGTH - 6);
    let bar = "─".repeat(length);
    symtensor_output!("┌──{bar}──┐");
    symtensor_output!("│§ {title:^length$} §│");
    symtensor_output!("└──{bar}──┘");
}

/// Writes a nicely formatted subtitle.
pub(crate) fn write_subtitle(f: &mut fmt::Formatter<'_>, subtitle: &str) -> fmt::Result {
    let length = subtitle.chars().count();
    let bar = "═".repeat(length);
    writeln!(f, "{subtitle}")?;
    writeln!(f, "{bar}")?;
    Ok(())
}

/// Logs a nicely formatted subtitle to the `symtensor-output` logger.
pub(crate) fn log_subtitle(subtitle: &str) {
    let length = subtitle.chars().count();
    let bar = "═".repeat(length);
    symtensor_output!("{}", subtitle);
    symtensor_output!("{}", bar);
}

/// Logs a nicely formatted macro-section beginning to the `symtensor-output` logger.
pub(crate) fn log_macsec_begin(sectitle: &str) {
    let width = SYMTENSOR_BANNER_LENGTH - 14;
    let sectitle_space = sectitle.to_string() + " ";
    symtensor_output!("❬❬❬❬❬ [Begin] {sectitle_space:❬<width$}");
}

/// Logs a nicely formatted macro-section ending to the `symtensor-output` logger.
pub(crate) fn log_macsec_end(sectitle: &str) {
    let width = SYMTENSOR_BANNER_LENGTH - 14;
    let sectitle_space = sectitle.to_string() + " ";
    symtensor_output!("❭❭❭❭❭ [ End ] {sectitle_space:❭<width$}");
}

/// Turns a boolean into a string of `yes` or `no`.
pub(crate) fn nice_bool(b: bool) -> String {
    if b {
        "yes".to_string()
    } else {
        "no".to_string()
    }
}

/// A trait for logging `symtensor` outputs nicely.
pub(crate) trait SymtensorOutput: fmt::Debug + fmt::Display {
    /// Logs display output nicely.
    fn log_output_display(&self) {
        let lines = self.to_string();
        lines.lines().for_each(|line| {
            symtensor_output!("{line}");
        })
    }
}

// Blanket implementation
impl<T> SymtensorOutput for T where T: fmt::Debug + fmt::Display {}
