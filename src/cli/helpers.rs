//! Shared helper functions for CLI commands

use console::style;
use miette::{IntoDiagnostic, Result};
use std::path::{Path, PathBuf};

use crate::cli::GlobalOpts;
use crate::core::config::Settings;
use crate::core::loadsheet::LoadSheet;
use crate::core::{AircraftProfile, LoadManifest};

/// Load sheet to use: command line, then settings, then the default name
pub fn load_sheet_path(global: &GlobalOpts, settings: &Settings) -> PathBuf {
    global
        .config
        .clone()
        .unwrap_or_else(|| settings.load_sheet())
}

/// Guidance printed when there is no load sheet to work with
pub fn print_usage(path: &Path) {
    println!();
    println!("{}", style("C172S Weight and Balance Generator").bold());
    println!();
    println!(
        "Add weights to {}. Weights are in kilograms, fuel in liters.",
        style(path.display()).cyan()
    );
    println!(
        "Run {} to create an example load sheet.",
        style("wnb init").yellow()
    );
}

/// Read the load sheet and build the aircraft and its manifest.
///
/// Returns `None` after printing guidance when the sheet does not exist;
/// a missing sheet is not an error.
pub fn load_aircraft(path: &Path) -> Result<Option<(AircraftProfile, LoadManifest)>> {
    if !path.exists() {
        tracing::debug!(path = %path.display(), "no load sheet");
        print_usage(path);
        return Ok(None);
    }

    let sheet = LoadSheet::from_path(path)?;
    let (profile, manifest) = sheet.build()?;
    Ok(Some((profile, manifest)))
}

/// Write records as CSV (`b','`) or TSV (`b'\t'`), quoting where needed
pub fn write_delimited<R: AsRef<[String]>>(records: &[R], delimiter: u8) -> Result<String> {
    let mut writer = csv::WriterBuilder::new()
        .delimiter(delimiter)
        .from_writer(Vec::new());
    for record in records {
        writer.write_record(record.as_ref()).into_diagnostic()?;
    }
    let bytes = writer.into_inner().into_diagnostic()?;
    String::from_utf8(bytes).into_diagnostic()
}

/// Format a number with a fixed number of decimals, or "-" when absent
pub fn format_optional(value: Option<f64>, decimals: usize) -> String {
    match value {
        Some(v) => format!("{:.*}", decimals, v),
        None => "-".to_string(),
    }
}
