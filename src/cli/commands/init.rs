//! `wnb init` command - Write an example load sheet

use console::style;
use miette::{IntoDiagnostic, Result};
use std::path::PathBuf;

use crate::cli::helpers::load_sheet_path;
use crate::cli::GlobalOpts;
use crate::core::config::Settings;
use crate::core::loadsheet::LoadSheet;

#[derive(clap::Args, Debug, Default)]
pub struct InitArgs {
    /// File to create (default: the configured load sheet)
    pub path: Option<PathBuf>,

    /// Overwrite an existing load sheet
    #[arg(long)]
    pub force: bool,
}

pub fn run(args: InitArgs, global: &GlobalOpts) -> Result<()> {
    let path = args
        .path
        .unwrap_or_else(|| load_sheet_path(global, &Settings::load()));

    if path.exists() && !args.force {
        println!(
            "{} {} already exists (use --force to overwrite)",
            style("!").yellow(),
            style(path.display()).cyan()
        );
        return Ok(());
    }

    let contents = LoadSheet::template().to_string_for(&path)?;
    std::fs::write(&path, contents).into_diagnostic()?;

    if !global.quiet {
        println!(
            "{} Created load sheet {}",
            style("✓").green(),
            style(path.display()).cyan()
        );
        println!();
        println!("Next steps:");
        println!("  Edit the weights (kg) and fuel (liters) in the file");
        println!("  {} Print the table", style("wnb table").yellow());
        println!("  {} Render the report", style("wnb").yellow());
    }
    Ok(())
}
