//! `wnb report` command - Render the weight and balance report

use chrono::{Local, NaiveDate};
use console::style;
use miette::Result;
use std::path::PathBuf;

use crate::cli::helpers::{load_aircraft, load_sheet_path};
use crate::cli::GlobalOpts;
use crate::core::balance::Aggregate;
use crate::core::config::Settings;
use crate::core::units::format_decimal;
use crate::report::{Report, C172S_ENVELOPE};

#[derive(clap::Args, Debug, Default)]
pub struct ReportArgs {
    /// Directory to write the report to (default: current directory)
    #[arg(long, short = 'o')]
    pub output_dir: Option<PathBuf>,

    /// Envelope chart image to embed (default: wb_c172s.png)
    #[arg(long)]
    pub chart: Option<PathBuf>,

    /// Date printed on the report and used in the file name (YYYY-MM-DD)
    #[arg(long)]
    pub date: Option<NaiveDate>,
}

pub fn run(args: ReportArgs, global: &GlobalOpts) -> Result<()> {
    let settings = Settings::load();
    let path = load_sheet_path(global, &settings);

    let Some((profile, manifest)) = load_aircraft(&path)? else {
        return Ok(());
    };

    let date = args.date.unwrap_or_else(|| Local::now().date_naive());
    let chart = args.chart.unwrap_or_else(|| settings.chart_image());
    let output_dir = args.output_dir.unwrap_or_else(|| settings.output_dir());

    let report = Report::generate(&profile, &manifest, C172S_ENVELOPE, &chart, date)?;
    let written = report.write_to(&output_dir)?;

    if !global.quiet {
        let summary = report.layout.summary();
        println!(
            "{} Wrote {}",
            style("✓").green(),
            style(written.display()).cyan()
        );
        print_aggregate("with fuel", &summary.with_fuel);
        print_aggregate("no usable fuel", &summary.without_fuel);
    }
    Ok(())
}

fn print_aggregate(label: &str, aggregate: &Aggregate) {
    println!(
        "  {:<15} {} kg, CoG {} cm",
        label,
        style(format_decimal(aggregate.weight_kg)).bold(),
        style(format_decimal(aggregate.cog_cm)).bold()
    );
}
