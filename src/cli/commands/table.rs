//! `wnb table` command - Print the weight and balance table

use miette::{IntoDiagnostic, Result};
use serde::Serialize;
use tabled::{builder::Builder, settings::Style};

use crate::cli::helpers::{format_optional, load_aircraft, load_sheet_path, write_delimited};
use crate::cli::{GlobalOpts, OutputFormat};
use crate::core::aircraft::AircraftProfile;
use crate::core::balance::{BalanceCalculator, BalanceSummary};
use crate::core::config::Settings;
use crate::core::manifest::LoadManifest;
use crate::report::layout::{ReportLayout, Row, Totals, LOAD_HEADING};

#[derive(clap::Args, Debug, Default)]
pub struct TableArgs {
    /// Output format
    #[arg(long, short = 'f', value_enum, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,
}

pub fn run(args: TableArgs, global: &GlobalOpts) -> Result<()> {
    let settings = Settings::load();
    let path = load_sheet_path(global, &settings);

    let Some((profile, manifest)) = load_aircraft(&path)? else {
        return Ok(());
    };

    let output = render(&profile, &manifest, args.format)?;
    print!("{}", output);
    Ok(())
}

/// Machine readable form of the table
#[derive(Serialize)]
struct TableDocument<'a> {
    aircraft: &'a AircraftProfile,
    rows: &'a [Row],
    summary: &'a BalanceSummary,
}

/// Render the table for a manifest in the requested format
pub fn render(
    profile: &AircraftProfile,
    manifest: &LoadManifest,
    format: OutputFormat,
) -> Result<String> {
    let calc = BalanceCalculator::new(profile, manifest);
    let layout = ReportLayout::build(&calc)?;

    match format {
        OutputFormat::Json => {
            let doc = document(profile, &layout);
            serde_json::to_string_pretty(&doc)
                .map(|s| s + "\n")
                .into_diagnostic()
        }
        OutputFormat::Yaml => serde_yml::to_string(&document(profile, &layout)).into_diagnostic(),
        OutputFormat::Csv => write_delimited(&records(&layout), b','),
        OutputFormat::Tsv => write_delimited(&records(&layout), b'\t'),
        OutputFormat::Md | OutputFormat::Table => {
            let mut builder = Builder::default();
            for record in records(&layout) {
                builder.push_record(record);
            }
            let mut table = builder.build();
            let rendered = if format == OutputFormat::Md {
                table.with(Style::markdown()).to_string()
            } else {
                table.with(Style::rounded()).to_string()
            };

            let mut output = format!(
                "{} ({}), weighed {}\n",
                profile.callsign(),
                profile.model(),
                profile.calibration_date().format("%d/%m/%y")
            );
            output.push_str(&rendered);
            output.push('\n');
            output.push_str(&no_fuel_line(&layout, manifest));
            Ok(output)
        }
    }
}

fn document<'a>(profile: &'a AircraftProfile, layout: &'a ReportLayout) -> TableDocument<'a> {
    TableDocument {
        aircraft: profile,
        rows: layout.rows(),
        summary: layout.summary(),
    }
}

/// Table records: item, weight, arm, moment
fn records(layout: &ReportLayout) -> Vec<[String; 4]> {
    let mut records = vec![[
        "Item".to_string(),
        "Weight".to_string(),
        "Arm".to_string(),
        "Moment".to_string(),
    ]];

    for row in layout.rows() {
        match row {
            Row::Header | Row::LoadHeading => {}
            Row::EmptyWeight(item) => records.push([
                "Empty weight".to_string(),
                item.weight_text(),
                item.arm_text(),
                item.moment_text(),
            ]),
            Row::Station { label, .. } => records.push([
                format!("{}: {}", LOAD_HEADING, label),
                String::new(),
                String::new(),
                String::new(),
            ]),
            Row::Load(item) => records.push([
                format!("  {}", item.name.as_deref().unwrap_or_default()),
                item.weight_text(),
                item.arm_text(),
                item.moment_text(),
            ]),
            Row::Totals(totals) => records.push(totals_record("Total", totals)),
        }
    }
    records.push(totals_record("Total, no fuel", &layout.totals_without_fuel()));
    records
}

fn totals_record(label: &str, totals: &Totals) -> [String; 4] {
    [
        label.to_string(),
        totals.weight_text(),
        totals.cog_text(),
        totals.moment_text(),
    ]
}

fn no_fuel_line(layout: &ReportLayout, manifest: &LoadManifest) -> String {
    let no_fuel = layout.totals_without_fuel();
    format!(
        "Fuel {} kg; without usable fuel: {}, {}\n",
        format_optional(manifest.fuel_weight(), 2),
        no_fuel.weight_text(),
        no_fuel.cog_text()
    )
}
