//! `wnb aircraft` command - List calibrated aircraft

use miette::{IntoDiagnostic, Result};
use serde::Serialize;
use tabled::{builder::Builder, settings::Style};

use crate::cli::helpers::write_delimited;
use crate::cli::OutputFormat;
use crate::core::aircraft::{AircraftProfile, Callsign, Station};
use crate::core::units::{format_decimal, round2};

#[derive(clap::Args, Debug, Default)]
pub struct AircraftArgs {
    /// Output format
    #[arg(long, short = 'f', value_enum, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,

    /// Also list the station arms
    #[arg(long)]
    pub arms: bool,
}

#[derive(Serialize)]
struct StationArm {
    station: Station,
    arm_cm: f64,
}

pub fn run(args: AircraftArgs) -> Result<()> {
    print!("{}", render(args.format, args.arms)?);
    Ok(())
}

pub fn render(format: OutputFormat, arms: bool) -> Result<String> {
    let profiles = Callsign::all()
        .iter()
        .map(|c| AircraftProfile::from_callsign(*c))
        .collect::<Result<Vec<_>, _>>()?;
    let station_arms: Vec<StationArm> = Station::ALL
        .iter()
        .map(|s| StationArm {
            station: *s,
            arm_cm: round2(s.arm_cm()),
        })
        .collect();

    let mut records = vec![[
        "Aircraft".to_string(),
        "Empty mass".to_string(),
        "Arm".to_string(),
        "Moment".to_string(),
        "Weighed".to_string(),
    ]];
    for p in &profiles {
        records.push([
            p.callsign().to_string(),
            format!("{} kg", p.empty_mass()),
            format!("{} cm", format_decimal(p.empty_arm_cm())),
            format_decimal(p.empty_moment()),
            p.calibration_date().format("%Y-%m-%d").to_string(),
        ]);
    }

    let output = match format {
        OutputFormat::Json => {
            let value = serde_json::json!({ "aircraft": profiles, "stations": station_arms });
            serde_json::to_string_pretty(&value).into_diagnostic()? + "\n"
        }
        OutputFormat::Yaml => {
            let value = serde_json::json!({ "aircraft": profiles, "stations": station_arms });
            serde_yml::to_string(&value).into_diagnostic()?
        }
        OutputFormat::Csv => write_delimited(&records, b',')?,
        OutputFormat::Tsv => write_delimited(&records, b'\t')?,
        OutputFormat::Table | OutputFormat::Md => {
            let style_md = format == OutputFormat::Md;
            let mut output = table(records, style_md);
            if arms {
                let mut arm_records = vec![["Station".to_string(), "Arm".to_string()]];
                for s in &station_arms {
                    arm_records.push([s.station.label(), format!("{} cm", format_decimal(s.arm_cm))]);
                }
                output.push_str(&table(arm_records, style_md));
            }
            output
        }
    };
    Ok(output)
}

fn table<const N: usize>(records: Vec<[String; N]>, markdown: bool) -> String {
    let mut builder = Builder::default();
    for record in records {
        builder.push_record(record);
    }
    let mut table = builder.build();
    let rendered = if markdown {
        table.with(Style::markdown()).to_string()
    } else {
        table.with(Style::rounded()).to_string()
    };
    rendered + "\n"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lists_every_callsign() {
        let out = render(OutputFormat::Tsv, false).unwrap();
        assert!(out.starts_with("Aircraft\tEmpty mass"));
        assert!(out.contains("D-EXAV\t749 kg\t106.805 cm\t79996.95\t2022-05-10"));
        assert!(out.contains("D-EXBS\t773.16 kg\t101.62 cm\t78568.52\t2017-05-18"));
    }

    #[test]
    fn test_csv_output() {
        let out = render(OutputFormat::Csv, false).unwrap();
        let mut reader = csv::Reader::from_reader(out.as_bytes());
        let rows: Vec<csv::StringRecord> = reader.records().map(|r| r.unwrap()).collect();
        assert_eq!(rows.len(), 2);
        assert_eq!(&rows[1][0], "D-EXBS");
        assert_eq!(&rows[1][1], "773.16 kg");
    }

    #[test]
    fn test_station_arms_in_table() {
        let out = render(OutputFormat::Md, true).unwrap();
        assert!(out.contains("Back seats"));
        assert!(out.contains("185.42 cm"));
    }

    #[test]
    fn test_json_lists_stations() {
        let out = render(OutputFormat::Json, false).unwrap();
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value["aircraft"].as_array().unwrap().len(), 2);
        assert_eq!(value["stations"][4]["station"], "fuel");
        assert_eq!(value["stations"][4]["arm_cm"], 121.92);
    }
}
