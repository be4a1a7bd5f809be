//! Load sheet files: the aircraft, the payload per station and the fuel
//!
//! A load sheet is read from JSON (`weight_and_balance.json` by default) or
//! YAML. Every key is required and nothing is filled in with defaults. Other
//! keys, such as notes, are ignored.

use miette::{Diagnostic, NamedSource, SourceSpan};
use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::path::Path;
use thiserror::Error;

use crate::core::aircraft::{AircraftError, AircraftProfile, Station};
use crate::core::manifest::LoadManifest;
use crate::core::units::Kilograms;

/// Load sheet file looked up in the working directory
pub const DEFAULT_LOAD_SHEET: &str = "weight_and_balance.json";

/// Named weights at one station, in file order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StationLoads(pub Vec<(String, Kilograms)>);

impl StationLoads {
    pub fn iter(&self) -> impl Iterator<Item = (&str, Kilograms)> {
        self.0.iter().map(|(name, kg)| (name.as_str(), *kg))
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<'de> Deserialize<'de> for StationLoads {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct LoadsVisitor;

        impl<'de> Visitor<'de> for LoadsVisitor {
            type Value = StationLoads;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a map of load names to weights in kilograms")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
                let mut loads = Vec::with_capacity(map.size_hint().unwrap_or(0));
                while let Some((name, kg)) = map.next_entry::<String, Kilograms>()? {
                    loads.push((name, kg));
                }
                Ok(StationLoads(loads))
            }
        }

        deserializer.deserialize_map(LoadsVisitor)
    }
}

impl Serialize for StationLoads {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (name, kg) in &self.0 {
            map.serialize_entry(name, kg)?;
        }
        map.end()
    }
}

/// Contents of a load sheet file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoadSheet {
    /// Aircraft callsign, e.g. `D-EXAV`
    pub plane: String,
    pub front_seats: StationLoads,
    pub back_seats: StationLoads,
    pub front_baggage: StationLoads,
    pub back_baggage: StationLoads,
    /// Fuel on board in liters
    pub fuel: f64,
}

/// Errors raised while reading a load sheet
#[derive(Debug, Error, Diagnostic)]
pub enum LoadSheetError {
    #[error("Failed to read {path}: {source}")]
    #[diagnostic(code(wnb::loadsheet::io))]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid load sheet: {message}")]
    #[diagnostic(code(wnb::loadsheet::parse))]
    Parse {
        #[source_code]
        src: NamedSource<String>,

        #[label("here")]
        span: SourceSpan,

        #[help]
        help: Option<String>,

        message: String,
    },

    #[error("Unsupported load sheet format '{extension}'")]
    #[diagnostic(
        code(wnb::loadsheet::format),
        help("Use a .json, .yaml or .yml file")
    )]
    UnsupportedFormat { extension: String },

    #[error("Failed to write load sheet: {0}")]
    #[diagnostic(code(wnb::loadsheet::serialize))]
    Serialize(String),
}

impl LoadSheet {
    /// Read a load sheet, choosing the parser from the file extension
    pub fn from_path(path: &Path) -> Result<Self, LoadSheetError> {
        let contents = std::fs::read_to_string(path).map_err(|source| LoadSheetError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let filename = path.display().to_string();

        match extension(path).as_str() {
            "json" => Self::from_json_str(&contents, &filename),
            "yaml" | "yml" => Self::from_yaml_str(&contents, &filename),
            other => Err(LoadSheetError::UnsupportedFormat {
                extension: other.to_string(),
            }),
        }
    }

    pub fn from_json_str(source: &str, filename: &str) -> Result<Self, LoadSheetError> {
        serde_json::from_str(source).map_err(|err| {
            parse_error(err.to_string(), source, filename, err.line(), err.column())
        })
    }

    pub fn from_yaml_str(source: &str, filename: &str) -> Result<Self, LoadSheetError> {
        serde_yml::from_str(source).map_err(|err| {
            let (line, column) = err
                .location()
                .map(|loc| (loc.line(), loc.column()))
                .unwrap_or((1, 1));
            parse_error(err.to_string(), source, filename, line, column)
        })
    }

    /// Serialize in the format matching the file extension
    pub fn to_string_for(&self, path: &Path) -> Result<String, LoadSheetError> {
        match extension(path).as_str() {
            "json" => serde_json::to_string_pretty(self)
                .map(|s| s + "\n")
                .map_err(|e| LoadSheetError::Serialize(e.to_string())),
            "yaml" | "yml" => {
                serde_yml::to_string(self).map_err(|e| LoadSheetError::Serialize(e.to_string()))
            }
            other => Err(LoadSheetError::UnsupportedFormat {
                extension: other.to_string(),
            }),
        }
    }

    /// Example sheet written by `wnb init`
    pub fn template() -> Self {
        Self {
            plane: "D-EXAV".to_string(),
            front_seats: StationLoads(vec![
                ("pilot".to_string(), Kilograms::Whole(80)),
                ("passenger".to_string(), Kilograms::Whole(75)),
            ]),
            back_seats: StationLoads::default(),
            front_baggage: StationLoads(vec![("flight bag".to_string(), Kilograms::Whole(5))]),
            back_baggage: StationLoads::default(),
            fuel: 100.0,
        }
    }

    /// Payload of one station
    pub fn station(&self, station: Station) -> Option<&StationLoads> {
        match station {
            Station::FrontSeats => Some(&self.front_seats),
            Station::BackSeats => Some(&self.back_seats),
            Station::FrontBaggage => Some(&self.front_baggage),
            Station::BackBaggage => Some(&self.back_baggage),
            Station::Fuel => None,
        }
    }

    /// Resolve the aircraft and fill a manifest.
    ///
    /// The aircraft is looked up first so an unknown callsign fails before
    /// any load is applied.
    pub fn build(&self) -> Result<(AircraftProfile, LoadManifest), AircraftError> {
        let profile = AircraftProfile::create(&self.plane)?;
        let mut manifest = LoadManifest::new();

        for station in Station::PAYLOAD {
            if let Some(loads) = self.station(station) {
                for (name, kg) in loads.iter() {
                    manifest.load(kg, station, name);
                }
            }
        }
        manifest.fuel(self.fuel);

        tracing::debug!(
            callsign = %profile.callsign(),
            loads = manifest.len(),
            "built manifest"
        );
        Ok((profile, manifest))
    }
}

fn extension(path: &Path) -> String {
    path.extension()
        .map(|e| e.to_string_lossy().to_lowercase())
        .unwrap_or_default()
}

fn parse_error(
    message: String,
    source: &str,
    filename: &str,
    line: usize,
    column: usize,
) -> LoadSheetError {
    let end = line_col_to_offset(source, line, column)
        .saturating_add(1)
        .min(source.len());
    let start = end.saturating_sub(1);
    let help = generate_help(&message);
    LoadSheetError::Parse {
        src: NamedSource::new(filename, source.to_string()),
        span: SourceSpan::from(start..end),
        help,
        message,
    }
}

/// Convert a 1-based line/column to a byte offset
fn line_col_to_offset(source: &str, line: usize, column: usize) -> usize {
    let mut line_start = 0;
    for (index, text) in source.split_inclusive('\n').enumerate() {
        if index + 1 == line {
            let within = text
                .char_indices()
                .nth(column.saturating_sub(1))
                .map(|(i, _)| i)
                .unwrap_or(text.len());
            return line_start + within;
        }
        line_start += text.len();
    }
    source.len().saturating_sub(1)
}

fn generate_help(message: &str) -> Option<String> {
    let msg = message.to_lowercase();

    if msg.contains("missing field") {
        return Some(
            "A load sheet needs plane, front_seats, back_seats, front_baggage, back_baggage and fuel. \
             Use {} for a station without load."
                .to_string(),
        );
    }
    if msg.contains("invalid type") || msg.contains("expected a weight") {
        return Some("Weights are numbers in kilograms, fuel is a number in liters".to_string());
    }
    if msg.contains("trailing comma") {
        return Some("JSON does not allow a comma after the last entry".to_string());
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    const SHEET: &str = r#"{
        "plane": "D-EXAV",
        "front_seats": {"pilot": 80, "Copilot": 72.5},
        "back_seats": {},
        "front_baggage": {"bag": 4},
        "back_baggage": {},
        "fuel": 100
    }"#;

    #[test]
    fn test_parse_json_preserves_order() {
        let sheet = LoadSheet::from_json_str(SHEET, "wb.json").unwrap();
        assert_eq!(sheet.plane, "D-EXAV");
        let names: Vec<_> = sheet.front_seats.iter().map(|(n, _)| n).collect();
        assert_eq!(names, vec!["pilot", "Copilot"]);
        assert_eq!(sheet.fuel, 100.0);
        assert!(sheet.back_seats.is_empty());
    }

    #[test]
    fn test_parse_yaml() {
        let yaml = "plane: D-EXBS\nfront_seats:\n  pilot: 90\nback_seats: {}\nfront_baggage: {}\nback_baggage:\n  tent: 3.5\nfuel: 80\n";
        let sheet = LoadSheet::from_yaml_str(yaml, "wb.yaml").unwrap();
        assert_eq!(sheet.plane, "D-EXBS");
        assert_eq!(
            sheet.back_baggage.0,
            vec![("tent".to_string(), Kilograms::Decimal(3.5))]
        );
    }

    #[test]
    fn test_missing_key_is_an_error() {
        let json = r#"{"plane": "D-EXAV", "front_seats": {}, "back_seats": {}, "front_baggage": {}, "fuel": 10}"#;
        let err = LoadSheet::from_json_str(json, "wb.json").unwrap_err();
        assert!(err.to_string().contains("back_baggage"));
        match err {
            LoadSheetError::Parse { help, .. } => assert!(help.is_some()),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_extra_keys_are_ignored() {
        let json = r#"{"plane": "D-EXAV", "notes": "ferry flight", "front_seats": {"pilot": 80}, "back_seats": {}, "front_baggage": {}, "back_baggage": {}, "fuel": 10}"#;
        let sheet = LoadSheet::from_json_str(json, "wb.json").unwrap();
        assert_eq!(sheet.plane, "D-EXAV");
        assert_eq!(sheet.front_seats.0, vec![("pilot".to_string(), Kilograms::Whole(80))]);
    }

    #[test]
    fn test_non_numeric_weight_is_an_error() {
        let json = SHEET.replace("\"bag\": 4", "\"bag\": \"heavy\"");
        assert!(LoadSheet::from_json_str(&json, "wb.json").is_err());
    }

    #[test]
    fn test_build_fills_manifest() {
        let sheet = LoadSheet::from_json_str(SHEET, "wb.json").unwrap();
        let (profile, manifest) = sheet.build().unwrap();
        assert_eq!(profile.callsign().as_str(), "D-EXAV");
        assert_eq!(manifest.items(Station::FrontSeats).len(), 2);
        assert_eq!(manifest.items(Station::FrontBaggage)[0].name, "Bag");
        assert_eq!(manifest.items(Station::FrontSeats)[0].weight, Kilograms::Whole(80));
        assert_eq!(manifest.items(Station::FrontSeats)[1].weight, Kilograms::Decimal(72.5));
        assert_eq!(manifest.fuel_weight(), Some(71.0));
        assert_eq!(manifest.len(), 4);
    }

    #[test]
    fn test_build_rejects_unknown_aircraft() {
        let mut sheet = LoadSheet::template();
        sheet.plane = "N12345".to_string();
        assert!(matches!(sheet.build(), Err(AircraftError::Unknown { .. })));
    }

    #[test]
    fn test_template_round_trips_through_json() {
        let sheet = LoadSheet::template();
        let json = sheet.to_string_for(Path::new("wb.json")).unwrap();
        assert_eq!(LoadSheet::from_json_str(&json, "wb.json").unwrap(), sheet);
    }

    #[test]
    fn test_unsupported_extension() {
        let sheet = LoadSheet::template();
        let err = sheet.to_string_for(Path::new("wb.toml")).unwrap_err();
        assert!(matches!(err, LoadSheetError::UnsupportedFormat { .. }));
    }

    #[test]
    fn test_line_col_to_offset() {
        let source = "line1\nline2\nline3";
        assert_eq!(line_col_to_offset(source, 1, 1), 0);
        assert_eq!(line_col_to_offset(source, 2, 1), 6);
        assert_eq!(line_col_to_offset(source, 3, 3), 14);
    }
}
