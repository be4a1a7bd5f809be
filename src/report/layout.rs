//! Logical content of the weight and balance table
//!
//! Rows carry values and their printed form only. Where a row lands on the
//! page is decided by the page composer.

use serde::Serialize;

use crate::core::aircraft::{AircraftProfile, Station};
use crate::core::balance::{Aggregate, BalanceCalculator, BalanceError, BalanceSummary};
use crate::core::units::{format_decimal, round2, Kilograms};

pub const WEIGHT_HEADING: &str = "Empty Weight";
pub const ARM_HEADING: &str = "Arm";
pub const MOMENT_HEADING: &str = "Moment";
pub const LOAD_HEADING: &str = "Load";
pub const TOTALS_HEADING: &str = "Totals";

/// Weight × arm = moment line of the table
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LineItem {
    /// Load name; `None` for the empty weight line
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(rename = "weight_kg")]
    pub weight: Kilograms,
    pub arm_cm: f64,
    pub moment: f64,
}

impl LineItem {
    fn empty_weight(profile: &AircraftProfile) -> Self {
        Self {
            name: None,
            weight: profile.empty_mass(),
            arm_cm: profile.empty_arm_cm(),
            moment: profile.empty_moment(),
        }
    }

    /// A load line. Weight and arm are rounded for display and the moment is
    /// the product of the rounded values, so it can differ slightly from the
    /// contribution used in the totals.
    fn load(name: &str, weight: Kilograms, arm_cm: f64) -> Self {
        let weight = weight.round2();
        let arm_cm = round2(arm_cm);
        Self {
            name: Some(name.to_string()),
            weight,
            arm_cm,
            moment: round2(weight.value() * arm_cm),
        }
    }

    pub fn weight_text(&self) -> String {
        format!("{} kg", self.weight)
    }

    pub fn arm_text(&self) -> String {
        format!("{} cm", format_decimal(self.arm_cm))
    }

    pub fn moment_text(&self) -> String {
        format_decimal(self.moment)
    }
}

/// Totals line: weight, moment and centre of gravity
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Totals {
    pub weight_kg: f64,
    pub moment: f64,
    pub cog_cm: f64,
}

impl From<&Aggregate> for Totals {
    fn from(aggregate: &Aggregate) -> Self {
        Self {
            weight_kg: aggregate.weight_kg,
            moment: aggregate.moment_kg_cm,
            cog_cm: aggregate.cog_cm,
        }
    }
}

impl Totals {
    pub fn weight_text(&self) -> String {
        format!("Weight: {} kg", format_decimal(self.weight_kg))
    }

    pub fn moment_text(&self) -> String {
        format!("Moment: {}", format_decimal(self.moment))
    }

    pub fn cog_text(&self) -> String {
        format!("CoG: {}", format_decimal(self.cog_cm))
    }
}

/// One logical row of the table
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Row {
    /// Column headings
    Header,
    EmptyWeight(LineItem),
    /// Heading above the loads
    LoadHeading,
    Station {
        station: Station,
        label: String,
    },
    Load(LineItem),
    Totals(Totals),
}

/// Ordered table rows for one aircraft and manifest
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportLayout {
    rows: Vec<Row>,
    summary: BalanceSummary,
}

impl ReportLayout {
    /// Lay out the table. Fails only if a centre of gravity is undefined.
    pub fn build(calc: &BalanceCalculator<'_>) -> Result<Self, BalanceError> {
        let profile = calc.profile();
        let manifest = calc.manifest();
        let summary = calc.summary()?;

        let mut rows = vec![
            Row::Header,
            Row::EmptyWeight(LineItem::empty_weight(profile)),
            Row::LoadHeading,
        ];

        for station in Station::REPORT_ORDER {
            let items = manifest.items(station);
            if items.is_empty() {
                continue;
            }
            rows.push(Row::Station {
                station,
                label: station.label(),
            });
            let arm = profile.arm(station);
            rows.extend(
                items
                    .iter()
                    .map(|item| Row::Load(LineItem::load(&item.name, item.weight, arm))),
            );
        }

        rows.push(Row::Totals(Totals::from(&summary.with_fuel)));

        Ok(Self { rows, summary })
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// Aggregates the totals were taken from
    pub fn summary(&self) -> &BalanceSummary {
        &self.summary
    }

    /// The totals row
    pub fn totals(&self) -> Totals {
        Totals::from(&self.summary.with_fuel)
    }

    /// Totals with no usable fuel, shown next to the table in terminal output
    pub fn totals_without_fuel(&self) -> Totals {
        Totals::from(&self.summary.without_fuel)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::manifest::LoadManifest;

    fn layout_for(manifest: &LoadManifest) -> ReportLayout {
        let profile = AircraftProfile::create("D-EXAV").unwrap();
        let calc = BalanceCalculator::new(&profile, manifest);
        ReportLayout::build(&calc).unwrap()
    }

    #[test]
    fn test_row_order() {
        let mut manifest = LoadManifest::new();
        manifest.load(60.0, Station::BackSeats, "passenger");
        manifest.load(80.0, Station::FrontSeats, "pilot");
        manifest.load(4.0, Station::FrontBaggage, "bag");
        manifest.fuel(100.0);
        let layout = layout_for(&manifest);

        let kinds: Vec<String> = layout
            .rows()
            .iter()
            .map(|row| match row {
                Row::Header => "header".to_string(),
                Row::EmptyWeight(_) => "empty".to_string(),
                Row::LoadHeading => "load".to_string(),
                Row::Station { label, .. } => label.clone(),
                Row::Load(item) => item.name.clone().unwrap_or_default(),
                Row::Totals(_) => "totals".to_string(),
            })
            .collect();

        assert_eq!(
            kinds,
            vec![
                "header",
                "empty",
                "load",
                "Front seats",
                "Pilot",
                "Front baggage",
                "Bag",
                "Back seats",
                "Passenger",
                "Fuel",
                "Fuel",
                "totals",
            ]
        );
    }

    #[test]
    fn test_empty_weight_row_text() {
        let layout = layout_for(&LoadManifest::new());
        match &layout.rows()[1] {
            Row::EmptyWeight(item) => {
                assert_eq!(item.weight_text(), "749 kg");
                assert_eq!(item.arm_text(), "106.805 cm");
                assert_eq!(item.moment_text(), "79996.95");
            }
            other => panic!("expected empty weight row, got {other:?}"),
        }
    }

    #[test]
    fn test_load_rows_are_rounded_for_display() {
        let mut manifest = LoadManifest::new();
        manifest.load(70.0, Station::BackSeats, "passenger");
        manifest.fuel(100.0);
        let layout = layout_for(&manifest);

        let loads: Vec<&LineItem> = layout
            .rows()
            .iter()
            .filter_map(|row| match row {
                Row::Load(item) => Some(item),
                _ => None,
            })
            .collect();

        assert_eq!(loads[0].arm_text(), "185.42 cm");
        assert_eq!(loads[0].moment_text(), "12979.4");
        assert_eq!(loads[1].weight_text(), "71.0 kg");
        assert_eq!(loads[1].arm_text(), "121.92 cm");
        assert_eq!(loads[1].moment_text(), "8656.32");
    }

    #[test]
    fn test_whole_load_weights_print_without_fraction() {
        let mut manifest = LoadManifest::new();
        manifest.load(Kilograms::Whole(80), Station::FrontSeats, "pilot");
        manifest.load(72.5, Station::FrontSeats, "copilot");
        let layout = layout_for(&manifest);

        let texts: Vec<(String, String)> = layout
            .rows()
            .iter()
            .filter_map(|row| match row {
                Row::Load(item) => Some((item.weight_text(), item.moment_text())),
                _ => None,
            })
            .collect();
        assert_eq!(texts[0], ("80 kg".to_string(), "7518.4".to_string()));
        assert_eq!(texts[1].0, "72.5 kg");
    }

    #[test]
    fn test_totals_use_with_fuel_aggregates() {
        let mut manifest = LoadManifest::new();
        manifest.load(80.0, Station::FrontSeats, "Pilot");
        manifest.fuel(100.0);
        let layout = layout_for(&manifest);

        match layout.rows().last() {
            Some(Row::Totals(totals)) => {
                assert_eq!(totals.weight_text(), "Weight: 900.0 kg");
                assert_eq!(totals.moment_text(), "Moment: 96171.67");
                assert_eq!(totals.cog_text(), "CoG: 106.86");
            }
            other => panic!("expected totals row, got {other:?}"),
        }
        assert_eq!(layout.totals_without_fuel().weight_kg, 829.0);
    }

    #[test]
    fn test_stations_without_loads_are_skipped() {
        let mut manifest = LoadManifest::new();
        manifest.fuel(50.0);
        let layout = layout_for(&manifest);
        let stations: Vec<_> = layout
            .rows()
            .iter()
            .filter_map(|row| match row {
                Row::Station { station, .. } => Some(*station),
                _ => None,
            })
            .collect();
        assert_eq!(stations, vec![Station::Fuel]);
    }

    #[test]
    fn test_layout_is_deterministic() {
        let mut manifest = LoadManifest::new();
        manifest.load(80.0, Station::FrontSeats, "pilot");
        manifest.fuel(100.0);
        assert_eq!(layout_for(&manifest), layout_for(&manifest));
    }

    #[test]
    fn test_rows_serialize_with_kind_tag() {
        let layout = layout_for(&LoadManifest::new());
        let json = serde_json::to_value(layout.rows()).unwrap();
        assert_eq!(json[0]["kind"], "header");
        assert_eq!(json[1]["kind"], "empty_weight");
        assert_eq!(json[1]["weight_kg"], 749.0);
    }
}
