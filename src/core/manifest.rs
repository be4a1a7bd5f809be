//! Load manifest: named loads grouped by station

use serde::Serialize;
use std::collections::BTreeMap;

use crate::core::aircraft::Station;
use crate::core::units::{fuel_liters_to_kg, Kilograms};

/// Name of the single item kept at the fuel station
pub const FUEL_ITEM: &str = "Fuel";

/// A named load at a station
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LoadItem {
    pub name: String,
    #[serde(rename = "weight_kg")]
    pub weight: Kilograms,
}

impl LoadItem {
    pub fn weight_kg(&self) -> f64 {
        self.weight.value()
    }
}

/// Loads of one aircraft, per station and in the order they were added
///
/// Every station is present from construction on, so lookups never create
/// stations implicitly. Once the manifest is handed to a calculator or a
/// layout by shared reference it can no longer change.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LoadManifest {
    stations: BTreeMap<Station, Vec<LoadItem>>,
}

impl Default for LoadManifest {
    fn default() -> Self {
        Self::new()
    }
}

impl LoadManifest {
    /// Empty manifest with every station initialised
    pub fn new() -> Self {
        let stations = Station::ALL
            .iter()
            .map(|station| (*station, Vec::new()))
            .collect();
        Self { stations }
    }

    /// Put a load at a station, replacing any load with the same name there.
    ///
    /// Names are compared after capitalisation, so "pilot" and "PILOT" are the
    /// same load. A replaced load keeps its original position.
    pub fn load(&mut self, weight: impl Into<Kilograms>, station: Station, name: &str) {
        let weight = weight.into();
        if weight.value() < 0.0 {
            tracing::warn!(%station, name, weight_kg = weight.value(), "negative load weight");
        }
        self.insert(station, capitalize(name), weight);
    }

    /// Set the fuel on board. Calling this again replaces the previous amount.
    pub fn fuel(&mut self, liters: f64) {
        if liters < 0.0 {
            tracing::warn!(liters, "negative fuel quantity");
        }
        let weight = Kilograms::Decimal(fuel_liters_to_kg(liters));
        self.insert(Station::Fuel, FUEL_ITEM.to_string(), weight);
    }

    fn insert(&mut self, station: Station, name: String, weight: Kilograms) {
        let weight_kg = weight.value();
        let items = self.stations.entry(station).or_default();
        match items.iter_mut().find(|item| item.name == name) {
            Some(existing) => {
                tracing::debug!(%station, name = %name, weight_kg, "replacing load");
                existing.weight = weight;
            }
            None => {
                tracing::debug!(%station, name = %name, weight_kg, "adding load");
                items.push(LoadItem { name, weight });
            }
        }
    }

    /// Items at a station, in insertion order
    pub fn items(&self, station: Station) -> &[LoadItem] {
        self.stations
            .get(&station)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Sum of the weights at a station
    pub fn station_weight(&self, station: Station) -> f64 {
        self.items(station).iter().map(LoadItem::weight_kg).sum()
    }

    /// Weight of the fuel on board, if any was set
    pub fn fuel_weight(&self) -> Option<f64> {
        self.items(Station::Fuel).first().map(LoadItem::weight_kg)
    }

    /// Number of loads across all stations
    pub fn len(&self) -> usize {
        self.stations.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// First character upper case, the rest lower case
pub fn capitalize(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_manifest_is_empty() {
        let manifest = LoadManifest::new();
        assert!(manifest.is_empty());
        for station in Station::ALL {
            assert!(manifest.items(station).is_empty());
        }
        assert_eq!(manifest.fuel_weight(), None);
    }

    #[test]
    fn test_load_preserves_insertion_order() {
        let mut manifest = LoadManifest::new();
        manifest.load(80.0, Station::FrontSeats, "pilot");
        manifest.load(75.0, Station::FrontSeats, "copilot");

        let names: Vec<_> = manifest
            .items(Station::FrontSeats)
            .iter()
            .map(|i| i.name.as_str())
            .collect();
        assert_eq!(names, vec!["Pilot", "Copilot"]);
        assert_eq!(manifest.len(), 2);
    }

    #[test]
    fn test_load_overwrites_case_insensitively() {
        let mut manifest = LoadManifest::new();
        manifest.load(80.0, Station::FrontSeats, "pilot");
        manifest.load(75.0, Station::FrontSeats, "copilot");
        manifest.load(82.5, Station::FrontSeats, "PILOT");

        let items = manifest.items(Station::FrontSeats);
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].name, "Pilot");
        assert_eq!(items[0].weight_kg(), 82.5);
    }

    #[test]
    fn test_same_name_at_different_stations() {
        let mut manifest = LoadManifest::new();
        manifest.load(10.0, Station::FrontBaggage, "bag");
        manifest.load(5.0, Station::BackBaggage, "bag");
        assert_eq!(manifest.station_weight(Station::FrontBaggage), 10.0);
        assert_eq!(manifest.station_weight(Station::BackBaggage), 5.0);
    }

    #[test]
    fn test_fuel_replaces_instead_of_accumulating() {
        let mut manifest = LoadManifest::new();
        manifest.fuel(100.0);
        manifest.fuel(150.0);

        let fuel = manifest.items(Station::Fuel);
        assert_eq!(fuel.len(), 1);
        assert_eq!(fuel[0].name, FUEL_ITEM);
        assert_eq!(fuel[0].weight_kg(), 106.5);
        assert_eq!(manifest.fuel_weight(), Some(106.5));
    }

    #[test]
    fn test_whole_weights_stay_whole() {
        let mut manifest = LoadManifest::new();
        manifest.load(Kilograms::Whole(80), Station::FrontSeats, "pilot");
        manifest.fuel(100.0);

        assert_eq!(manifest.items(Station::FrontSeats)[0].weight, Kilograms::Whole(80));
        assert_eq!(manifest.items(Station::Fuel)[0].weight, Kilograms::Decimal(71.0));
        assert_eq!(manifest.station_weight(Station::FrontSeats), 80.0);
    }

    #[test]
    fn test_negative_weight_is_accepted() {
        let mut manifest = LoadManifest::new();
        manifest.load(-2.0, Station::BackSeats, "ballast");
        assert_eq!(manifest.station_weight(Station::BackSeats), -2.0);
    }

    #[test]
    fn test_capitalize() {
        assert_eq!(capitalize("pilot"), "Pilot");
        assert_eq!(capitalize("FLIGHT BAG"), "Flight bag");
        assert_eq!(capitalize("éclair"), "Éclair");
        assert_eq!(capitalize(""), "");
    }
}
