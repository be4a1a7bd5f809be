//! Core module - calibration, loads and the balance computation

pub mod aircraft;
pub mod balance;
pub mod config;
pub mod loadsheet;
pub mod manifest;
pub mod units;

pub use aircraft::{AircraftError, AircraftProfile, Callsign, Station, AIRCRAFT_MODEL};
pub use balance::{Aggregate, BalanceCalculator, BalanceError, BalanceSummary, Scenario};
pub use config::Settings;
pub use loadsheet::{LoadSheet, LoadSheetError, StationLoads, DEFAULT_LOAD_SHEET};
pub use manifest::{LoadItem, LoadManifest};
