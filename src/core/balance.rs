//! Balance computation: total weight, moment and centre of gravity
//!
//! Each aggregate is rounded to two decimals where it is computed. The centre
//! of gravity divides the already rounded moment by the already rounded
//! weight and rounds once more.

use miette::Diagnostic;
use serde::Serialize;
use std::fmt;
use thiserror::Error;

use crate::core::aircraft::{AircraftProfile, Station};
use crate::core::manifest::LoadManifest;
use crate::core::units::round2;

/// Whether the fuel station takes part in an aggregate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Scenario {
    /// Aircraft as loaded, with the fuel on board
    WithFuel,
    /// Aircraft with no usable fuel
    WithoutFuel,
}

impl Scenario {
    pub const ALL: [Scenario; 2] = [Scenario::WithFuel, Scenario::WithoutFuel];

    /// Whether a station counts in this scenario. Stations are included or
    /// excluded as a whole.
    pub fn includes(&self, station: Station) -> bool {
        match self {
            Scenario::WithFuel => true,
            Scenario::WithoutFuel => station != Station::Fuel,
        }
    }
}

impl From<bool> for Scenario {
    fn from(with_fuel: bool) -> Self {
        if with_fuel {
            Scenario::WithFuel
        } else {
            Scenario::WithoutFuel
        }
    }
}

impl fmt::Display for Scenario {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scenario::WithFuel => write!(f, "with fuel"),
            Scenario::WithoutFuel => write!(f, "without fuel"),
        }
    }
}

/// Errors raised by the balance computation
#[derive(Debug, Error, Diagnostic)]
pub enum BalanceError {
    #[error("Total weight {scenario} is zero, centre of gravity is undefined")]
    #[diagnostic(
        code(wnb::balance::zero_weight),
        help("Check the load sheet for negative weights cancelling the empty mass")
    )]
    ZeroWeight { scenario: Scenario },

    #[error("Centre of gravity {scenario} is not a finite number")]
    #[diagnostic(code(wnb::balance::non_finite))]
    NonFinite { scenario: Scenario },
}

/// Weight, moment and centre of gravity for one scenario
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Aggregate {
    pub weight_kg: f64,
    pub moment_kg_cm: f64,
    pub cog_cm: f64,
}

/// Aggregates for both fuel scenarios
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BalanceSummary {
    pub with_fuel: Aggregate,
    pub without_fuel: Aggregate,
}

impl BalanceSummary {
    pub fn get(&self, scenario: Scenario) -> &Aggregate {
        match scenario {
            Scenario::WithFuel => &self.with_fuel,
            Scenario::WithoutFuel => &self.without_fuel,
        }
    }
}

/// Pure aggregation over a profile and a frozen manifest
#[derive(Debug, Clone, Copy)]
pub struct BalanceCalculator<'a> {
    profile: &'a AircraftProfile,
    manifest: &'a LoadManifest,
}

impl<'a> BalanceCalculator<'a> {
    pub fn new(profile: &'a AircraftProfile, manifest: &'a LoadManifest) -> Self {
        Self { profile, manifest }
    }

    pub fn profile(&self) -> &'a AircraftProfile {
        self.profile
    }

    pub fn manifest(&self) -> &'a LoadManifest {
        self.manifest
    }

    /// Empty mass plus every included load, rounded to two decimals
    pub fn total_weight(&self, scenario: Scenario) -> f64 {
        let mut total = self.profile.empty_mass_kg();
        for station in Station::REPORT_ORDER {
            if !scenario.includes(station) {
                continue;
            }
            total += self.manifest.station_weight(station);
        }
        round2(total)
    }

    /// Empty moment plus weight × arm of every included load, rounded to two
    /// decimals
    pub fn total_moment(&self, scenario: Scenario) -> f64 {
        let mut total = self.profile.empty_moment();
        for station in Station::ALL {
            if !scenario.includes(station) {
                continue;
            }
            let arm = self.profile.arm(station);
            let station_moment: f64 = self
                .manifest
                .items(station)
                .iter()
                .map(|item| item.weight_kg() * arm)
                .sum();
            total += station_moment;
        }
        round2(total)
    }

    /// Centre of gravity in centimetres aft of the datum
    pub fn cog(&self, scenario: Scenario) -> Result<f64, BalanceError> {
        let weight = self.total_weight(scenario);
        if weight == 0.0 {
            return Err(BalanceError::ZeroWeight { scenario });
        }
        let cog = round2(self.total_moment(scenario) / weight);
        if !cog.is_finite() {
            return Err(BalanceError::NonFinite { scenario });
        }
        Ok(cog)
    }

    /// All three aggregates for one scenario
    pub fn aggregate(&self, scenario: Scenario) -> Result<Aggregate, BalanceError> {
        let aggregate = Aggregate {
            weight_kg: self.total_weight(scenario),
            moment_kg_cm: self.total_moment(scenario),
            cog_cm: self.cog(scenario)?,
        };
        tracing::debug!(
            %scenario,
            weight_kg = aggregate.weight_kg,
            moment_kg_cm = aggregate.moment_kg_cm,
            cog_cm = aggregate.cog_cm,
            "computed aggregate"
        );
        Ok(aggregate)
    }

    /// Aggregates for both scenarios
    pub fn summary(&self) -> Result<BalanceSummary, BalanceError> {
        Ok(BalanceSummary {
            with_fuel: self.aggregate(Scenario::WithFuel)?,
            without_fuel: self.aggregate(Scenario::WithoutFuel)?,
        })
    }
}
