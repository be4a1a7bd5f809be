//! Aircraft calibration: loading stations, known tails and their weighing data
//!
//! Every profile is built from a static calibration table. Station arms come
//! from the Cessna 172S POH and are identical for every tail of the type; the
//! empty mass and arm come from the individual aircraft's weighing report.

use chrono::NaiveDate;
use miette::Diagnostic;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use crate::core::units::{inches_to_cm, round2, Kilograms};

/// Aircraft model the calibration tables describe
pub const AIRCRAFT_MODEL: &str = "Cessna 172S";

/// A fixed loading location in the aircraft
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Station {
    FrontSeats,
    BackSeats,
    FrontBaggage,
    BackBaggage,
    Fuel,
}

impl Station {
    /// Arm table order, used when summing moments
    pub const ALL: [Station; 5] = [
        Station::FrontSeats,
        Station::BackSeats,
        Station::FrontBaggage,
        Station::BackBaggage,
        Station::Fuel,
    ];

    /// Order in which stations are loaded from a load sheet and printed
    pub const REPORT_ORDER: [Station; 5] = [
        Station::FrontSeats,
        Station::FrontBaggage,
        Station::BackSeats,
        Station::BackBaggage,
        Station::Fuel,
    ];

    /// Stations that take named loads; fuel is only set through a volume
    pub const PAYLOAD: [Station; 4] = [
        Station::FrontSeats,
        Station::FrontBaggage,
        Station::BackSeats,
        Station::BackBaggage,
    ];

    /// Key used in load sheets
    pub fn as_str(&self) -> &'static str {
        match self {
            Station::FrontSeats => "front_seats",
            Station::BackSeats => "back_seats",
            Station::FrontBaggage => "front_baggage",
            Station::BackBaggage => "back_baggage",
            Station::Fuel => "fuel",
        }
    }

    /// Arm from the POH, in inches aft of the datum
    pub fn arm_inches(&self) -> f64 {
        match self {
            Station::FrontSeats => 37.0,
            Station::BackSeats => 73.0,
            Station::FrontBaggage => 95.0,
            Station::BackBaggage => 123.0,
            Station::Fuel => 48.0,
        }
    }

    /// Arm in centimetres
    pub fn arm_cm(&self) -> f64 {
        inches_to_cm(self.arm_inches())
    }

    /// Human readable label: `front_seats` becomes "Front seats"
    pub fn label(&self) -> String {
        let spaced = self.as_str().replace('_', " ");
        let mut chars = spaced.chars();
        match chars.next() {
            Some(first) => first.to_uppercase().chain(chars).collect(),
            None => String::new(),
        }
    }
}

impl fmt::Display for Station {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Registration of a calibrated aircraft
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Callsign {
    #[serde(rename = "D-EXAV")]
    Dexav,
    #[serde(rename = "D-EXBS")]
    Dexbs,
}

impl Callsign {
    pub fn as_str(&self) -> &'static str {
        match self {
            Callsign::Dexav => "D-EXAV",
            Callsign::Dexbs => "D-EXBS",
        }
    }

    /// All calibrated aircraft
    pub fn all() -> &'static [Callsign] {
        &[Callsign::Dexav, Callsign::Dexbs]
    }

    /// Weighing report data for this tail
    pub fn calibration(&self) -> Calibration {
        match self {
            Callsign::Dexbs => Calibration {
                empty_mass: Kilograms::Decimal(773.16),
                empty_arm_cm: 101.62,
                weighed: (2017, 5, 18),
            },
            Callsign::Dexav => Calibration {
                empty_mass: Kilograms::Whole(749),
                empty_arm_cm: 106.805,
                weighed: (2022, 5, 10),
            },
        }
    }
}

impl fmt::Display for Callsign {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Callsign {
    type Err = AircraftError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Callsign::all()
            .iter()
            .copied()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| AircraftError::Unknown {
                callsign: s.to_string(),
                known: known_callsigns(),
            })
    }
}

fn known_callsigns() -> String {
    Callsign::all()
        .iter()
        .map(Callsign::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}

/// One row of the calibration table
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Calibration {
    pub empty_mass: Kilograms,
    pub empty_arm_cm: f64,
    /// Weighing date as (year, month, day)
    pub weighed: (i32, u32, u32),
}

/// Errors raised while building an aircraft profile
#[derive(Debug, Error, Diagnostic)]
pub enum AircraftError {
    #[error("Unknown aircraft '{callsign}'")]
    #[diagnostic(
        code(wnb::aircraft::unknown),
        help("Double check the callsign. Calibrated aircraft: {known}")
    )]
    Unknown { callsign: String, known: String },

    /// Guards the calibration table; every entry is checked by the unit tests
    #[error("Calibration for {callsign} has an invalid weighing date")]
    #[diagnostic(code(wnb::aircraft::calibration))]
    InvalidCalibrationDate { callsign: String },
}

/// Immutable weight and balance calibration of one aircraft
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AircraftProfile {
    callsign: Callsign,
    #[serde(rename = "empty_mass_kg")]
    empty_mass: Kilograms,
    empty_arm_cm: f64,
    empty_moment: f64,
    calibration_date: NaiveDate,
}

impl AircraftProfile {
    /// Look up the calibration for a tail number
    pub fn create(tail_id: &str) -> Result<Self, AircraftError> {
        let callsign: Callsign = tail_id.parse()?;
        Self::from_callsign(callsign)
    }

    /// Build the profile of a known callsign
    pub fn from_callsign(callsign: Callsign) -> Result<Self, AircraftError> {
        let cal = callsign.calibration();
        let (year, month, day) = cal.weighed;
        let calibration_date = NaiveDate::from_ymd_opt(year, month, day).ok_or_else(|| {
            AircraftError::InvalidCalibrationDate {
                callsign: callsign.to_string(),
            }
        })?;

        Ok(Self {
            callsign,
            empty_mass: cal.empty_mass,
            empty_arm_cm: cal.empty_arm_cm,
            empty_moment: round2(cal.empty_mass.value() * cal.empty_arm_cm),
            calibration_date,
        })
    }

    pub fn callsign(&self) -> Callsign {
        self.callsign
    }

    /// Empty mass as written in the weighing report
    pub fn empty_mass(&self) -> Kilograms {
        self.empty_mass
    }

    pub fn empty_mass_kg(&self) -> f64 {
        self.empty_mass.value()
    }

    pub fn empty_arm_cm(&self) -> f64 {
        self.empty_arm_cm
    }

    /// Empty moment in kg·cm, rounded to two decimals
    pub fn empty_moment(&self) -> f64 {
        self.empty_moment
    }

    pub fn calibration_date(&self) -> NaiveDate {
        self.calibration_date
    }

    /// Arm of a station in centimetres
    pub fn arm(&self, station: Station) -> f64 {
        station.arm_cm()
    }

    pub fn model(&self) -> &'static str {
        AIRCRAFT_MODEL
    }
}
