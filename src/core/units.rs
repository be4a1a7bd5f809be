//! Unit conversions and the fixed-precision arithmetic used by every report

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Centimetres per inch
pub const IN_TO_CM: f64 = 2.54;

/// Millimetres per centimetre
pub const CM_TO_MM: f64 = 10.0;

/// Density of 100LL avgas in kilograms per liter
pub const KG_PER_LITER_100LL: f64 = 0.71;

/// Round to two decimal places.
///
/// The value is rounded on its exact binary expansion, so `2.675` becomes
/// `2.67`. Scaling by 100 first can push a value across the halfway point.
pub fn round2(value: f64) -> f64 {
    if !value.is_finite() {
        return value;
    }
    format!("{:.2}", value).parse().unwrap_or(value)
}

/// Render a number the way the load sheet prints it: shortest round-trip
/// digits, always with a fractional part (`71.0`, `93.98`, `79996.95`)
pub fn format_decimal(value: f64) -> String {
    format!("{:?}", value)
}

/// Convert inches to centimetres
pub fn inches_to_cm(inches: f64) -> f64 {
    inches * IN_TO_CM
}

/// Convert a fuel volume in liters of 100LL to kilograms
pub fn fuel_liters_to_kg(liters: f64) -> f64 {
    liters * KG_PER_LITER_100LL
}

/// A mass in kilograms, remembering whether it was given as a whole number.
///
/// Whole masses from a load sheet or the calibration table print without a
/// fractional part (`80 kg`); decimal and computed masses always have one
/// (`71.0 kg`).
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Kilograms {
    Whole(i64),
    Decimal(f64),
}

impl Kilograms {
    pub fn value(&self) -> f64 {
        match self {
            Kilograms::Whole(kg) => *kg as f64,
            Kilograms::Decimal(kg) => *kg,
        }
    }

    /// Round to two decimals. Whole masses are already exact.
    pub fn round2(&self) -> Self {
        match self {
            Kilograms::Whole(_) => *self,
            Kilograms::Decimal(kg) => Kilograms::Decimal(round2(*kg)),
        }
    }
}

impl From<f64> for Kilograms {
    fn from(kg: f64) -> Self {
        Kilograms::Decimal(kg)
    }
}

impl From<i64> for Kilograms {
    fn from(kg: i64) -> Self {
        Kilograms::Whole(kg)
    }
}

impl fmt::Display for Kilograms {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Kilograms::Whole(kg) => write!(f, "{}", kg),
            Kilograms::Decimal(kg) => f.write_str(&format_decimal(*kg)),
        }
    }
}

impl Serialize for Kilograms {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Kilograms::Whole(kg) => serializer.serialize_i64(*kg),
            Kilograms::Decimal(kg) => serializer.serialize_f64(*kg),
        }
    }
}

impl<'de> Deserialize<'de> for Kilograms {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct KilogramsVisitor;

        impl<'de> Visitor<'de> for KilogramsVisitor {
            type Value = Kilograms;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a weight in kilograms")
            }

            fn visit_i64<E: de::Error>(self, v: i64) -> Result<Self::Value, E> {
                Ok(Kilograms::Whole(v))
            }

            fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
                Ok(i64::try_from(v)
                    .map(Kilograms::Whole)
                    .unwrap_or(Kilograms::Decimal(v as f64)))
            }

            fn visit_f64<E: de::Error>(self, v: f64) -> Result<Self::Value, E> {
                Ok(Kilograms::Decimal(v))
            }
        }

        deserializer.deserialize_any(KilogramsVisitor)
    }
}
