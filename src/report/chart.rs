//! Envelope chart overlay: where the centre of gravity and weight lines go
//!
//! The background image shows the certified envelope. Its axes were measured
//! once against the image, so the numbers in [`ChartCalibration`] only make
//! sense together with that image and must be changed together with it.

use miette::Diagnostic;
use serde::Serialize;
use std::fmt;
use thiserror::Error;

use crate::core::balance::{Aggregate, BalanceSummary, Scenario};
use crate::core::units::CM_TO_MM;

/// Map a value from a chart range onto a pixel range
pub fn map_value_to_pixel(
    value: f64,
    graph_min: f64,
    graph_max: f64,
    px_min: f64,
    px_max: f64,
) -> f64 {
    let graph_range = graph_max - graph_min;
    let px_range = px_max - px_min;
    ((value - graph_min) * px_range) / graph_range + px_min
}

/// Chart axis a calibration belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Axis {
    /// Centre of gravity in millimetres, horizontal
    Cog,
    /// Total weight in kilograms, vertical
    Weight,
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Axis::Cog => write!(f, "centre of gravity"),
            Axis::Weight => write!(f, "weight"),
        }
    }
}

/// Errors in a chart calibration
#[derive(Debug, Error, Diagnostic)]
pub enum ChartError {
    #[error("The {axis} axis has an empty range ({graph_min} to {graph_max})")]
    #[diagnostic(
        code(wnb::chart::degenerate_axis),
        help("The two calibration points of an axis must be different chart values")
    )]
    DegenerateAxis {
        axis: Axis,
        graph_min: f64,
        graph_max: f64,
    },

    #[error("The {axis} axis calibration contains a non-finite value")]
    #[diagnostic(code(wnb::chart::non_finite))]
    NonFinite { axis: Axis },
}

/// Two reference points of one axis: chart values and where they sit in the
/// image
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AxisCalibration {
    pub graph_min: f64,
    pub graph_max: f64,
    pub px_min: f64,
    pub px_max: f64,
}

impl AxisCalibration {
    fn validate(&self, axis: Axis) -> Result<(), ChartError> {
        let values = [self.graph_min, self.graph_max, self.px_min, self.px_max];
        if values.iter().any(|v| !v.is_finite()) {
            return Err(ChartError::NonFinite { axis });
        }
        if self.graph_max == self.graph_min {
            return Err(ChartError::DegenerateAxis {
                axis,
                graph_min: self.graph_min,
                graph_max: self.graph_max,
            });
        }
        Ok(())
    }

    pub fn map(&self, value: f64) -> f64 {
        map_value_to_pixel(value, self.graph_min, self.graph_max, self.px_min, self.px_max)
    }
}

/// Everything that ties the overlay to one background image
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ChartCalibration {
    /// Centre of gravity (mm) to horizontal position on the page
    pub cog: AxisCalibration,
    /// Total weight (kg) to distance below the chart origin
    pub weight: AxisCalibration,
    /// Length of the vertical centre of gravity line
    pub cog_line_length: f64,
    /// Horizontal extent of the weight line
    pub weight_line_x: (f64, f64),
    /// Chart origin below the line the image is anchored to
    pub origin_drop: f64,
    /// Image centre below the line the image is anchored to
    pub image_drop: f64,
    /// Image size is the page size divided by this, floored
    pub image_scale: f64,
}

/// Calibration of the Cessna 172S envelope chart
pub const C172S_ENVELOPE: ChartCalibration = ChartCalibration {
    cog: AxisCalibration {
        graph_min: 875.0,
        graph_max: 1225.0,
        px_min: 212.0,
        px_max: 384.25,
    },
    weight: AxisCalibration {
        graph_min: 650.0,
        graph_max: 1050.0,
        px_min: 275.0,
        px_max: 49.75,
    },
    cog_line_length: 285.0,
    weight_line_x: (200.0, 400.0),
    origin_drop: 50.0,
    image_drop: 190.0,
    image_scale: 2.3,
};

/// A straight line between two page points
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Segment {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
}

/// The two lines drawn for one scenario
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LinePair {
    pub scenario: Scenario,
    /// Vertical line at the centre of gravity
    pub cog: Segment,
    /// Horizontal line at the total weight
    pub weight: Segment,
}

/// Lines for both scenarios
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ChartOverlay {
    pub with_fuel: LinePair,
    pub without_fuel: LinePair,
}

/// Placement of the background image
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ImagePlacement {
    /// Centre of the image
    pub center_x: f64,
    pub center_y: f64,
    pub width: f64,
    pub height: f64,
}

/// Maps aggregates onto chart lines for a validated calibration
#[derive(Debug, Clone, Copy)]
pub struct EnvelopeChartMapper {
    calibration: ChartCalibration,
}

impl EnvelopeChartMapper {
    /// Check the calibration once, so mapping never divides by zero
    pub fn new(calibration: ChartCalibration) -> Result<Self, ChartError> {
        calibration.cog.validate(Axis::Cog)?;
        calibration.weight.validate(Axis::Weight)?;
        Ok(Self { calibration })
    }

    pub fn calibration(&self) -> &ChartCalibration {
        &self.calibration
    }

    /// Horizontal page position of a centre of gravity given in centimetres
    pub fn cog_x(&self, cog_cm: f64) -> f64 {
        self.calibration.cog.map(cog_cm * CM_TO_MM)
    }

    /// Distance of a weight line below the chart origin
    pub fn weight_offset(&self, weight_kg: f64) -> f64 {
        self.calibration.weight.map(weight_kg)
    }

    /// Chart origin for a table whose last line sits at `anchor_y`
    pub fn origin_y(&self, anchor_y: f64) -> f64 {
        anchor_y - self.calibration.origin_drop
    }

    /// Where the background image goes for a page of the given size
    pub fn image_placement(&self, anchor_y: f64, page_width: f64, page_height: f64) -> ImagePlacement {
        let scale = self.calibration.image_scale;
        ImagePlacement {
            center_x: (page_width / 2.0).floor(),
            center_y: anchor_y - self.calibration.image_drop,
            width: (page_width / scale).floor(),
            height: (page_height / scale).floor(),
        }
    }

    /// Lines for one scenario
    pub fn line_pair(&self, scenario: Scenario, aggregate: &Aggregate, origin_y: f64) -> LinePair {
        let x = self.cog_x(aggregate.cog_cm);
        let y = origin_y - self.weight_offset(aggregate.weight_kg);
        let (left, right) = self.calibration.weight_line_x;

        LinePair {
            scenario,
            cog: Segment {
                x1: x,
                y1: origin_y,
                x2: x,
                y2: origin_y - self.calibration.cog_line_length,
            },
            weight: Segment {
                x1: left,
                y1: y,
                x2: right,
                y2: y,
            },
        }
    }

    /// Lines for both scenarios
    pub fn overlay(&self, summary: &BalanceSummary, origin_y: f64) -> ChartOverlay {
        ChartOverlay {
            with_fuel: self.line_pair(Scenario::WithFuel, &summary.with_fuel, origin_y),
            without_fuel: self.line_pair(Scenario::WithoutFuel, &summary.without_fuel, origin_y),
        }
    }
}
