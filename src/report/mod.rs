//! Report generation: table layout, chart overlay and the rendered page

pub mod canvas;
pub mod chart;
pub mod document;
pub mod layout;
pub mod svg;

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use chrono::NaiveDate;
use miette::Diagnostic;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::core::aircraft::{AircraftProfile, Callsign};
use crate::core::balance::{BalanceCalculator, BalanceError};
use crate::core::manifest::LoadManifest;

pub use canvas::{Anchor, Canvas, Color, Font};
pub use chart::{ChartCalibration, ChartError, ChartOverlay, EnvelopeChartMapper, C172S_ENVELOPE};
pub use document::ReportPage;
pub use layout::{ReportLayout, Row};
pub use svg::SvgCanvas;

/// Errors raised while producing a report
#[derive(Debug, Error, Diagnostic)]
pub enum ReportError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Balance(#[from] BalanceError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Chart(#[from] ChartError),

    #[error("Failed to read chart image {path}: {source}")]
    #[diagnostic(
        code(wnb::report::chart_image),
        help("Pass the envelope chart with --chart or set WNB_CHART_IMAGE")
    )]
    ChartImage {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write {path}: {source}")]
    #[diagnostic(code(wnb::report::io))]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// File name of a report: `YYMMDD_<callsign>_weight_and_balance.svg`
pub fn report_file_name(date: NaiveDate, callsign: Callsign) -> String {
    format!(
        "{}_{}_weight_and_balance.svg",
        date.format("%y%m%d"),
        callsign
    )
}

/// `data:` URI embedding an image file
pub fn image_data_uri(path: &Path, bytes: &[u8]) -> String {
    let extension = path
        .extension()
        .map(|e| e.to_string_lossy().to_lowercase())
        .unwrap_or_default();
    let mime = match extension.as_str() {
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        _ => "image/png",
    };
    format!("data:{};base64,{}", mime, STANDARD.encode(bytes))
}

/// A rendered report
#[derive(Debug, Clone)]
pub struct Report {
    pub file_name: String,
    pub svg: String,
    pub layout: ReportLayout,
    pub overlay: ChartOverlay,
}

impl Report {
    /// Compute, lay out and render the report for a frozen manifest
    pub fn generate(
        profile: &AircraftProfile,
        manifest: &LoadManifest,
        calibration: ChartCalibration,
        chart_image: &Path,
        date: NaiveDate,
    ) -> Result<Self, ReportError> {
        let mapper = EnvelopeChartMapper::new(calibration)?;
        let calc = BalanceCalculator::new(profile, manifest);
        let layout = ReportLayout::build(&calc)?;

        let image = std::fs::read(chart_image).map_err(|source| ReportError::ChartImage {
            path: chart_image.display().to_string(),
            source,
        })?;
        let chart_href = image_data_uri(chart_image, &image);

        let page = ReportPage {
            profile,
            layout: &layout,
            mapper: &mapper,
            generated: date,
            chart_href: &chart_href,
        };
        let mut canvas = SvgCanvas::new(canvas::A4_WIDTH, canvas::A4_HEIGHT);
        let overlay = page.render(&mut canvas);

        tracing::debug!(callsign = %profile.callsign(), rows = layout.rows().len(), "rendered report");

        Ok(Self {
            file_name: report_file_name(date, profile.callsign()),
            svg: canvas.finish(),
            layout,
            overlay,
        })
    }

    /// Write the document into `dir`, returning its path
    pub fn write_to(&self, dir: &Path) -> Result<PathBuf, ReportError> {
        let path = dir.join(&self.file_name);
        std::fs::write(&path, &self.svg).map_err(|source| ReportError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Ok(path)
    }
}
