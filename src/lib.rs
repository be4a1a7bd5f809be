//! wnb: Cessna 172S weight and balance
//!
//! Computes weight, moment and centre of gravity for a calibrated aircraft
//! from a load sheet and renders a one-page report with the envelope chart.

pub mod cli;
pub mod core;
pub mod report;
