//! Plasma concentration simulation under Michaelis-Menten elimination.
//!
//! The core is two pure functions: [`simulate`] advances concentration over a
//! uniform time grid with impulsive doses and saturable elimination, and
//! [`analyze`] extracts the steady-state peak and trough from the result.

pub mod config;
pub mod dosing;
pub mod error;
pub mod models;
pub mod output;
pub mod simulation;

pub use crate::dosing::DosingSchedule;
pub use crate::error::{PKError, PKResult};
pub use crate::models::SimulationParameters;
pub use crate::simulation::{
    analyze, analyze_with, simulate, ConcentrationSeries, SteadyStatePolicy, SteadyStateWindow,
};
