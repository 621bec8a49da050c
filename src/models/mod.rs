pub mod michaelis_menten;

use crate::error::{PKError, PKResult};
use serde::{Deserialize, Serialize};

pub use michaelis_menten::MichaelisMenten;

/// Apparent volume of distribution per kilogram of body weight (L/kg).
pub const VD_PER_KG: f64 = 0.8;

/// Integration step used when none is configured (hours).
pub const DEFAULT_DT: f64 = 0.05;

/// Elimination flux of a single-compartment model.
pub trait EliminationKinetics {
    /// Rate of concentration loss (mg/L/h) at the given plasma concentration.
    fn elimination_rate(&self, concentration: f64) -> f64;
}

/// Immutable input to one simulation run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SimulationParameters {
    pub weight_kg: f64,
    pub vmax_per_kg: f64, // mg/h/kg
    pub km: f64,          // mg/L
    pub dose: f64,        // mg
    pub tau: f64,         // h
    pub t_end: f64,       // h
    pub dt: f64,          // h
}

impl SimulationParameters {
    pub fn volume_of_distribution(&self) -> f64 {
        self.weight_kg * VD_PER_KG
    }
    
    /// Systemic maximum elimination rate (mg/h).
    pub fn vmax(&self) -> f64 {
        self.vmax_per_kg * self.weight_kg
    }
    
    /// Concentration increment produced by one dose.
    pub fn dose_concentration(&self) -> f64 {
        self.dose / self.volume_of_distribution()
    }
    
    /// Rejects configurations outside the physical domain.
    ///
    /// `tau` is not checked here; it only matters to schedule construction
    /// and steady-state analysis.
    pub fn validate(&self) -> PKResult<()> {
        let fields = [
            ("weight", self.weight_kg),
            ("Vmax per kg", self.vmax_per_kg),
            ("Km", self.km),
            ("dose", self.dose),
            ("t_end", self.t_end),
            ("dt", self.dt),
        ];
        for (name, value) in fields {
            if !value.is_finite() {
                return Err(PKError::InvalidParameter(
                    format!("{} must be finite, got {}", name, value)
                ));
            }
        }
        
        if self.dt <= 0.0 {
            return Err(PKError::InvalidParameter(
                format!("Time step must be positive, got {}", self.dt)
            ));
        }
        if self.t_end <= 0.0 {
            return Err(PKError::InvalidParameter(
                format!("Simulation duration must be positive, got {}", self.t_end)
            ));
        }
        if self.volume_of_distribution() <= 0.0 {
            return Err(PKError::InvalidParameter(
                format!("Volume of distribution must be positive (weight {} kg)", self.weight_kg)
            ));
        }
        if self.vmax_per_kg < 0.0 {
            return Err(PKError::InvalidParameter(
                format!("Vmax per kg must not be negative, got {}", self.vmax_per_kg)
            ));
        }
        if self.km < 0.0 {
            return Err(PKError::InvalidParameter(
                format!("Km must not be negative, got {}", self.km)
            ));
        }
        if self.dose < 0.0 {
            return Err(PKError::InvalidParameter(
                format!("Dose must not be negative, got {}", self.dose)
            ));
        }
        
        Ok(())
    }
}

impl Default for SimulationParameters {
    fn default() -> Self {
        Self {
            weight_kg: 70.0,
            vmax_per_kg: 1.16,
            km: 24.1,
            dose: 530.0,
            tau: 24.0,
            t_end: 400.0,
            dt: DEFAULT_DT,
        }
    }
}
