use serde::{Deserialize, Serialize};
use std::path::Path;
use crate::dosing::DosingSchedule;
use crate::error::{PKError, PKResult};
use crate::models::{SimulationParameters, DEFAULT_DT};
use crate::simulation::SteadyStatePolicy;

/// Smallest accepted integration step (h); bounds the grid at 1e7 points.
pub const MIN_DT: f64 = 1e-4;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub model: ModelConfig,
    pub dosing: DosingConfig,
    pub simulation: SimulationConfig,
    pub therapeutic: TherapeuticConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelConfig {
    pub weight_kg: f64,
    pub vmax_per_kg: f64, // mg/h/kg
    pub km: f64,          // mg/L
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DosingConfig {
    pub amount: f64, // mg
    pub repeated: bool,
    pub tau: f64, // h
    pub times: Option<Vec<f64>>, // overrides the generated regimen
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    pub t_end: f64,
    pub dt: f64,
    pub steady_state_policy: SteadyStatePolicy,
}

/// Therapeutic window boundaries; annotation and exposure metrics only.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TherapeuticConfig {
    pub mec: f64, // mg/L
    pub mtc: f64, // mg/L
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self { weight_kg: 70.0, vmax_per_kg: 1.16, km: 24.1 }
    }
}

impl Default for DosingConfig {
    fn default() -> Self {
        Self { amount: 530.0, repeated: true, tau: 24.0, times: None }
    }
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            t_end: 400.0,
            dt: DEFAULT_DT,
            steady_state_policy: SteadyStatePolicy::default(),
        }
    }
}

impl Default for TherapeuticConfig {
    fn default() -> Self {
        Self { mec: 5.0, mtc: 15.0 }
    }
}

fn check_range(name: &str, value: f64, lower: f64, upper: f64) -> PKResult<()> {
    if !(lower..=upper).contains(&value) {
        return Err(PKError::Validation(
            format!("{} must be within [{}, {}], got {}", name, lower, upper, value)
        ));
    }
    Ok(())
}

impl Config {
    pub fn from_file<P: AsRef<Path>>(path: P) -> PKResult<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }
    
    /// Enforces the input bounds accepted from users.
    pub fn validate(&self) -> PKResult<()> {
        check_range("Weight (kg)", self.model.weight_kg, 30.0, 150.0)?;
        check_range("Vmax (mg/h/kg)", self.model.vmax_per_kg, 0.1, 50.0)?;
        check_range("Km (mg/L)", self.model.km, 0.1, 1000.0)?;
        
        self.validate_dosing()?;
        
        check_range("Duration (h)", self.simulation.t_end, 1.0, 1000.0)?;
        check_range("Time step (h)", self.simulation.dt, MIN_DT, 1.0)?;
        
        check_range("MEC (mg/L)", self.therapeutic.mec, 0.0, 1000.0)?;
        check_range("MTC (mg/L)", self.therapeutic.mtc, 0.0, 1000.0)?;
        
        Ok(())
    }
    
    fn validate_dosing(&self) -> PKResult<()> {
        check_range("Dose (mg)", self.dosing.amount, 0.0, 5000.0)?;
        
        if self.dosing.repeated {
            check_range("Dosing interval (h)", self.dosing.tau, 1.0, 48.0)?;
            if self.dosing.tau.fract() != 0.0 {
                return Err(PKError::Validation(
                    format!("Dosing interval must be a whole number of hours, got {}", self.dosing.tau)
                ));
            }
        }
        
        if let Some(times) = &self.dosing.times {
            if times.is_empty() {
                return Err(PKError::InvalidDosing(
                    "At least one dosing time must be specified".to_string()
                ));
            }
        }
        
        Ok(())
    }
    
    pub fn parameters(&self) -> SimulationParameters {
        SimulationParameters {
            weight_kg: self.model.weight_kg,
            vmax_per_kg: self.model.vmax_per_kg,
            km: self.model.km,
            dose: self.dosing.amount,
            tau: self.dosing.tau,
            t_end: self.simulation.t_end,
            dt: self.simulation.dt,
        }
    }
    
    pub fn schedule(&self) -> PKResult<DosingSchedule> {
        DosingSchedule::from_config(&self.dosing, self.simulation.t_end)
    }
}
