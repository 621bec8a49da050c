use crate::config::DosingConfig;
use crate::error::{PKError, PKResult};
use log::debug;

/// Ordered administration times (hours) of identical doses.
#[derive(Debug, Clone, PartialEq)]
pub struct DosingSchedule {
    times: Vec<f64>,
}

impl DosingSchedule {
    /// One dose at t = 0.
    pub fn single() -> Self {
        Self { times: vec![0.0] }
    }
    
    /// Doses at `0, tau, 2*tau, ...` strictly before `t_end`.
    pub fn repeated(tau: f64, t_end: f64) -> PKResult<Self> {
        if !tau.is_finite() || tau <= 0.0 {
            return Err(PKError::InvalidDosing(
                format!("Dosing interval must be positive, got {}", tau)
            ));
        }
        if !t_end.is_finite() || t_end <= 0.0 {
            return Err(PKError::InvalidDosing(
                format!("Regimen end must be positive, got {}", t_end)
            ));
        }
        
        let times: Vec<f64> = (0..)
            .map(|k| k as f64 * tau)
            .take_while(|&time| time < t_end)
            .collect();
        
        debug!("Repeated regimen: {} doses every {} h before {} h", times.len(), tau, t_end);
        Ok(Self { times })
    }
    
    /// Arbitrary administration times, sorted on construction.
    pub fn from_times(mut times: Vec<f64>) -> PKResult<Self> {
        if times.is_empty() {
            return Err(PKError::InvalidDosing(
                "At least one dosing time must be specified".to_string()
            ));
        }
        if let Some(bad) = times.iter().find(|t| !t.is_finite() || **t < 0.0) {
            return Err(PKError::InvalidDosing(
                format!("Dosing times must be finite and non-negative, got {}", bad)
            ));
        }
        
        times.sort_by(f64::total_cmp);
        Ok(Self { times })
    }
    
    pub fn from_config(config: &DosingConfig, t_end: f64) -> PKResult<Self> {
        match &config.times {
            Some(times) => Self::from_times(times.clone()),
            None if config.repeated => Self::repeated(config.tau, t_end),
            None => Ok(Self::single()),
        }
    }
    
    pub fn times(&self) -> &[f64] {
        &self.times
    }
    
    pub fn len(&self) -> usize {
        self.times.len()
    }
    
    pub fn is_empty(&self) -> bool {
        self.times.is_empty()
    }
    
    /// Maps each dose onto the nearest grid index, i.e. the grid point within
    /// half a step of the dose time. Coincident doses yield repeated indices.
    /// Times beyond the addressable range saturate at `usize::MAX`.
    pub fn grid_indices(&self, dt: f64) -> Vec<usize> {
        self.times
            .iter()
            .map(|&time| (time / dt).round() as usize)
            .collect()
    }
}
