use crate::config::TherapeuticConfig;
use serde::{Deserialize, Serialize};

/// Concentration (mg/L) sampled on the integration grid (h).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConcentrationSeries {
    times: Vec<f64>,
    concentrations: Vec<f64>,
}

/// Hours spent below, inside and above the therapeutic window.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct TherapeuticExposure {
    pub below_mec: f64,
    pub within_window: f64,
    pub above_mtc: f64,
}

impl ConcentrationSeries {
    pub(crate) fn new(times: Vec<f64>, concentrations: Vec<f64>) -> Self {
        debug_assert_eq!(times.len(), concentrations.len());
        Self { times, concentrations }
    }
    
    pub fn times(&self) -> &[f64] {
        &self.times
    }
    
    pub fn concentrations(&self) -> &[f64] {
        &self.concentrations
    }
    
    pub fn len(&self) -> usize {
        self.times.len()
    }
    
    pub fn is_empty(&self) -> bool {
        self.times.is_empty()
    }
    
    pub fn points(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.times.iter().copied().zip(self.concentrations.iter().copied())
    }
    
    pub fn get_max_concentration(&self) -> f64 {
        self.concentrations.iter().copied().fold(0.0, f64::max)
    }
    
    pub fn get_min_concentration(&self) -> f64 {
        if self.is_empty() {
            return 0.0;
        }
        self.concentrations.iter().copied().fold(f64::INFINITY, f64::min)
    }
    
    pub fn get_time_to_max(&self) -> Option<f64> {
        self.points()
            .max_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(time, _)| time)
    }
    
    /// Area under the curve by the trapezoidal rule (mg*h/L).
    pub fn get_auc(&self) -> f64 {
        let mut auc = 0.0;
        
        for (t, c) in self.times.windows(2).zip(self.concentrations.windows(2)) {
            auc += (t[1] - t[0]) * (c[0] + c[1]) / 2.0;
        }
        
        auc
    }
    
    /// Concentrations sampled at times within `[start, end]`.
    pub fn window(&self, start: f64, end: f64) -> Vec<f64> {
        self.points()
            .filter(|&(time, _)| time >= start && time <= end)
            .map(|(_, concentration)| concentration)
            .collect()
    }
    
    /// Classifies each grid interval by its starting concentration.
    pub fn get_therapeutic_exposure(&self, window: &TherapeuticConfig) -> TherapeuticExposure {
        let mut exposure = TherapeuticExposure::default();
        
        for (t, &c) in self.times.windows(2).zip(&self.concentrations) {
            let span = t[1] - t[0];
            if c < window.mec {
                exposure.below_mec += span;
            } else if c > window.mtc {
                exposure.above_mtc += span;
            } else {
                exposure.within_window += span;
            }
        }
        
        exposure
    }
}
