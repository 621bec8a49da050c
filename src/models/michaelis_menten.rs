use super::{EliminationKinetics, SimulationParameters};

/// Saturable elimination: `(Vmax / Vd) * C / (Km + C)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MichaelisMenten {
    vmax: f64, // mg/h
    vd: f64,   // L
    km: f64,   // mg/L
}

impl MichaelisMenten {
    pub fn new(vmax: f64, vd: f64, km: f64) -> Self {
        Self { vmax, vd, km }
    }
    
    pub fn from_parameters(params: &SimulationParameters) -> Self {
        Self::new(params.vmax(), params.volume_of_distribution(), params.km)
    }
    
    /// Elimination ceiling in concentration units (mg/L/h).
    pub fn max_rate(&self) -> f64 {
        self.vmax / self.vd
    }
}

impl EliminationKinetics for MichaelisMenten {
    fn elimination_rate(&self, concentration: f64) -> f64 {
        self.max_rate() * concentration / (self.km + concentration)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    
    #[test]
    fn test_half_maximal_rate_at_km() {
        let model = MichaelisMenten::new(81.2, 56.0, 24.1);
        let rate = model.elimination_rate(24.1);
        assert_relative_eq!(rate, model.max_rate() / 2.0, epsilon = 1e-12);
    }
    
    #[test]
    fn test_saturation_approaches_max_rate() {
        let model = MichaelisMenten::new(81.2, 56.0, 24.1);
        let rate = model.elimination_rate(1.0e7);
        assert_relative_eq!(rate, model.max_rate(), max_relative = 1e-5);
        assert!(rate < model.max_rate());
    }
    
    #[test]
    fn test_large_km_is_first_order() {
        let km = 1.0e6;
        let model = MichaelisMenten::new(81.2, 56.0, km);
        let c = 9.0;
        let first_order = (81.2 / 56.0) * c / km;
        assert_relative_eq!(model.elimination_rate(c), first_order, max_relative = 1e-4);
    }
    
    #[test]
    fn test_from_parameters_scales_by_weight() {
        let params = SimulationParameters::default();
        let model = MichaelisMenten::from_parameters(&params);
        assert_relative_eq!(model.max_rate(), 81.2 / 56.0, epsilon = 1e-12);
    }
}
