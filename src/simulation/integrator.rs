use crate::dosing::DosingSchedule;
use crate::error::PKResult;
use crate::models::{EliminationKinetics, MichaelisMenten, SimulationParameters};
use super::ConcentrationSeries;
use log::{debug, info};

/// Absorbs rounding in `(t_end + dt) / dt` so that e.g. 400 h at 0.05 h
/// gives exactly 8001 points.
const GRID_TOLERANCE: f64 = 1e-9;

/// Uniform grid `0, dt, 2*dt, ...` holding every multiple of `dt` strictly
/// below `t_end + dt`. When `t_end` is off the grid the last point lies one
/// partial step past it.
pub fn time_grid(t_end: f64, dt: f64) -> Vec<f64> {
    let n_points = ((t_end + dt) / dt - GRID_TOLERANCE).ceil().max(1.0) as usize;
    (0..n_points).map(|i| i as f64 * dt).collect()
}

/// Runs the single-compartment model with Michaelis-Menten elimination.
pub fn simulate(params: SimulationParameters, schedule: &DosingSchedule) -> PKResult<ConcentrationSeries> {
    let kinetics = MichaelisMenten::from_parameters(&params);
    integrate(&params, schedule, &kinetics)
}

/// Forward Euler over the time grid with bolus doses applied as impulses.
///
/// Every dose adds `dose / Vd` to the grid point within half a step of its
/// administration time, before that point's elimination step is taken.
/// Concentration is clamped at zero, and once it reaches zero it stays there
/// until the next dose. A dose landing on the final grid point has no step
/// left to act on and is not applied.
pub fn integrate<K: EliminationKinetics>(
    params: &SimulationParameters,
    schedule: &DosingSchedule,
    kinetics: &K,
) -> PKResult<ConcentrationSeries> {
    params.validate()?;
    
    let times = time_grid(params.t_end, params.dt);
    let n_points = times.len();
    
    let last_index = n_points - 1;
    let mut doses_at = vec![0u32; n_points];
    for index in schedule.grid_indices(params.dt) {
        if index < last_index {
            doses_at[index] += 1;
        } else {
            debug!("Dose at grid index {} falls outside the integration range", index);
        }
    }
    
    info!(
        "Integrating {} steps of {} h (Vd = {:.1} L, Vmax = {:.1} mg/h, Km = {:.1} mg/L)",
        n_points - 1, params.dt, params.volume_of_distribution(), params.vmax(), params.km
    );
    
    let increment = params.dose_concentration();
    let mut concentrations = vec![0.0; n_points];
    
    for i in 0..n_points - 1 {
        for _ in 0..doses_at[i] {
            concentrations[i] += increment;
        }
        
        concentrations[i + 1] = if concentrations[i] > 0.0 {
            let rate = kinetics.elimination_rate(concentrations[i]);
            (concentrations[i] - rate * params.dt).max(0.0)
        } else {
            0.0
        };
    }
    
    Ok(ConcentrationSeries::new(times, concentrations))
}
