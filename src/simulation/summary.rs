use super::{ConcentrationSeries, SteadyStateWindow, TherapeuticExposure};
use crate::config::TherapeuticConfig;
use crate::dosing::DosingSchedule;
use crate::models::SimulationParameters;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExposureSummary {
    pub parameters: ParameterSummary,
    pub regimen: RegimenSummary,
    pub pharmacokinetics: PKSummary,
    pub steady_state: Option<SteadyStateWindow>,
    pub therapeutic_window: TherapeuticConfig,
    pub therapeutic_exposure: TherapeuticExposure,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParameterSummary {
    pub weight_kg: f64,
    pub volume_of_distribution: f64, // L
    pub vmax: f64,                   // mg/h
    pub km: f64,                     // mg/L
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegimenSummary {
    pub dose: f64,
    pub repeated: bool,
    pub tau: Option<f64>,
    pub n_doses: usize,
    pub t_end: f64,
    pub dt: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PKSummary {
    pub cmax: f64,
    pub tmax: f64,
    pub auc: f64,
}

impl ExposureSummary {
    /// `steady_state` is only reported for repeated regimens.
    pub fn from_run(
        params: &SimulationParameters,
        schedule: &DosingSchedule,
        repeated: bool,
        series: &ConcentrationSeries,
        steady_state: SteadyStateWindow,
        therapeutic_window: TherapeuticConfig,
    ) -> Self {
        Self {
            parameters: ParameterSummary {
                weight_kg: params.weight_kg,
                volume_of_distribution: params.volume_of_distribution(),
                vmax: params.vmax(),
                km: params.km,
            },
            regimen: RegimenSummary {
                dose: params.dose,
                repeated,
                tau: repeated.then_some(params.tau),
                n_doses: schedule.len(),
                t_end: params.t_end,
                dt: params.dt,
            },
            pharmacokinetics: PKSummary {
                cmax: series.get_max_concentration(),
                tmax: series.get_time_to_max().unwrap_or(0.0),
                auc: series.get_auc(),
            },
            steady_state: repeated.then_some(steady_state),
            therapeutic_window,
            therapeutic_exposure: series.get_therapeutic_exposure(&therapeutic_window),
        }
    }
}
