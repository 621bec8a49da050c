use crate::dosing::DosingSchedule;
use crate::error::PKResult;
use crate::simulation::{ConcentrationSeries, ExposureSummary};
use chrono::Local;
use std::path::Path;
use std::fs::File;
use log::info;

pub fn save_results<P: AsRef<Path>>(
    series: &ConcentrationSeries,
    schedule: &DosingSchedule,
    summary: &ExposureSummary,
    output_dir: P,
) -> PKResult<()> {
    let output_path = output_dir.as_ref();
    
    save_concentration_data(series, &output_path.join("concentrations.csv"))?;
    save_dose_times(schedule, &output_path.join("dose_times.csv"))?;
    save_summary(summary, &output_path.join("summary.json"))?;
    generate_report(summary, output_path)?;
    
    info!("All results saved to {:?}", output_path);
    Ok(())
}

fn save_concentration_data<P: AsRef<Path>>(series: &ConcentrationSeries, path: P) -> PKResult<()> {
    let mut writer = csv::Writer::from_path(path)?;
    
    writer.write_record(["TIME", "CONCENTRATION"])?;
    
    for (time, concentration) in series.points() {
        writer.write_record(&[time.to_string(), concentration.to_string()])?;
    }
    
    writer.flush()?;
    Ok(())
}

fn save_dose_times<P: AsRef<Path>>(schedule: &DosingSchedule, path: P) -> PKResult<()> {
    let mut writer = csv::Writer::from_path(path)?;
    
    writer.write_record(["DOSE_INDEX", "TIME"])?;
    
    for (index, time) in schedule.times().iter().enumerate() {
        writer.write_record(&[(index + 1).to_string(), time.to_string()])?;
    }
    
    writer.flush()?;
    Ok(())
}

fn save_summary<P: AsRef<Path>>(summary: &ExposureSummary, path: P) -> PKResult<()> {
    let file = File::create(path)?;
    serde_json::to_writer_pretty(file, summary)?;
    Ok(())
}

/// Markdown report with the derived model parameters and exposure metrics.
pub fn generate_report<P: AsRef<Path>>(summary: &ExposureSummary, output_dir: P) -> PKResult<()> {
    let report_path = output_dir.as_ref().join("simulation_report.md");
    
    let regimen = match summary.regimen.tau {
        Some(tau) => format!("{} mg every {} h ({} doses)", summary.regimen.dose, tau, summary.regimen.n_doses),
        None => format!("{} mg single dose", summary.regimen.dose),
    };
    
    let steady_state = match &summary.steady_state {
        Some(css) => format!(
            "## Steady State\n- **Css,max**: {:.2} mg/L\n- **Css,min**: {:.2} mg/L\n\n",
            css.max, css.min
        ),
        None => String::new(),
    };
    
    let report_content = format!(
        r#"# Michaelis-Menten Pharmacokinetics Simulation Report

Generated {}

## Regimen
- **Dosing**: {}
- **Duration**: {} h (step {} h)

## Model Parameters
- **Volume of distribution (Vd)**: {:.1} L
- **Systemic Vmax**: {:.1} mg/h
- **Km**: {:.1} mg/L

## Exposure
- **Cmax**: {:.2} mg/L at {:.2} h
- **AUC(0-{})**: {:.1} mg*h/L

{}## Therapeutic Window (MEC {} mg/L, MTC {} mg/L)
- **Below MEC**: {:.1} h
- **Within window**: {:.1} h
- **Above MTC**: {:.1} h

## Files Generated
- `concentrations.csv`: Concentration-time series on the integration grid
- `dose_times.csv`: Administration times
- `summary.json`: Parameters and exposure metrics
"#,
        Local::now().format("%Y-%m-%d %H:%M:%S"),
        regimen,
        summary.regimen.t_end,
        summary.regimen.dt,
        summary.parameters.volume_of_distribution,
        summary.parameters.vmax,
        summary.parameters.km,
        summary.pharmacokinetics.cmax,
        summary.pharmacokinetics.tmax,
        summary.regimen.t_end,
        summary.pharmacokinetics.auc,
        steady_state,
        summary.therapeutic_window.mec,
        summary.therapeutic_window.mtc,
        summary.therapeutic_exposure.below_mec,
        summary.therapeutic_exposure.within_window,
        summary.therapeutic_exposure.above_mtc,
    );
    
    std::fs::write(report_path, report_content)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TherapeuticConfig;
    use crate::models::SimulationParameters;
    use crate::simulation::{analyze, simulate};
    use approx::assert_relative_eq;
    use std::path::PathBuf;
    
    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("mm_pk_sim_{}_{}", name, std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }
    
    #[test]
    fn test_save_results_writes_all_files() {
        let params = SimulationParameters { t_end: 96.0, ..SimulationParameters::default() };
        let schedule = DosingSchedule::repeated(params.tau, params.t_end).unwrap();
        let series = simulate(params, &schedule).unwrap();
        let css = analyze(&series, &schedule, true, params.tau);
        let summary = ExposureSummary::from_run(
            &params, &schedule, true, &series, css, TherapeuticConfig::default(),
        );
        
        let dir = scratch_dir("save_results");
        save_results(&series, &schedule, &summary, &dir).unwrap();
        
        let mut reader = csv::Reader::from_path(dir.join("concentrations.csv")).unwrap();
        let headers: Vec<&str> = reader.headers().unwrap().iter().collect();
        assert_eq!(headers, vec!["TIME", "CONCENTRATION"]);
        let rows: Vec<(f64, f64)> = reader
            .records()
            .map(|r| {
                let r = r.unwrap();
                (r[0].parse().unwrap(), r[1].parse().unwrap())
            })
            .collect();
        assert_eq!(rows.len(), series.len());
        assert_eq!(rows[0].1, series.concentrations()[0]);
        
        let doses = std::fs::read_to_string(dir.join("dose_times.csv")).unwrap();
        assert_eq!(doses.lines().count(), 1 + schedule.len());
        
        let json = std::fs::read_to_string(dir.join("summary.json")).unwrap();
        let restored: ExposureSummary = serde_json::from_str(&json).unwrap();
        let restored_css = restored.steady_state.unwrap();
        assert_relative_eq!(restored_css.max, css.max, max_relative = 1e-12);
        assert_relative_eq!(restored_css.min, css.min, max_relative = 1e-12);
        assert_eq!(restored.regimen.n_doses, 4);
        
        let report = std::fs::read_to_string(dir.join("simulation_report.md")).unwrap();
        assert!(report.contains("Css,max"));
        assert!(report.contains("530 mg every 24 h (4 doses)"));
        
        std::fs::remove_dir_all(&dir).unwrap();
    }
    
    #[test]
    fn test_single_dose_report_omits_steady_state() {
        let params = SimulationParameters { t_end: 48.0, ..SimulationParameters::default() };
        let schedule = DosingSchedule::single();
        let series = simulate(params, &schedule).unwrap();
        let css = analyze(&series, &schedule, false, params.tau);
        let summary = ExposureSummary::from_run(
            &params, &schedule, false, &series, css, TherapeuticConfig::default(),
        );
        
        let dir = scratch_dir("single_report");
        generate_report(&summary, &dir).unwrap();
        
        let report = std::fs::read_to_string(dir.join("simulation_report.md")).unwrap();
        assert!(report.contains("530 mg single dose"));
        assert!(!report.contains("Css,max"));
        
        std::fs::remove_dir_all(&dir).unwrap();
    }
}
