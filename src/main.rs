use anyhow::Context;
use clap::Parser;
use log::{info, warn};
use std::path::PathBuf;

use mm_pk_sim::config::Config;
use mm_pk_sim::simulation::{analyze_with, simulate, ExposureSummary};

#[derive(Parser)]
#[command(name = "mm_pk_sim")]
#[command(about = "Plasma concentration simulation with Michaelis-Menten elimination")]
struct Cli {
    /// Configuration file path (JSON); defaults are used when omitted
    #[arg(short, long)]
    config: Option<PathBuf>,
    
    /// Output directory
    #[arg(short, long)]
    output: PathBuf,
    
    /// Administer a single dose at t = 0 instead of a repeated regimen
    #[arg(long)]
    single_dose: bool,
    
    /// Dose amount (mg)
    #[arg(long)]
    dose: Option<f64>,
    
    /// Dosing interval (h)
    #[arg(long)]
    tau: Option<f64>,
    
    /// Simulation duration (h)
    #[arg(long)]
    t_end: Option<f64>,
    
    /// Verbose logging
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    fn apply_overrides(&self, config: &mut Config) {
        if self.single_dose {
            config.dosing.repeated = false;
        }
        if let Some(dose) = self.dose {
            config.dosing.amount = dose;
        }
        if let Some(tau) = self.tau {
            config.dosing.tau = tau;
        }
        if let Some(t_end) = self.t_end {
            config.simulation.t_end = t_end;
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    
    // Initialize logging
    if cli.verbose {
        env_logger::Builder::from_default_env()
            .filter_level(log::LevelFilter::Debug)
            .init();
    } else {
        env_logger::Builder::from_default_env()
            .filter_level(log::LevelFilter::Info)
            .init();
    }
    
    let mut config = match &cli.config {
        Some(path) => {
            let config = Config::from_file(path)
                .with_context(|| format!("Failed to load configuration from {:?}", path))?;
            info!("Loaded configuration from {:?}", path);
            config
        },
        None => {
            info!("No configuration file given, using defaults");
            Config::default()
        },
    };
    cli.apply_overrides(&mut config);
    config.validate().context("Invalid simulation input")?;
    
    if config.therapeutic.mec > config.therapeutic.mtc {
        warn!(
            "MEC ({} mg/L) exceeds MTC ({} mg/L); therapeutic window is empty",
            config.therapeutic.mec, config.therapeutic.mtc
        );
    }
    
    let params = config.parameters();
    let schedule = config.schedule()?;
    let repeated = config.dosing.repeated;
    info!("Simulating {} dose(s) of {} mg over {} h", schedule.len(), params.dose, params.t_end);
    
    let series = simulate(params, &schedule)?;
    let css = analyze_with(
        &series,
        &schedule,
        repeated,
        params.tau,
        config.simulation.steady_state_policy,
    );
    
    let summary = ExposureSummary::from_run(
        &params,
        &schedule,
        repeated,
        &series,
        css,
        config.therapeutic,
    );
    
    info!(
        "Vd = {:.1} L, Vmax = {:.1} mg/h, Km = {:.1} mg/L",
        summary.parameters.volume_of_distribution, summary.parameters.vmax, summary.parameters.km
    );
    info!(
        "Cmax = {:.2} mg/L at {:.2} h, AUC = {:.1} mg*h/L",
        summary.pharmacokinetics.cmax, summary.pharmacokinetics.tmax, summary.pharmacokinetics.auc
    );
    if repeated {
        info!("Css,max = {:.2} mg/L, Css,min = {:.2} mg/L", css.max, css.min);
    }
    
    std::fs::create_dir_all(&cli.output)
        .with_context(|| format!("Failed to create output directory {:?}", cli.output))?;
    
    mm_pk_sim::output::save_results(&series, &schedule, &summary, &cli.output)?;
    info!("Results saved to {:?}", cli.output);
    
    Ok(())
}
