use std::io::Write;
use std::process::ExitCode;

use env_logger::Builder;
use log::{error, info};

use u_turbosim::config::{ConfigError, ScenarioConfig};
use u_turbosim::report::{batch_header, ScenarioReport};

fn main() -> ExitCode {
    Builder::from_default_env()
        .format(|buf, record| writeln!(buf, "{}", record.args()))
        .init();

    let mut json = false;
    let mut path = None;
    for arg in std::env::args().skip(1) {
        match arg.as_str() {
            "--json" => json = true,
            _ => path = Some(arg),
        }
    }

    match run(path.as_deref(), json) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}

fn run(path: Option<&str>, json: bool) -> Result<(), ConfigError> {
    let config = match path {
        Some(path) => {
            info!("loading scenario from {path}");
            ScenarioConfig::from_file(path)?
        }
        None => ScenarioConfig::standard(),
    };
    let batches = config.prepare()?;

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    for batch in &batches {
        if !json {
            writeln!(out)?;
            writeln!(out, "{}", batch_header(batch.as_slice()))?;
        }
        for combination in &config.combinations {
            let simulator = combination.simulator();
            let result = simulator
                .simulate(batch)
                .map_err(|e| ConfigError::Invalid(vec![e]))?;
            let report = ScenarioReport::new(simulator.policy_names(), result);
            if json {
                writeln!(out, "{}", serde_json::to_string(&report)?)?;
            } else {
                writeln!(out, "{report}")?;
            }
        }
    }
    Ok(())
}
