#![cfg_attr(all(not(debug_assertions), not(test)), deny(warnings))]
#![allow(clippy::module_name_repetitions, clippy::missing_errors_doc)]

mod cli;
mod error_fmt;
mod forecast;
mod logging;
mod output;

use clap::Parser;
use eyre::Result;

use crate::cli::{Cli, Commands, JSON_MODE};
use crate::error_fmt::{exit_code_for_error, format_error_json, humanize};
use crate::forecast::ForecastArgs;

fn main() {
    let cli = Cli::parse();
    let _ = JSON_MODE.set(cli.json);
    if !cli.json {
        let _ = color_eyre::install();
    }

    let mut guard = None;
    let code = match run(&cli, &mut guard) {
        Ok(()) => 0,
        Err(err) => {
            tracing::error!(error = %err, "command failed");
            if JSON_MODE.get().copied().unwrap_or(false) {
                eprintln!("{}", format_error_json(&err));
            } else {
                eprintln!("{}", humanize(&err));
            }
            exit_code_for_error(&err)
        }
    };
    // Flush the file log before exiting.
    drop(guard);
    std::process::exit(code);
}

fn run(
    cli: &Cli,
    guard: &mut Option<tracing_appender::non_blocking::WorkerGuard>,
) -> Result<()> {
    let cfg = match forecast::load_config(&cli.config) {
        Ok(cfg) => cfg,
        Err(e) => {
            let _ = logging::init_tracing(cli.json, &cli.log_level, &aqi_config::Logging::default());
            return Err(e);
        }
    };
    *guard = logging::init_tracing(cli.json, &cli.log_level, &cfg.logging)?;

    match &cli.cmd {
        Commands::Forecast {
            horizon,
            no_live,
            base_time,
            scheme,
        } => {
            let report = forecast::run_forecast(
                &cfg,
                &ForecastArgs {
                    horizon: *horizon,
                    no_live: *no_live,
                    base_time: base_time.as_deref(),
                    scheme: scheme.map(Into::into),
                },
            )?;
            if cli.json {
                println!("{}", output::report_json(&report)?);
            } else {
                print!("{}", output::report_text(&report));
            }
        }
        Commands::Current { no_live } => {
            let current = forecast::run_current(&cfg, *no_live)?;
            if cli.json {
                println!("{}", output::current_json(&current)?);
            } else {
                print!("{}", output::current_text(&current));
            }
        }
        Commands::SelfCheck => {
            let report = forecast::self_check(&cfg)?;
            if cli.json {
                println!("{}", output::self_check_json(&report));
            } else {
                println!("{}", output::self_check_text(&report));
            }
        }
        Commands::Health => {
            // Config parsed and validated; check that its inputs exist.
            let history_ok = cfg.history.csv.is_file();
            let model_ok = cfg.model.path.is_file();
            let status = if history_ok && model_ok { "ok" } else { "degraded" };
            if cli.json {
                println!(
                    "{}",
                    serde_json::json!({
                        "status": status,
                        "history": history_ok,
                        "model": model_ok,
                        "live": cfg.live.enabled,
                    })
                );
            } else {
                println!("{status}: history={history_ok} model={model_ok} live={}", cfg.live.enabled);
            }
            if status != "ok" {
                eyre::bail!(
                    "health check degraded: history file present={history_ok}, model file present={model_ok}"
                );
            }
        }
    }
    Ok(())
}
