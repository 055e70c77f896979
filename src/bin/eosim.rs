// src/bin/eosim.rs
//! Command-line driver: load a JSON run configuration, execute one estimator
//! mode, and print a summary report.
//!
//! Usage: `eosim <exit-time|occup-time|picard> <config.json>`

use std::env;
use std::fs;
use std::process;

use eosim::config::RunConfig;
use eosim::math_utils::Timer;
use eosim::output;
use eosim::sim::{ExitTimeEstimator, OccupationTimeEstimator, PicardSolver};

fn usage() -> ! {
    eprintln!("usage: eosim <exit-time|occup-time|picard> <config.json>");
    process::exit(2);
}

fn run(mode: &str, cfg: &RunConfig) -> eosim::SimResult<(String, Vec<(String, String)>)> {
    cfg.params.validate()?;
    let mut rows = vec![
        (
            "Grid".to_string(),
            format!(
                "max_t={}, dt={}, dx={}",
                cfg.params.max_t, cfg.params.dt, cfg.params.dx
            ),
        ),
        (
            "No. Samples".to_string(),
            format!("{} per gridpoint", cfg.params.n),
        ),
    ];

    let timer = Timer::new();
    let title;
    match mode {
        "exit-time" => {
            let domain = cfg.single_domain()?;
            title = "ExitTimeEstimator".to_string();
            rows.insert(0, ("Domain".to_string(), format!("{}", domain)));
            let estimator =
                ExitTimeEstimator::new(domain, cfg.params)?.with_policy(cfg.exit_policy);
            let estimate = estimator.run()?;
            rows.push(("Estimate".to_string(), format!("{}", estimate)));
        }
        "occup-time" => {
            let (domain_d, domain_v) = cfg.domain_pair()?;
            title = "OccupationTimeEstimator".to_string();
            rows.insert(
                0,
                (
                    "Domain D, V".to_string(),
                    format!("{}, {}", domain_d, domain_v),
                ),
            );
            let estimator = OccupationTimeEstimator::new(domain_d, domain_v, cfg.params)?
                .with_policy(cfg.exit_policy);
            let estimate = estimator.run()?;
            rows.push(("Estimate".to_string(), format!("{}", estimate)));
        }
        "picard" => {
            let domain = cfg.single_domain()?;
            let (p, epsilon) = cfg.picard_controls()?;
            title = "PicardSolver".to_string();
            rows.insert(0, ("Domain".to_string(), format!("{}", domain)));
            rows.push(("p, epsilon".to_string(), format!("{}, {}", p, epsilon)));
            let mut solver =
                PicardSolver::new(domain, p, epsilon, cfg.params)?.with_policy(cfg.exit_policy);
            if let Some(cap) = cfg.max_iterations {
                solver = solver.with_max_iterations(cap);
            }
            let solution = solver.run()?;
            rows.push((
                "Iterations".to_string(),
                format!(
                    "{} ({})",
                    solution.iterations,
                    if solution.converged {
                        "converged"
                    } else {
                        "iteration cap reached"
                    }
                ),
            ));
            rows.push((
                "Deltas".to_string(),
                solution
                    .deltas
                    .iter()
                    .map(|d| format!("{:.6}", d))
                    .collect::<Vec<_>>()
                    .join(", "),
            ));
            if let Some(max) = solution.field.max() {
                rows.push(("Max Field Value".to_string(), format!("{}", max)));
            }
        }
        _ => usage(),
    }
    rows.push((
        "Performance".to_string(),
        format!("{:.1} ms", timer.elapsed_ms()),
    ));
    rows.push(("Finished".to_string(), output::timestamp()));
    Ok((title, rows))
}

fn main() {
    let args: Vec<String> = env::args().collect();
    if args.len() != 3 {
        usage();
    }
    let mode = args[1].as_str();
    let config_path = args[2].as_str();

    let text = match fs::read_to_string(config_path) {
        Ok(text) => text,
        Err(e) => {
            eprintln!("eosim: cannot read {}: {}", config_path, e);
            process::exit(1);
        }
    };
    let cfg = match RunConfig::from_json(&text) {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("eosim: {}", e);
            process::exit(1);
        }
    };

    match run(mode, &cfg) {
        Ok((title, rows)) => {
            print!("{}", output::render_report(&title, &rows));
            if let Some(path) = &cfg.report_csv {
                if let Err(e) = output::write_summary_to_csv(path, &rows) {
                    eprintln!("eosim: cannot write {}: {}", path, e);
                    process::exit(1);
                }
            }
        }
        Err(e) => {
            eprintln!("eosim: {}", e);
            process::exit(1);
        }
    }
}
