//! battery-payback entry point: CLI wiring, logging and report output.

use std::process;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use battery_payback::cli::Args;
use battery_payback::estimate::estimate_all;
use battery_payback::io::export::{export_hourly_csv, export_summary_csv};
use battery_payback::report::{build_detail_table, build_monthly_table, build_projection_table};

fn init_tracing(verbose: bool) {
    let default = if verbose {
        "battery_payback=debug"
    } else {
        "battery_payback=info"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default)),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(args.verbose);

    let scenario = args.scenario()?;

    let errors = scenario.validate();
    if !errors.is_empty() {
        for e in &errors {
            eprintln!("{e}");
        }
        process::exit(1);
    }

    let output = scenario.run()?;
    let projection = output.projection(scenario.economics.installation_cost);

    let estimates = if args.daily_average {
        Some(estimate_all(&scenario.months, &scenario.simulation_params())?)
    } else {
        None
    };

    println!("{}", build_monthly_table(&output.summaries, estimates.as_deref()));
    println!("{}", build_projection_table(&projection, output.summaries.len()));

    if let Some(detail) = &output.detail {
        let window = detail.window(args.detail_from, args.detail_to);
        if !window.hours.is_empty() {
            println!(
                "\n{} (month {}), hours {}..={}",
                detail.label,
                detail.month_index,
                window.from,
                window.from + window.hours.len() - 1
            );
            println!("{}", build_detail_table(&window));
        }

        if let Some(path) = &args.hourly_out {
            export_hourly_csv(detail, path)
                .with_context(|| format!("failed to write hourly CSV to {}", path.display()))?;
            info!("hourly trace written to {}", path.display());
        }
    }

    if let Some(path) = &args.summary_out {
        export_summary_csv(&output.summaries, path)
            .with_context(|| format!("failed to write summary CSV to {}", path.display()))?;
        info!("monthly table written to {}", path.display());
    }

    #[cfg(not(feature = "api"))]
    if args.serve {
        anyhow::bail!("--serve requires a build with the `api` feature");
    }

    #[cfg(feature = "api")]
    if args.serve {
        use std::net::SocketAddr;
        use std::sync::Arc;

        use battery_payback::api::{AppState, serve};

        let state = Arc::new(AppState {
            scenario,
            output,
            projection,
        });
        let addr = SocketAddr::from(([0, 0, 0, 0], args.port));
        let rt = tokio::runtime::Runtime::new().context("failed to create tokio runtime")?;
        rt.block_on(serve(state, addr))
            .with_context(|| format!("API server on {addr} failed"))?;
    }

    Ok(())
}
