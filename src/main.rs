mod app;
mod plot_view;

use std::env;

use anyhow::{anyhow, Result};
use iced::Application;
use tracing::info;

use app::PlotWindow;
use buck_boost_waveforms::plot::{current_plot, voltage_plot};
use buck_boost_waveforms::{current, voltage, CurrentConfig, VoltageConfig};

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = env::args().collect();
    if args.iter().any(|a| a == "-h" || a == "--help") {
        print_usage();
        return Ok(());
    }

    let plot = match args.get(1).map(String::as_str).unwrap_or("voltage") {
        "voltage" => {
            let wave = voltage::generate(&VoltageConfig::default())?;
            let summary = wave.summary();
            info!(
                samples = summary.samples,
                on_level = summary.on_level,
                off_level = summary.off_level,
                volt_seconds = summary.volt_seconds,
                "inductor voltage ready"
            );
            voltage_plot(&wave)
        }
        "current" => {
            let wave = current::generate(&CurrentConfig::default())?;
            let levels = wave.levels;
            info!(
                samples = wave.len(),
                ripple = levels.ripple,
                min = levels.min,
                max = levels.max,
                "inductor current ready"
            );
            current_plot(&wave)
        }
        other => return Err(anyhow!("unknown waveform: {} (expected voltage or current)", other)),
    };

    PlotWindow::run(PlotWindow::settings(plot)).map_err(|e| anyhow!("plot window failed: {}", e))
}

fn print_usage() {
    eprintln!("Usage: buck-boost-waveforms [voltage|current]");
    eprintln!("Opens one plot window for the ideal buck-boost inductor waveform.");
    eprintln!("CLI: cargo run --bin buck-boost-cli -- --help");
}
