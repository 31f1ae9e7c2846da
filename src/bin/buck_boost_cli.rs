use std::env;
use std::io::{self, Write};

use anyhow::{anyhow, Result};
use serde::Serialize;

use buck_boost_waveforms::output::{write_current_csv, write_json, write_voltage_csv};
use buck_boost_waveforms::{current, voltage, CurrentConfig, VoltageConfig};

#[derive(Clone, Copy, PartialEq, Eq)]
enum Waveform {
    Voltage,
    Current,
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Format {
    Summary,
    Json,
    Csv,
}

#[derive(Serialize)]
struct Report<'a, C, S> {
    config: &'a C,
    summary: S,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = env::args().collect();
    if args.len() == 1 || args.iter().any(|a| a == "-h" || a == "--help") {
        print_usage();
        return Ok(());
    }

    let mut waveform = None;
    let mut format = Format::Summary;
    let mut voltage_config = VoltageConfig::default();
    let mut current_config = CurrentConfig::default();

    let mut i = 1;
    while i < args.len() {
        let flag = args[i].as_str();
        i += 1;
        let value = args.get(i).map(String::as_str);
        match flag {
            "--waveform" => {
                waveform = Some(match value.ok_or_else(|| anyhow!("missing waveform"))? {
                    "voltage" => Waveform::Voltage,
                    "current" => Waveform::Current,
                    other => return Err(anyhow!("unknown waveform: {}", other)),
                });
            }
            "--format" => {
                format = match value.ok_or_else(|| anyhow!("missing format"))? {
                    "summary" => Format::Summary,
                    "json" => Format::Json,
                    "csv" => Format::Csv,
                    other => return Err(anyhow!("unknown format: {}", other)),
                };
            }
            "--vin" => {
                let vin = parse_f64(value, "vin")?;
                voltage_config.input_voltage = vin;
                current_config.input_voltage = vin;
            }
            "--vout" => {
                current_config.output_voltage = parse_f64(value, "vout")?;
            }
            "--duty" => {
                let duty = parse_f64(value, "duty")?;
                voltage_config.duty_cycle = duty;
                current_config.duty_cycle = duty;
            }
            "--period" => {
                let period = parse_f64(value, "period")?;
                voltage_config.period = period;
                current_config.period = period;
            }
            "--inductance" => {
                let inductance = parse_f64(value, "inductance")?;
                voltage_config.inductance = inductance;
                current_config.inductance = inductance;
            }
            "--avg-current" => {
                current_config.average_current = parse_f64(value, "avg-current")?;
            }
            "--resolution" => {
                voltage_config.time_resolution = parse_f64(value, "resolution")?;
            }
            "--periods" => {
                voltage_config.periods = value.ok_or_else(|| anyhow!("missing periods"))?.parse::<usize>()?;
            }
            "--samples" => {
                current_config.samples = value.ok_or_else(|| anyhow!("missing samples"))?.parse::<usize>()?;
            }
            other => {
                return Err(anyhow!("unknown arg: {}", other));
            }
        }
        i += 1;
    }

    let waveform = waveform.ok_or_else(|| anyhow!("--waveform is required"))?;
    let stdout = io::stdout();
    let mut out = stdout.lock();

    match waveform {
        Waveform::Voltage => {
            let wave = voltage::generate(&voltage_config)?;
            match format {
                Format::Csv => write_voltage_csv(&wave, &mut out)?,
                Format::Json => write_json(
                    &mut out,
                    &Report {
                        config: &voltage_config,
                        summary: wave.summary(),
                    },
                )?,
                Format::Summary => print_voltage_summary(&wave, &mut out)?,
            }
        }
        Waveform::Current => {
            let wave = current::generate(&current_config)?;
            match format {
                Format::Csv => write_current_csv(&wave, &mut out)?,
                Format::Json => write_json(
                    &mut out,
                    &Report {
                        config: &current_config,
                        summary: wave.summary(),
                    },
                )?,
                Format::Summary => print_current_summary(&wave, &mut out)?,
            }
        }
    }

    out.flush()?;
    Ok(())
}

fn parse_f64(value: Option<&str>, name: &str) -> Result<f64> {
    Ok(value.ok_or_else(|| anyhow!("missing {}", name))?.parse::<f64>()?)
}

fn print_voltage_summary<W: Write>(wave: &voltage::VoltageWaveform, out: &mut W) -> Result<()> {
    let s = wave.summary();
    writeln!(out, "Buck-boost inductor voltage")?;
    writeln!(out, "  samples            {}", s.samples)?;
    writeln!(out, "  switching freq     {:.3} kHz", s.switching_frequency / 1e3)?;
    writeln!(out, "  on level           {:.4} V for {:.3} us", s.on_level, s.on_time * 1e6)?;
    writeln!(out, "  off level          {:.4} V for {:.3} us", s.off_level, s.off_time * 1e6)?;
    writeln!(out, "  volt-seconds       {:.3e} V*s", s.volt_seconds)?;
    match s.ripple_current {
        Some(ripple) => writeln!(out, "  ripple current     {:.4} A", ripple)?,
        None => writeln!(out, "  ripple current     (needs a positive inductance)")?,
    }
    for (i, mean) in s.period_means.iter().enumerate() {
        match mean {
            Some(mean) => writeln!(out, "  period {} mean      {:+.5} V", i, mean)?,
            None => writeln!(out, "  period {} mean      (no samples)", i)?,
        }
    }
    Ok(())
}

fn print_current_summary<W: Write>(wave: &current::CurrentWaveform, out: &mut W) -> Result<()> {
    let s = wave.summary();
    writeln!(out, "Buck-boost inductor current")?;
    writeln!(out, "  samples            {}", s.samples)?;
    writeln!(out, "  switching freq     {:.3} kHz", s.switching_frequency / 1e3)?;
    writeln!(out, "  t_on / t_off       {:.3} / {:.3} us", s.levels.t_on * 1e6, s.levels.t_off * 1e6)?;
    writeln!(out, "  ripple (p-p)       {:.4} A", s.levels.ripple)?;
    writeln!(out, "  min / avg / max    {:.4} / {:.4} / {:.4} A", s.levels.min, s.levels.average, s.levels.max)?;
    writeln!(out, "  end of period      {:.4} A", s.end_current)?;
    match s.ideal_output_voltage {
        Some(v) => writeln!(out, "  ideal Vout         {:.4} V", v)?,
        None => writeln!(out, "  ideal Vout         undefined at D = 1")?,
    }
    Ok(())
}

fn print_usage() {
    eprintln!("Usage: buck-boost-cli --waveform voltage|current [--format summary|json|csv] [--vin V] [--vout V] [--duty D] [--period s] [--inductance H] [--avg-current A] [--resolution s] [--periods N] [--samples N]");
}
