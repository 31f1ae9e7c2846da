//! Tabular and JSON output to any writer.

use std::io::Write;

use serde::Serialize;

use crate::current::CurrentWaveform;
use crate::error::Result;
use crate::voltage::VoltageWaveform;

/// Write one `time,value` row per sample after a header row.
///
/// ```csv
/// t_s,v_l_V
/// 0,12
/// 0.00000001,12
/// ```
pub fn write_csv<W: Write>(
    writer: &mut W,
    header: (&str, &str),
    time: &[f64],
    values: &[f64],
) -> Result<()> {
    writeln!(writer, "{},{}", header.0, header.1)?;
    for (t, v) in time.iter().zip(values) {
        writeln!(writer, "{},{}", t, v)?;
    }
    Ok(())
}

pub fn write_voltage_csv<W: Write>(wave: &VoltageWaveform, writer: &mut W) -> Result<()> {
    write_csv(writer, ("t_s", "v_l_V"), &wave.time, &wave.voltage)
}

pub fn write_current_csv<W: Write>(wave: &CurrentWaveform, writer: &mut W) -> Result<()> {
    write_csv(writer, ("t_s", "i_l_A"), &wave.time, &wave.current)
}

pub fn write_json<W: Write, T: Serialize>(writer: &mut W, value: &T) -> Result<()> {
    serde_json::to_writer_pretty(&mut *writer, value)?;
    writeln!(writer)?;
    Ok(())
}
