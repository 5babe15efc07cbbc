use std::{
    fmt::{self, Write as _},
    io::{self, Write},
};

use archive_core::{ArchivePayload, HourlySeries, StateView};
use chrono::{DateTime, TimeZone};

pub const LOADING_MESSAGE: &str = "⏳ Loading...";
pub const ERROR_MESSAGE: &str = "☹ Error fetching data. Please check your inputs.";

const TIME_HEADER: &str = "Time";
const TEMPERATURE_HEADER: &str = "Temperature (°C)";

/// How a successful payload is printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Table,
    Json,
}

/// Render whatever the view currently holds: spinner, error, or data.
pub fn render<W: Write, Tz: TimeZone>(
    out: &mut W,
    view: StateView<'_>,
    format: Format,
    tz: &Tz,
    time_format: &str,
) -> io::Result<()>
where
    Tz::Offset: std::fmt::Display,
{
    if view.loading {
        writeln!(out, "{LOADING_MESSAGE}")?;
    }

    if view.error {
        writeln!(out, "{ERROR_MESSAGE}")?;
    }

    if let Some(payload) = view.data {
        match format {
            Format::Json => write_json(out, payload)?,
            Format::Table => match &payload.hourly {
                Some(hourly) => write_table(out, hourly, tz, time_format)?,
                None => writeln!(out, "No hourly data in response.")?,
            },
        }
    }

    Ok(())
}

pub fn write_json<W: Write>(out: &mut W, payload: &ArchivePayload) -> io::Result<()> {
    serde_json::to_writer_pretty(&mut *out, payload)?;
    writeln!(out)
}

/// Two-column table: formatted timestamp, temperature. Missing readings are
/// shown as `-`.
pub fn write_table<W: Write, Tz: TimeZone>(
    out: &mut W,
    hourly: &HourlySeries,
    tz: &Tz,
    time_format: &str,
) -> io::Result<()>
where
    Tz::Offset: std::fmt::Display,
{
    let rows = hourly
        .rows()
        .map(|(ts, temp)| -> Result<(String, String), fmt::Error> {
            let mut time = String::new();
            match DateTime::from_timestamp(ts, 0) {
                Some(dt) => write!(time, "{}", dt.with_timezone(tz).format(time_format))?,
                None => write!(time, "{ts}")?,
            }
            let temp = temp.map_or_else(|| "-".to_string(), |t| t.to_string());
            Ok((time, temp))
        })
        .collect::<Result<Vec<_>, _>>()
        .map_err(|_| {
            io::Error::new(io::ErrorKind::InvalidInput, format!("Invalid time format '{time_format}'"))
        })?;

    let width = rows
        .iter()
        .map(|(time, _)| time.chars().count())
        .chain(std::iter::once(TIME_HEADER.len()))
        .max()
        .unwrap_or_default();

    writeln!(out, "Weather Data")?;
    writeln!(out, "Temperature (Hourly)")?;
    writeln!(out)?;
    writeln!(out, "{TIME_HEADER:<width$} | {TEMPERATURE_HEADER}")?;
    writeln!(out, "{}-+-{}", "-".repeat(width), "-".repeat(TEMPERATURE_HEADER.chars().count()))?;

    for (time, temp) in rows {
        writeln!(out, "{time:<width$} | {temp}")?;
    }

    Ok(())
}
