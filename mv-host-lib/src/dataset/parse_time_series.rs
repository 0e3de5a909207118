use std::{fs::File, io::Read, path::Path};

use csv::{ReaderBuilder, StringRecord, Trim};
use serde::Deserialize;

use super::{IMUReading, TimeSeries};
use crate::{Error, Result};

/// Column order written by the acquisition tool.
pub const DEFAULT_HEADERS: [&str; 7] = [
    "timestamp", "gyro_x", "gyro_y", "gyro_z", "acc_x", "acc_y", "acc_z",
];

#[derive(Deserialize)]
struct TimeSeriesRow {
    timestamp: f64,
    gyro_x: f64,
    gyro_y: f64,
    gyro_z: f64,
    acc_x: f64,
    acc_y: f64,
    acc_z: f64,
}

impl From<TimeSeriesRow> for IMUReading {
    fn from(row: TimeSeriesRow) -> Self {
        IMUReading::new(
            row.timestamp,
            [row.gyro_x, row.gyro_y, row.gyro_z],
            [row.acc_x, row.acc_y, row.acc_z],
        )
    }
}

/// Parses header-less comma separated rows, naming the columns with `headers`.
/// Columns not named in [`DEFAULT_HEADERS`] are ignored.
pub fn parse_time_series<R: Read>(reader: R, headers: &[&str]) -> Result<TimeSeries> {
    if let Some(missing) = DEFAULT_HEADERS
        .iter()
        .find(|column| !headers.contains(*column))
    {
        return Err(Error::MissingColumn(*missing));
    }
    let headers: StringRecord = headers.iter().collect();

    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .trim(Trim::All)
        .from_reader(reader);

    let mut readings = Vec::new();
    for record in reader.records() {
        let row: TimeSeriesRow = record?.deserialize(Some(&headers))?;
        readings.push(row.into());
    }
    Ok(TimeSeries::new(readings))
}

pub fn read_time_series<P: AsRef<Path>>(path: P, headers: &[&str]) -> Result<TimeSeries> {
    let file = File::open(path)?;
    parse_time_series(file, headers)
}
