//! Parquet fixtures shaped like the green taxi monthly files.

#![allow(dead_code)]

use chrono::{NaiveDate, NaiveDateTime};
use polars::prelude::*;
use std::path::Path;
use trip_duration::period::Period;

/// One trip: pickup zone, dropoff zone, distance in miles, duration in seconds.
pub type Trip = (i64, i64, f64, i64);

fn at(day: u32, secs: i64) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2021, 1, day)
        .unwrap()
        .and_hms_opt(7, 30, 0)
        .unwrap()
        + chrono::Duration::seconds(secs)
}

pub fn trips_frame(trips: &[Trip]) -> DataFrame {
    let pickups: Vec<NaiveDateTime> = (0..trips.len()).map(|i| at(1 + (i % 28) as u32, 0)).collect();
    let dropoffs: Vec<NaiveDateTime> = trips
        .iter()
        .enumerate()
        .map(|(i, t)| at(1 + (i % 28) as u32, t.3))
        .collect();

    df!(
        "VendorID" => vec![2i64; trips.len()],
        "lpep_pickup_datetime" => pickups,
        "lpep_dropoff_datetime" => dropoffs,
        "PULocationID" => trips.iter().map(|t| t.0).collect::<Vec<_>>(),
        "DOLocationID" => trips.iter().map(|t| t.1).collect::<Vec<_>>(),
        "passenger_count" => vec![1.0f64; trips.len()],
        "trip_distance" => trips.iter().map(|t| t.2).collect::<Vec<_>>(),
        "fare_amount" => trips.iter().map(|t| 2.5 + 2.0 * t.2).collect::<Vec<_>>(),
    )
    .unwrap()
}

pub fn parquet_bytes(trips: &[Trip]) -> Vec<u8> {
    let mut df = trips_frame(trips);
    let mut bytes = Vec::new();
    ParquetWriter::new(&mut bytes).finish(&mut df).unwrap();
    bytes
}

/// Write the monthly file for `period` into `dir`, named like the public files.
pub fn write_month(dir: &Path, period: Period, trips: &[Trip]) {
    std::fs::write(dir.join(period.file_name()), parquet_bytes(trips)).unwrap();
}

/// A month of plausible trips: duration grows with distance, some zones are slower,
/// and a few records fall outside the 1..=60 minute window.
pub fn training_month() -> Vec<Trip> {
    let mut trips = Vec::new();
    for i in 0..60i64 {
        let pu = [74, 75, 41, 42][(i % 4) as usize];
        let dol = [236, 42, 74, 166, 7][(i % 5) as usize];
        let distance = 0.5 + (i % 9) as f64 * 0.7;
        let slow_zone = if pu == 74 { 240 } else { 0 };
        let secs = 180 + (distance * 220.0) as i64 + slow_zone + (i % 7) * 15;
        trips.push((pu, dol, distance, secs));
    }
    // outside the kept window
    trips.push((74, 236, 0.1, 20));
    trips.push((41, 42, 30.0, 2 * 3600));
    trips
}

pub fn validation_month() -> Vec<Trip> {
    vec![
        (74, 236, 1.2, 700),
        (41, 166, 3.1, 960),
        (75, 7, 0.9, 420),
        (42, 42, 2.0, 660),
        // zone never seen in training
        (263, 74, 1.5, 600),
        (74, 42, 4.4, 1400),
        (41, 236, 0.6, 3),
    ]
}
