use chrono::{Duration, NaiveDate};
use noaa_feature_builder::analyzers::FeatureAnalyzer;
use noaa_feature_builder::processors::BatchProcessor;
use noaa_feature_builder::readers::ObservationReader;
use noaa_feature_builder::{FeatureBuilder, FeatureConfig};
use pretty_assertions::assert_eq;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

/// Write a station CSV where every variable on day `i` is `value(i)`
fn write_station_csv(path: &Path, start: NaiveDate, days: usize, value: impl Fn(usize) -> i64) {
    let mut contents = String::from("STATION,DATE,PRCP,TMIN,TAVG,TMAX,SNWD\n");
    for i in 0..days {
        let date = start + Duration::days(i as i64);
        let v = value(i);
        contents.push_str(&format!(
            "USW00094728,{},{},{},{},{},0\n",
            date.format("%Y-%m-%d"),
            v,
            v,
            v,
            v
        ));
    }
    fs::write(path, contents).expect("Failed to write station file");
}

fn read_rows(path: &Path) -> (Vec<String>, Vec<Vec<f64>>) {
    let mut reader = csv::Reader::from_path(path).expect("Failed to open output");
    let headers = reader
        .headers()
        .expect("Missing header")
        .iter()
        .map(String::from)
        .collect();
    let rows = reader
        .records()
        .map(|r| {
            r.expect("Bad record")
                .iter()
                .map(|c| c.parse::<f64>().expect("Non-numeric cell"))
                .collect()
        })
        .collect();
    (headers, rows)
}

#[test]
fn test_constant_station_end_to_end() {
    let input = TempDir::new().expect("Failed to create temp directory");
    let output = TempDir::new().expect("Failed to create temp directory");
    let start = NaiveDate::from_ymd_opt(2013, 1, 1).unwrap();
    write_station_csv(&input.path().join("USW00094728.csv"), start, 400, |_| 100);

    let out_dir = output.path().join("processed_data");
    let report = BatchProcessor::default()
        .process_directory(input.path(), &out_dir, None)
        .expect("Batch failed");
    assert_eq!(report.processed.len(), 1);

    let (headers, rows) = read_rows(&out_dir.join("USW00094728.csv"));

    assert_eq!(headers.len(), 149);
    assert!(!headers.iter().any(|h| h == "DATE" || h == "STATION" || h == "SNWD"));
    assert_eq!(rows.len(), 27);

    let calendar = ["YEAR", "MONTH", "DAY_OF_YEAR", "WEEK_OF_YEAR", "SEASON"];
    for row in &rows {
        for (name, value) in headers.iter().zip(row) {
            if calendar.contains(&name.as_str()) {
                continue;
            }
            let expected = if name.starts_with("PRCP") { 100.0 } else { 50.0 };
            assert_eq!(*value, expected, "column {}", name);
        }
    }
}

#[test]
fn test_year_filter_and_lag_alignment() {
    let dir = TempDir::new().expect("Failed to create temp directory");
    let path = dir.path().join("station.csv");
    // 2012-12-01 onwards; the first 31 rows are dropped by the year filter
    let start = NaiveDate::from_ymd_opt(2012, 12, 1).unwrap();
    write_station_csv(&path, start, 450, |i| i as i64);

    let observations = ObservationReader::new()
        .read_observations(&path)
        .expect("Failed to read");
    let table = FeatureBuilder::new()
        .build_unfiltered(&observations)
        .expect("Failed to build");

    assert_eq!(table.row_count(), 450 - 31);
    // position 0 of the filtered series is 2013-01-01, raw value 31
    assert_eq!(table.column("PRCP").unwrap().values[0], Some(31.0));
    assert_eq!(table.column("PRCP_lag_1").unwrap().values[0], None);
    assert_eq!(table.column("PRCP_lag_1").unwrap().values[2], Some(32.0));
    assert_eq!(table.column("PRCP_lag_-1").unwrap().values[1], Some(33.0));

    // window at p covers filtered positions p-369..=p-365
    let window = &table.column("PRCP_mean_5d_window").unwrap().values;
    let p = 400;
    let expected = (p - 369..=p - 365).map(|q| (q + 31) as f64).sum::<f64>() / 5.0;
    assert_eq!(window[p], Some(expected));
}

#[test]
fn test_output_is_deterministic() {
    let input = TempDir::new().expect("Failed to create temp directory");
    let output = TempDir::new().expect("Failed to create temp directory");
    let start = NaiveDate::from_ymd_opt(2013, 1, 1).unwrap();
    write_station_csv(&input.path().join("varying.csv"), start, 420, |i| {
        ((i * 37) % 200) as i64 - 50
    });

    let processor = BatchProcessor::default();
    processor
        .process_directory(input.path(), output.path(), None)
        .expect("First run failed");
    let first = fs::read(output.path().join("varying.csv")).expect("Missing output");

    processor
        .process_directory(input.path(), output.path(), None)
        .expect("Second run failed");
    let second = fs::read(output.path().join("varying.csv")).expect("Missing output");

    assert_eq!(first, second);
    assert!(!first.is_empty());
}

#[test]
fn test_pre_threshold_station_writes_header_only() {
    let input = TempDir::new().expect("Failed to create temp directory");
    let output = TempDir::new().expect("Failed to create temp directory");
    let start = NaiveDate::from_ymd_opt(2010, 1, 1).unwrap();
    write_station_csv(&input.path().join("old.csv"), start, 300, |_| 5);

    let report = BatchProcessor::default()
        .process_directory(input.path(), output.path(), None)
        .expect("Batch failed");

    assert_eq!(report.processed[0].output_rows, 0);
    let (headers, rows) = read_rows(&output.path().join("old.csv"));
    assert_eq!(headers.len(), 149);
    assert!(rows.is_empty());
}

#[test]
fn test_analyzer_reads_batch_output() {
    let input = TempDir::new().expect("Failed to create temp directory");
    let output = TempDir::new().expect("Failed to create temp directory");
    let start = NaiveDate::from_ymd_opt(2013, 1, 1).unwrap();
    write_station_csv(&input.path().join("s.csv"), start, 400, |_| 0);

    let config = FeatureConfig::default();
    BatchProcessor::new(config)
        .process_directory(input.path(), output.path(), None)
        .expect("Batch failed");

    let stats = FeatureAnalyzer::new()
        .analyze(&output.path().join("s.csv"))
        .expect("Analysis failed");

    assert_eq!(stats.total_rows, 27);
    assert_eq!(stats.total_columns, 149);
    assert_eq!(stats.year_range, Some((2014, 2014)));
    assert_eq!(stats.variables[1].name, "TMIN");
    assert_eq!(stats.variables[1].mean, 32.0);
}
