//! Sequential processing of sensor packages
//!
//! Each package is dispatched on its own; unknown codes and broken packages
//! are reported in place and never stop the run. Output order always follows
//! input order.

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::io::Write;
use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::dispatch::{read_package, PackageOutcome};
use crate::error::{ErrorSeverity, Result};
use crate::models::InfoMessage;
use crate::packages::Package;
use crate::training::Training;

/// How processed packages are written out
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// One summary line per workout
    #[default]
    Text,
    /// JSON array of summaries
    Json,
    /// Terminal table
    Table,
}

/// What happened to a single package
#[derive(Debug, Clone, PartialEq)]
pub enum PackageResult {
    Summary(InfoMessage),
    UnknownCode(String),
    Invalid { code: String, reason: String },
}

impl PackageResult {
    /// Line written for this package in text output
    pub fn line(&self) -> String {
        match self {
            PackageResult::Summary(message) => message.render(),
            PackageResult::UnknownCode(code) => format!("There is no such workout: {}", code),
            PackageResult::Invalid { code, reason } => {
                format!("Invalid package {}: {}", code, reason)
            }
        }
    }
}

/// Results of one run, in input order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RunReport {
    pub entries: Vec<PackageResult>,
}

impl RunReport {
    pub fn summaries(&self) -> impl Iterator<Item = &InfoMessage> {
        self.entries.iter().filter_map(|entry| match entry {
            PackageResult::Summary(message) => Some(message),
            _ => None,
        })
    }

    pub fn processed(&self) -> usize {
        self.summaries().count()
    }

    pub fn unknown(&self) -> usize {
        self.entries
            .iter()
            .filter(|entry| matches!(entry, PackageResult::UnknownCode(_)))
            .count()
    }

    pub fn invalid(&self) -> usize {
        self.entries
            .iter()
            .filter(|entry| matches!(entry, PackageResult::Invalid { .. }))
            .count()
    }
}

/// Dispatch a single package and compute its summary
pub fn process_package(package: &Package) -> PackageResult {
    match read_package(&package.code, &package.values) {
        Ok(PackageOutcome::Found(workout)) => PackageResult::Summary(workout.summary()),
        Ok(PackageOutcome::UnknownCode(code)) => PackageResult::UnknownCode(code),
        Err(err) => {
            match err.severity() {
                ErrorSeverity::Warning => {
                    tracing::warn!(code = %package.code, "Skipping package: {}", err)
                }
                ErrorSeverity::Error => {
                    tracing::error!(code = %package.code, "Skipping package: {}", err)
                }
            }
            PackageResult::Invalid {
                code: package.code.clone(),
                reason: err.to_string(),
            }
        }
    }
}

/// Process every package in order
pub fn run_packages(packages: &[Package]) -> RunReport {
    let _span = tracing::info_span!("run_packages", count = packages.len()).entered();

    let report = RunReport {
        entries: packages.iter().map(process_package).collect(),
    };

    tracing::info!(
        processed = report.processed(),
        unknown = report.unknown(),
        invalid = report.invalid(),
        "Run finished"
    );
    report
}

#[derive(Tabled)]
struct SummaryRow {
    #[tabled(rename = "Workout")]
    training_type: String,
    #[tabled(rename = "Duration, h")]
    duration: String,
    #[tabled(rename = "Distance, km")]
    distance: String,
    #[tabled(rename = "Speed, km/h")]
    speed: String,
    #[tabled(rename = "Calories, kcal")]
    calories: String,
}

impl From<&InfoMessage> for SummaryRow {
    fn from(message: &InfoMessage) -> Self {
        Self {
            training_type: message.training_type.clone(),
            duration: format!("{:.3}", message.duration),
            distance: format!("{:.3}", message.distance),
            speed: format!("{:.3}", message.speed),
            calories: format!("{:.3}", message.calories),
        }
    }
}

/// Write a report in the requested format
pub fn write_report<W: Write>(report: &RunReport, format: OutputFormat, out: &mut W) -> Result<()> {
    match format {
        OutputFormat::Text => {
            for entry in &report.entries {
                writeln!(out, "{}", entry.line())?;
            }
        }
        OutputFormat::Json => {
            let summaries: Vec<&InfoMessage> = report.summaries().collect();
            serde_json::to_writer_pretty(&mut *out, &summaries)?;
            writeln!(out)?;
        }
        OutputFormat::Table => {
            let rows: Vec<SummaryRow> = report.summaries().map(SummaryRow::from).collect();
            let mut table = Table::new(rows);
            table.with(Style::modern());
            writeln!(out, "{}", table)?;

            for entry in &report.entries {
                if !matches!(entry, PackageResult::Summary(_)) {
                    writeln!(out, "{}", entry.line())?;
                }
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::packages::sample_packages;
    use std::sync::{Arc, Mutex};

    fn render(report: &RunReport, format: OutputFormat) -> String {
        let mut buffer = Vec::new();
        write_report(report, format, &mut buffer).unwrap();
        String::from_utf8(buffer).unwrap()
    }

    #[test]
    fn test_sample_run_text() {
        let report = run_packages(&sample_packages());
        assert_eq!(report.processed(), 3);

        let lines: Vec<String> = render(&report, OutputFormat::Text)
            .lines()
            .map(str::to_string)
            .collect();
        assert_eq!(
            lines,
            vec![
                "Тип тренировки: Swimming; Длительность: 1.000 ч.; Дистанция: 0.994 км; Ср. скорость: 1.000 км/ч; Потрачено ккал: 336.000.",
                "Тип тренировки: Running; Длительность: 1.000 ч.; Дистанция: 9.750 км; Ср. скорость: 9.750 км/ч; Потрачено ккал: 699.750.",
                "Тип тренировки: SportsWalking; Длительность: 1.000 ч.; Дистанция: 5.850 км; Ср. скорость: 5.850 км/ч; Потрачено ккал: 157.500.",
            ]
        );
    }

    #[test]
    fn test_unknown_and_invalid_are_skipped_in_place() {
        let packages = vec![
            Package::new("XYZ", vec![1.0]),
            Package::new("RUN", vec![15000.0, 1.0]),
            Package::new("RUN", vec![15000.0, 1.0, 75.0]),
        ];
        let report = run_packages(&packages);

        assert_eq!(report.unknown(), 1);
        assert_eq!(report.invalid(), 1);
        assert_eq!(report.processed(), 1);

        let output = render(&report, OutputFormat::Text);
        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines[0], "There is no such workout: XYZ");
        assert_eq!(
            lines[1],
            "Invalid package RUN: Parse error: RUN expects 3 values, got 2"
        );
        assert!(lines[2].starts_with("Тип тренировки: Running;"));
    }

    #[derive(Clone, Default)]
    struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

    impl std::io::Write for CapturedLogs {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_invalid_package_logged_at_warn() {
        let logs = CapturedLogs::default();
        let writer = logs.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(move || writer.clone())
            .with_ansi(false)
            .without_time()
            .finish();

        let result = tracing::subscriber::with_default(subscriber, || {
            process_package(&Package::new("WLK", vec![9000.0, 1.0, 75.0]))
        });
        assert!(matches!(result, PackageResult::Invalid { .. }));

        let output = String::from_utf8(logs.0.lock().unwrap().clone()).unwrap();
        let line = output
            .lines()
            .find(|line| line.contains("Skipping package"))
            .unwrap();
        assert!(line.contains("WARN"));
        assert!(!line.contains("level="));
        assert!(line.contains("WLK expects 4 values, got 3"));
    }

    #[test]
    fn test_json_output() {
        let report = run_packages(&sample_packages());
        let output = render(&report, OutputFormat::Json);
        let parsed: Vec<InfoMessage> = serde_json::from_str(&output).unwrap();

        assert_eq!(parsed.len(), 3);
        assert_eq!(parsed[2].training_type, "SportsWalking");
    }

    #[test]
    fn test_table_output() {
        let mut packages = sample_packages();
        packages.push(Package::new("BIK", vec![]));
        let output = render(&run_packages(&packages), OutputFormat::Table);

        assert!(output.contains("Calories, kcal"));
        assert!(output.contains("336.000"));
        assert!(output.contains("SportsWalking"));
        assert!(output.trim_end().ends_with("There is no such workout: BIK"));
    }

    #[test]
    fn test_empty_input() {
        let report = run_packages(&[]);
        assert_eq!(report, RunReport::default());
        assert_eq!(render(&report, OutputFormat::Text), "");
    }
}
