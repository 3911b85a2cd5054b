use crate::application::pipeline::AnalysisReport;
use crate::domain::errors::ExportError;
use crate::domain::market::DateFrame;
use crate::domain::performance::{CorrelationMatrix, STATISTICS_COLUMNS, StatisticsRecord};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{error, info, warn};

pub const PRICES_FILE: &str = "currency_prices_and_ma.csv";
pub const STATISTICS_FILE: &str = "currency_statistics.csv";
pub const RETURNS_FILE: &str = "currency_returns.csv";
pub const SIGNALS_FILE: &str = "trading_signals.csv";
pub const CORRELATION_FILE: &str = "correlation_matrix.csv";

/// Export files with their descriptions, in write order.
pub const EXPORT_FILES: [(&str, &str); 5] = [
    (PRICES_FILE, "Historical prices and moving averages"),
    (STATISTICS_FILE, "Key statistics for each currency pair"),
    (RETURNS_FILE, "Daily percentage returns"),
    (SIGNALS_FILE, "Buy/sell signals based on moving averages"),
    (CORRELATION_FILE, "Correlation between currency pairs"),
];

/// Files written and files that failed during one export pass.
#[derive(Debug, Default)]
pub struct ExportSummary {
    pub written: Vec<PathBuf>,
    pub failures: Vec<ExportError>,
}

impl ExportSummary {
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }

    fn record(&mut self, result: Result<PathBuf, ExportError>) {
        match result {
            Ok(path) => {
                info!("Saved {}", path.display());
                self.written.push(path);
            }
            Err(e) => {
                error!("Error saving files: {}", e);
                self.failures.push(e);
            }
        }
    }
}

/// Writes the derived tables as comma-separated files. Missing values are
/// written as empty cells.
pub struct CsvExporter {
    output_dir: PathBuf,
}

impl CsvExporter {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
        }
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    fn open(&self, path: &Path) -> Result<csv::Writer<fs::File>, ExportError> {
        let file = fs::File::create(path).map_err(|e| ExportError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        Ok(csv::Writer::from_writer(file))
    }

    /// Writes all five tables. A failing file is reported and skipped.
    pub fn export_all(&self, report: &AnalysisReport) -> ExportSummary {
        let mut summary = ExportSummary::default();

        if let Err(e) = fs::create_dir_all(&self.output_dir) {
            warn!(
                "Could not create output directory {}: {}",
                self.output_dir.display(),
                e
            );
        }

        let prices = match report.prices_with_moving_averages() {
            Ok(table) => table,
            Err(e) => {
                warn!("Exporting prices without moving averages: {}", e);
                report.prices.clone()
            }
        };

        summary.record(self.write_frame(PRICES_FILE, &prices, float_cell));
        summary.record(self.write_statistics(&report.statistics));
        summary.record(self.write_frame(RETURNS_FILE, &report.returns, float_cell));
        summary.record(self.write_frame(SIGNALS_FILE, &report.signals, |s| s.code().to_string()));
        summary.record(self.write_correlation(&report.correlation));

        summary
    }

    /// A date-indexed table with `Date` as the leading column.
    pub fn write_frame<T, F>(&self, file: &str, frame: &DateFrame<T>, cell: F) -> Result<PathBuf, ExportError>
    where
        F: Fn(&T) -> String,
    {
        let path = self.output_dir.join(file);
        let mut writer = self.open(&path)?;

        let mut header = vec!["Date".to_string()];
        header.extend(frame.columns().iter().cloned());
        writer.write_record(&header).map_err(|e| csv_error(&path, e))?;

        for (row, date) in frame.index().iter().enumerate() {
            let mut record = vec![date.format("%Y-%m-%d").to_string()];
            record.extend(frame.row(row).map(|(_, value)| cell(value)));
            writer.write_record(&record).map_err(|e| csv_error(&path, e))?;
        }

        writer.flush().map_err(|e| ExportError::Io {
            path: path.clone(),
            source: e,
        })?;
        Ok(path)
    }

    /// One row per pair, rounded statistics as columns.
    pub fn write_statistics(&self, records: &[StatisticsRecord]) -> Result<PathBuf, ExportError> {
        let path = self.output_dir.join(STATISTICS_FILE);
        let mut writer = self.open(&path)?;

        let mut header = vec!["Pair"];
        header.extend(STATISTICS_COLUMNS);
        writer.write_record(&header).map_err(|e| csv_error(&path, e))?;

        for record in records {
            let mut row = vec![record.pair.clone()];
            row.extend(
                record
                    .rounded()
                    .iter()
                    .map(|v| v.map(|d| d.to_string()).unwrap_or_default()),
            );
            writer.write_record(&row).map_err(|e| csv_error(&path, e))?;
        }

        writer.flush().map_err(|e| ExportError::Io {
            path: path.clone(),
            source: e,
        })?;
        Ok(path)
    }

    pub fn write_correlation(&self, matrix: &CorrelationMatrix) -> Result<PathBuf, ExportError> {
        let path = self.output_dir.join(CORRELATION_FILE);
        let mut writer = self.open(&path)?;

        let mut header = vec!["Pair".to_string()];
        header.extend(matrix.pairs().iter().cloned());
        writer.write_record(&header).map_err(|e| csv_error(&path, e))?;

        for (i, pair) in matrix.pairs().iter().enumerate() {
            let mut row = vec![pair.clone()];
            row.extend(matrix.row(i).iter().map(float_cell));
            writer.write_record(&row).map_err(|e| csv_error(&path, e))?;
        }

        writer.flush().map_err(|e| ExportError::Io {
            path: path.clone(),
            source: e,
        })?;
        Ok(path)
    }
}

fn float_cell(value: &Option<f64>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

fn csv_error(path: &Path, err: csv::Error) -> ExportError {
    ExportError::Csv {
        path: path.to_path_buf(),
        source: err,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::reporting::ConsoleReporter;
    use crate::domain::market::{PriceTable, Signal, SignalTable};
    use chrono::NaiveDate;

    fn index() -> Vec<NaiveDate> {
        vec![
            NaiveDate::from_ymd_opt(2024, 1, 2).unwrap(),
            NaiveDate::from_ymd_opt(2024, 1, 3).unwrap(),
        ]
    }

    #[test]
    fn test_write_frame_leaves_missing_cells_empty() {
        let dir = tempfile::tempdir().unwrap();
        let exporter = CsvExporter::new(dir.path());

        let mut prices = PriceTable::new(index());
        prices.insert_column("EURUSD=X", vec![None, Some(1.5)]).unwrap();
        let path = exporter.write_frame(PRICES_FILE, &prices, float_cell).unwrap();

        let content = fs::read_to_string(path).unwrap();
        assert_eq!(content, "Date,EURUSD=X\n2024-01-02,\n2024-01-03,1.5\n");
    }

    #[test]
    fn test_signals_are_written_as_codes() {
        let dir = tempfile::tempdir().unwrap();
        let exporter = CsvExporter::new(dir.path());

        let mut signals = SignalTable::new(index());
        signals.insert_column("A", vec![Signal::Hold, Signal::Sell]).unwrap();
        signals.insert_column("B", vec![Signal::Hold, Signal::Buy]).unwrap();
        let path = exporter
            .write_frame(SIGNALS_FILE, &signals, |s| s.code().to_string())
            .unwrap();

        let content = fs::read_to_string(path).unwrap();
        assert_eq!(content, "Date,A,B\n2024-01-02,0,0\n2024-01-03,-1,1\n");
    }

    #[test]
    fn test_statistics_are_keyed_by_pair() {
        let dir = tempfile::tempdir().unwrap();
        let exporter = CsvExporter::new(dir.path());

        let record = StatisticsRecord {
            pair: "USDINR=X".to_string(),
            mean_daily_return: Some(0.5),
            std_daily_return: Some(0.25),
            min_daily_return: Some(-0.9803921568627416),
            max_daily_return: Some(2.0000000000000018),
            total_return: Some(1.0000000000000009),
            volatility_annualized: None,
        };
        let path = exporter.write_statistics(&[record]).unwrap();

        let content = fs::read_to_string(path).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(
            lines[0],
            "Pair,Mean_Daily_Return,Std_Daily_Return,Min_Daily_Return,Max_Daily_Return,Total_Return,Volatility_Annualized"
        );
        assert!(lines[1].starts_with("USDINR=X,0.5"));
        assert!(lines[1].contains(",-0.9804,"));
        assert!(lines[1].ends_with(","));
    }

    #[test]
    fn test_unwritable_directory_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("not_a_dir");
        fs::write(&blocker, "x").unwrap();
        let exporter = CsvExporter::new(blocker.join("nested"));

        let result = exporter.write_correlation(&CorrelationMatrix::from_upper_triangle(
            vec!["A".to_string()],
            &[true],
            |_, _| None,
        ));
        assert!(matches!(result, Err(ExportError::Io { .. })));
    }

    fn report() -> AnalysisReport {
        let pairs = vec!["EURUSD=X".to_string()];

        let mut prices = PriceTable::new(index());
        prices.insert_column("EURUSD=X", vec![Some(1.10), Some(1.12)]).unwrap();
        let mut moving_averages = PriceTable::new(index());
        moving_averages
            .insert_column("EURUSD=X_MA_2", vec![None, Some(1.11)])
            .unwrap();
        let mut returns = PriceTable::new(index()[1..].to_vec());
        returns.insert_column("EURUSD=X", vec![Some(1.818)]).unwrap();
        let mut signals = SignalTable::new(index());
        signals
            .insert_column("EURUSD=X", vec![Signal::Hold, Signal::Hold])
            .unwrap();

        AnalysisReport {
            start_date: index()[0],
            end_date: index()[1],
            pairs: pairs.clone(),
            failures: Vec::new(),
            prices,
            moving_averages,
            short_window: 2,
            long_window: 3,
            returns,
            statistics: Vec::new(),
            signals,
            volatility: PriceTable::new(index()[1..].to_vec()),
            correlation: CorrelationMatrix::from_upper_triangle(pairs, &[false], |_, _| None),
        }
    }

    #[test]
    fn test_export_continues_after_one_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join(SIGNALS_FILE)).unwrap();
        let exporter = CsvExporter::new(dir.path());

        let summary = exporter.export_all(&report());

        assert!(!summary.is_complete());
        assert_eq!(summary.failures.len(), 1);
        assert!(matches!(&summary.failures[0], ExportError::Io { path, .. } if path.ends_with(SIGNALS_FILE)));
        assert_eq!(summary.written.len(), 4);
        for file in [PRICES_FILE, STATISTICS_FILE, RETURNS_FILE, CORRELATION_FILE] {
            assert!(summary.written.iter().any(|p| p.ends_with(file)), "{} not written", file);
            assert!(dir.path().join(file).is_file());
        }

        let text = ConsoleReporter::new().format_export_summary(&summary);
        assert!(text.starts_with("Error saving files: "));
        assert!(!text.contains("All results saved"));
        assert!(!text.contains(&format!("- {}", SIGNALS_FILE)));
        assert!(text.contains(&format!("- {}", PRICES_FILE)));
    }
}
