use crate::application::pipeline::AnalysisReport;
use crate::application::reporting::exporter::{EXPORT_FILES, ExportSummary};
use crate::config::analysis::{CORRELATION_DECIMALS, RECENT_ROWS};
use crate::domain::market::{PriceTable, Signal};
use crate::domain::performance::{CorrelationMatrix, STATISTICS_COLUMNS, StatisticsRecord, Stats};
use rust_decimal::Decimal;
use std::fmt::Write;

const RULE_WIDTH: usize = 60;
const MISSING: &str = "NaN";

/// Human-readable console report. Every `format_*` method returns the text
/// its `print_*` counterpart writes to stdout.
#[derive(Debug, Default)]
pub struct ConsoleReporter;

impl ConsoleReporter {
    pub fn new() -> Self {
        Self
    }

    /// Statistics, recent prices, current signals and correlations.
    pub fn print_report(&self, report: &AnalysisReport) {
        println!("\n{}", "=".repeat(RULE_WIDTH));
        println!("ANALYSIS RESULTS");
        println!("{}", "=".repeat(RULE_WIDTH));

        println!("\nKEY STATISTICS:");
        println!("{}", self.format_statistics(&report.statistics));

        println!("\nRECENT PRICES (Last {} days):", RECENT_ROWS);
        println!("{}", self.format_prices(&report.prices.tail(RECENT_ROWS)));

        println!("\nCURRENT TRADING SIGNALS:");
        println!("{}", self.format_signals(&report.latest_signals()));

        println!("\nCorrelation Matrix of Daily Returns:");
        println!("{}", self.format_correlation(&report.correlation));

        if !report.failures.is_empty() {
            println!("\nSKIPPED PAIRS:");
            for failure in &report.failures {
                println!("{}: {}", failure.pair, failure.error);
            }
        }
    }

    pub fn print_insights(&self) {
        println!("\n{}", "=".repeat(RULE_WIDTH));
        println!("ANALYSIS COMPLETE!");
        println!("{}", "=".repeat(RULE_WIDTH));
        println!("\nKey Insights:");
        println!("1. Check the statistics table for risk-return profiles");
        println!("2. Higher volatility indicates more risk but potentially higher returns");
        println!("3. Trading signals based on moving average crossovers");
        println!("4. Correlation matrix shows how currencies move together");
        println!("5. Use this analysis as a foundation for developing trading strategies");
    }

    pub fn print_export_summary(&self, summary: &ExportSummary) {
        println!("{}", self.format_export_summary(summary));
    }

    /// Transposed statistics: one row per pair, one column per statistic.
    pub fn format_statistics(&self, records: &[StatisticsRecord]) -> String {
        let pair_width = pair_column_width(records.iter().map(|r| r.pair.as_str()));
        let mut out = String::new();

        let _ = write!(out, "{:<width$}", "", width = pair_width);
        for name in STATISTICS_COLUMNS {
            let _ = write!(out, " {:>22}", name);
        }

        for record in records {
            let _ = write!(out, "\n{:<width$}", record.pair, width = pair_width);
            for value in record.rounded() {
                let _ = write!(out, " {:>22}", decimal_cell(value));
            }
        }
        out
    }

    /// Dates down the side, one column per table column.
    pub fn format_prices(&self, table: &PriceTable) -> String {
        let mut out = String::new();
        let _ = write!(out, "{:<10}", "Date");
        for name in table.columns() {
            let _ = write!(out, " {:>14}", name);
        }

        for (row, date) in table.index().iter().enumerate() {
            let _ = write!(out, "\n{:<10}", date.format("%Y-%m-%d"));
            for (_, value) in table.row(row) {
                let cell = value.map(|v| format!("{:.6}", v)).unwrap_or_else(|| MISSING.to_string());
                let _ = write!(out, " {:>14}", cell);
            }
        }
        out
    }

    pub fn format_signals(&self, signals: &[(String, Signal)]) -> String {
        signals
            .iter()
            .map(|(pair, signal)| format!("{}: {}", pair, signal))
            .collect::<Vec<_>>()
            .join("\n")
    }

    pub fn format_correlation(&self, matrix: &CorrelationMatrix) -> String {
        let width = pair_column_width(matrix.pairs().iter().map(String::as_str));
        let mut out = String::new();

        let _ = write!(out, "{:<width$}", "", width = width);
        for pair in matrix.pairs() {
            let _ = write!(out, " {:>width$}", pair, width = width);
        }

        for (i, pair) in matrix.pairs().iter().enumerate() {
            let _ = write!(out, "\n{:<width$}", pair, width = width);
            for value in matrix.row(i) {
                let cell = decimal_cell(value.and_then(|v| Stats::round_dp(v, CORRELATION_DECIMALS)));
                let _ = write!(out, " {:>width$}", cell, width = width);
            }
        }
        out
    }

    pub fn format_export_summary(&self, summary: &ExportSummary) -> String {
        let mut out = String::new();
        if summary.is_complete() {
            out.push_str("All results saved to CSV files\n");
        } else {
            for failure in &summary.failures {
                let _ = writeln!(out, "Error saving files: {}", failure);
            }
        }

        out.push_str("\nFiles saved:");
        for (file, description) in EXPORT_FILES {
            if summary.written.iter().any(|p| p.ends_with(file)) {
                let _ = write!(out, "\n- {}: {}", file, description);
            }
        }
        out
    }
}

fn pair_column_width<'a>(pairs: impl Iterator<Item = &'a str>) -> usize {
    pairs.map(str::len).max().unwrap_or(0).max(8)
}

fn decimal_cell(value: Option<Decimal>) -> String {
    value.map(|v| v.to_string()).unwrap_or_else(|| MISSING.to_string())
}
