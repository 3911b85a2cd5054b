// Console report and flat-file export
pub mod console;
pub mod exporter;

pub use console::ConsoleReporter;
pub use exporter::{CsvExporter, EXPORT_FILES, ExportSummary};
