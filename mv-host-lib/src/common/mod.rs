mod metric_csv_writer;

pub use metric_csv_writer::{MetricCSVWriter, METRIC_CSV_TITLES};
