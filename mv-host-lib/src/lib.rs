pub mod capture;
pub mod common;
pub mod dataset;
pub mod description;
pub mod evaluation;
mod error;

pub use capture::{
    decode_calibration, decode_capture_file, decode_capture_window, Calibration,
    CalibrationEntry, CaptureRecord,
};
pub use common::MetricCSVWriter;
pub use dataset::{normalize, parse_time_series, read_time_series, segment, IMUReading, TimeSeries};
pub use description::{load_test_description, DescriptionError, TestDescription};
pub use error::{Error, Result};
pub use evaluation::{
    evaluate_batch, evaluate_test, Axis, ExpectedFunction, MetricKind, MetricRecord, Portion,
    TestCase,
};
