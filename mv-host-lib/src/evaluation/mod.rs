mod axis;
mod error_evaluator;
mod metric_record;
mod motion_model;
mod orchestrator;

pub use axis::Axis;
pub use error_evaluator::{absolute_error, evaluate_portion, relative_error, rms_error};
pub use metric_record::{MetricKind, MetricRecord};
pub use motion_model::{expected_profile, generate, ExpectedFunction, ExpectedProfile};
pub use orchestrator::{evaluate_batch, evaluate_test, TestCase};

pub use crate::dataset::Portion;
