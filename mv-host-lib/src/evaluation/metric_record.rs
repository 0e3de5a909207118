use std::fmt;

use serde::Serialize;

use super::Axis;
use crate::dataset::Portion;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum MetricKind {
    /// Root mean square error over the whole portion.
    Rms,
    /// Absolute error at the last reading.
    Abs,
    /// Expected value at the last reading.
    Exp,
    /// Actual value at the last reading.
    Act,
}

impl MetricKind {
    pub const ALL: [MetricKind; 4] = [
        MetricKind::Rms,
        MetricKind::Abs,
        MetricKind::Exp,
        MetricKind::Act,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            MetricKind::Rms => "RMS",
            MetricKind::Abs => "ABS",
            MetricKind::Exp => "EXP",
            MetricKind::Act => "ACT",
        }
    }
}

impl fmt::Display for MetricKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricRecord {
    pub test_name: String,
    pub version: String,
    pub axis: Axis,
    pub portion: Portion,
    pub metric: MetricKind,
    pub value: f64,
}
