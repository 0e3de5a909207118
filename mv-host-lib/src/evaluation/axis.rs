use std::fmt;

use serde::Serialize;

use crate::dataset::IMUReading;

/// Logical motion channel of an acceptance test.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Axis {
    XRotation,
    YRotation,
    ZRotation,
    XTranslation,
    YTranslation,
    ZTranslation,
}

impl Axis {
    pub const ALL: [Axis; 6] = [
        Axis::XRotation,
        Axis::YRotation,
        Axis::ZRotation,
        Axis::XTranslation,
        Axis::YTranslation,
        Axis::ZTranslation,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Axis::XRotation => "x_rotation",
            Axis::YRotation => "y_rotation",
            Axis::ZRotation => "z_rotation",
            Axis::XTranslation => "x_translation",
            Axis::YTranslation => "y_translation",
            Axis::ZTranslation => "z_translation",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|axis| axis.name() == name)
    }

    /// Name of the physical data column the axis is measured on.
    pub fn column_name(&self) -> &'static str {
        match self {
            Axis::XRotation => "gyro_x",
            Axis::YRotation => "gyro_y",
            Axis::ZRotation => "gyro_z",
            Axis::XTranslation => "acc_x",
            Axis::YTranslation => "acc_y",
            Axis::ZTranslation => "acc_z",
        }
    }

    pub fn value(&self, reading: &IMUReading) -> f64 {
        match self {
            Axis::XRotation => reading.gyro.x,
            Axis::YRotation => reading.gyro.y,
            Axis::ZRotation => reading.gyro.z,
            Axis::XTranslation => reading.acc.x,
            Axis::YTranslation => reading.acc.y,
            Axis::ZTranslation => reading.acc.z,
        }
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
