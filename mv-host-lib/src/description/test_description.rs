use serde::{Deserialize, Serialize};

use crate::evaluation::Axis;

#[derive(Debug, thiserror::Error)]
pub enum DescriptionError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("line {line}: {message}")]
    Syntax { line: usize, message: String },

    #[error("{key}: {message}")]
    Eval { key: String, message: String },

    #[error("unknown key {0:?}")]
    UnknownKey(String),

    #[error("missing required key {0:?}")]
    MissingKey(&'static str),

    #[error("duration must be positive, got {0} s")]
    NonPositiveDuration(f64),
}

/// A commanded move. Times are in seconds, distances in device units.
#[derive(Debug, Clone, PartialEq)]
pub struct TestDescription {
    pub start_time: f64,
    pub duration: f64,
    pub radius: Option<f64>,
    pub x_rotation: f64,
    pub y_rotation: f64,
    pub z_rotation: f64,
    pub x_translation: f64,
    pub y_translation: f64,
    pub z_translation: f64,
}

impl TestDescription {
    pub fn start_time_ms(&self) -> f64 {
        self.start_time * 1000.0
    }

    pub fn duration_ms(&self) -> f64 {
        self.duration * 1000.0
    }

    pub fn distance(&self, axis: Axis) -> f64 {
        match axis {
            Axis::XRotation => self.x_rotation,
            Axis::YRotation => self.y_rotation,
            Axis::ZRotation => self.z_rotation,
            Axis::XTranslation => self.x_translation,
            Axis::YTranslation => self.y_translation,
            Axis::ZTranslation => self.z_translation,
        }
    }

    pub fn from_json(text: &str) -> Result<Self, DescriptionError> {
        let description: TestDescriptionSerde = serde_json::from_str(text)?;
        description.try_into()
    }
}

/// Loosely typed form shared by the JSON and expression loaders.
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
#[serde(default, deny_unknown_fields)]
pub struct TestDescriptionSerde {
    pub start_time: Option<f64>,
    pub duration: Option<f64>,
    pub radius: Option<f64>,
    pub x_rotation: Option<f64>,
    pub y_rotation: Option<f64>,
    pub z_rotation: Option<f64>,
    pub x_translation: Option<f64>,
    pub y_translation: Option<f64>,
    pub z_translation: Option<f64>,
}

impl TestDescriptionSerde {
    /// Sets a field by its description key.
    pub fn set(&mut self, key: &str, value: Option<f64>) -> Result<(), DescriptionError> {
        let field = match key {
            "start_time" => &mut self.start_time,
            "duration" => &mut self.duration,
            "radius" => &mut self.radius,
            _ => match Axis::from_name(key) {
                Some(axis) => self.axis_mut(axis),
                None => return Err(DescriptionError::UnknownKey(key.into())),
            },
        };
        *field = value;
        Ok(())
    }

    fn axis_mut(&mut self, axis: Axis) -> &mut Option<f64> {
        match axis {
            Axis::XRotation => &mut self.x_rotation,
            Axis::YRotation => &mut self.y_rotation,
            Axis::ZRotation => &mut self.z_rotation,
            Axis::XTranslation => &mut self.x_translation,
            Axis::YTranslation => &mut self.y_translation,
            Axis::ZTranslation => &mut self.z_translation,
        }
    }
}

impl TryFrom<TestDescriptionSerde> for TestDescription {
    type Error = DescriptionError;

    fn try_from(value: TestDescriptionSerde) -> Result<Self, Self::Error> {
        let start_time = value
            .start_time
            .ok_or(DescriptionError::MissingKey("start_time"))?;
        let duration = value
            .duration
            .ok_or(DescriptionError::MissingKey("duration"))?;
        if !(duration > 0.0) {
            return Err(DescriptionError::NonPositiveDuration(duration));
        }

        Ok(TestDescription {
            start_time,
            duration,
            radius: value.radius,
            x_rotation: value.x_rotation.unwrap_or(0.0),
            y_rotation: value.y_rotation.unwrap_or(0.0),
            z_rotation: value.z_rotation.unwrap_or(0.0),
            x_translation: value.x_translation.unwrap_or(0.0),
            y_translation: value.y_translation.unwrap_or(0.0),
            z_translation: value.z_translation.unwrap_or(0.0),
        })
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn json_defaults_missing_axes_to_zero() {
        let description =
            TestDescription::from_json(r#"{"start_time": 0.5, "duration": 2, "x_translation": 10}"#)
                .unwrap();
        assert_eq!(description.start_time_ms(), 500.0);
        assert_eq!(description.duration_ms(), 2000.0);
        assert_eq!(description.radius, None);
        assert_eq!(description.distance(Axis::XTranslation), 10.0);
        assert_eq!(description.distance(Axis::YRotation), 0.0);
    }

    #[test]
    fn json_requires_start_time() {
        let result = TestDescription::from_json(r#"{"duration": 2}"#);
        assert!(matches!(result, Err(DescriptionError::MissingKey("start_time"))));
    }

    #[test]
    fn json_rejects_unknown_keys() {
        let result = TestDescription::from_json(r#"{"start_time": 0, "duration": 1, "w": 3}"#);
        assert!(matches!(result, Err(DescriptionError::Json(_))));
    }

    #[test]
    fn zero_duration_is_rejected() {
        let result = TestDescription::from_json(r#"{"start_time": 0, "duration": 0}"#);
        assert!(matches!(result, Err(DescriptionError::NonPositiveDuration(_))));
    }
}
