use nalgebra::Vector3;

#[derive(Debug, Clone, PartialEq)]
pub struct IMUReading {
    pub timestamp: f64, // ms
    pub gyro: Vector3<f64>,
    pub acc: Vector3<f64>,
}

impl IMUReading {
    pub fn new(timestamp: f64, gyro: [f64; 3], acc: [f64; 3]) -> Self {
        Self {
            timestamp,
            gyro: Vector3::from(gyro),
            acc: Vector3::from(acc),
        }
    }
}

/// Time-ordered IMU readings from one acquisition.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TimeSeries {
    readings: Vec<IMUReading>,
}

impl TimeSeries {
    pub fn new(readings: Vec<IMUReading>) -> Self {
        Self { readings }
    }

    pub fn readings(&self) -> &[IMUReading] {
        &self.readings
    }

    pub fn len(&self) -> usize {
        self.readings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.readings.is_empty()
    }

    pub fn first(&self) -> Option<&IMUReading> {
        self.readings.first()
    }

    pub fn last(&self) -> Option<&IMUReading> {
        self.readings.last()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, IMUReading> {
        self.readings.iter()
    }
}

impl From<Vec<IMUReading>> for TimeSeries {
    fn from(readings: Vec<IMUReading>) -> Self {
        Self::new(readings)
    }
}

impl FromIterator<IMUReading> for TimeSeries {
    fn from_iter<I: IntoIterator<Item = IMUReading>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a TimeSeries {
    type Item = &'a IMUReading;
    type IntoIter = std::slice::Iter<'a, IMUReading>;

    fn into_iter(self) -> Self::IntoIter {
        self.readings.iter()
    }
}
