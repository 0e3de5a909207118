mod imu_reading;
mod parse_time_series;
mod segmenter;

pub use imu_reading::{IMUReading, TimeSeries};
pub use parse_time_series::{parse_time_series, read_time_series, DEFAULT_HEADERS};
pub use segmenter::{normalize, segment, Portion, Segments};
