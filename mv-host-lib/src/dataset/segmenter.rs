use std::fmt;

use log::debug;
use serde::Serialize;

use super::{IMUReading, TimeSeries};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Portion {
    Pre,
    Test,
    Post,
}

impl Portion {
    pub const ALL: [Portion; 3] = [Portion::Pre, Portion::Test, Portion::Post];

    pub fn as_str(&self) -> &'static str {
        match self {
            Portion::Pre => "pre",
            Portion::Test => "test",
            Portion::Post => "post",
        }
    }
}

impl fmt::Display for Portion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Segments {
    pub pre: TimeSeries,
    pub test: TimeSeries,
    pub post: TimeSeries,
}

impl Segments {
    pub fn get(&self, portion: Portion) -> &TimeSeries {
        match portion {
            Portion::Pre => &self.pre,
            Portion::Test => &self.test,
            Portion::Post => &self.post,
        }
    }
}

/// Shifts every timestamp so the series starts at 0.
pub fn normalize(series: &TimeSeries) -> TimeSeries {
    let Some(start) = series.first().map(|reading| reading.timestamp) else {
        return TimeSeries::default();
    };
    series
        .iter()
        .map(|reading| IMUReading {
            timestamp: reading.timestamp - start,
            ..reading.clone()
        })
        .collect()
}

/// Splits a normalized series around the move window `[start_time, start_time + duration]`.
/// Readings on either boundary belong to the test portion.
pub fn segment(series: &TimeSeries, start_time: f64, duration: f64) -> Segments {
    let end_time = start_time + duration;
    let mut pre = Vec::new();
    let mut test = Vec::new();
    let mut post = Vec::new();

    for reading in series {
        if reading.timestamp < start_time {
            pre.push(reading.clone());
        } else if reading.timestamp > end_time {
            post.push(reading.clone());
        } else {
            test.push(reading.clone());
        }
    }

    debug!(
        "segmented {} readings around [{}, {}] ms: pre {}, test {}, post {}",
        series.len(),
        start_time,
        end_time,
        pre.len(),
        test.len(),
        post.len()
    );

    Segments {
        pre: pre.into(),
        test: test.into(),
        post: post.into(),
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn series(timestamps: &[f64]) -> TimeSeries {
        timestamps
            .iter()
            .enumerate()
            .map(|(i, t)| IMUReading::new(*t, [i as f64; 3], [-(i as f64); 3]))
            .collect()
    }

    #[test]
    fn normalize_starts_at_zero() {
        let normalized = normalize(&series(&[1500.0, 1510.0, 1535.0]));
        let timestamps: Vec<f64> = normalized.iter().map(|r| r.timestamp).collect();
        assert_eq!(timestamps, vec![0.0, 10.0, 35.0]);
        assert_eq!(normalized.readings()[2].gyro.x, 2.0);
    }

    #[test]
    fn normalize_empty() {
        assert!(normalize(&TimeSeries::default()).is_empty());
    }

    #[test]
    fn boundaries_belong_to_test() {
        let input = series(&[0.0, 999.0, 1000.0, 2000.0, 3000.0, 3001.0]);
        let segments = segment(&input, 1000.0, 2000.0);
        let timestamps = |s: &TimeSeries| s.iter().map(|r| r.timestamp).collect::<Vec<_>>();
        assert_eq!(timestamps(&segments.pre), vec![0.0, 999.0]);
        assert_eq!(timestamps(&segments.test), vec![1000.0, 2000.0, 3000.0]);
        assert_eq!(timestamps(&segments.post), vec![3001.0]);
    }

    #[test]
    fn partition_is_exhaustive_and_disjoint() {
        let input = normalize(&series(&[3.0, 4.0, 9.0, 9.5, 12.0, 20.0, 21.0, 40.0]));
        for (start, duration) in [(0.0, 0.0), (5.0, 1.0), (6.0, 10.0), (50.0, 5.0), (0.0, 100.0)] {
            let segments = segment(&input, start, duration);
            let mut rebuilt: Vec<IMUReading> = Portion::ALL
                .iter()
                .flat_map(|portion| segments.get(*portion).readings().to_vec())
                .collect();
            rebuilt.sort_by(|a, b| a.timestamp.total_cmp(&b.timestamp));
            assert_eq!(rebuilt, input.readings());
        }
    }

    #[test]
    fn move_at_start_leaves_pre_empty() {
        let segments = segment(&series(&[0.0, 1.0, 2.0]), 0.0, 1.0);
        assert!(segments.pre.is_empty());
        assert_eq!(segments.test.len(), 2);
        assert_eq!(segments.post.len(), 1);
    }
}
