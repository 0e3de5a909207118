use log::{debug, info};

use super::{evaluate_portion, expected_profile, Axis, MetricRecord};
use crate::{
    dataset::{normalize, segment, Portion, TimeSeries},
    description::TestDescription,
    Result,
};

/// One acceptance test and the recordings of every device version under test.
#[derive(Debug, Clone)]
pub struct TestCase {
    pub name: String,
    pub description: TestDescription,
    /// `(version, recording)` pairs, evaluated in order.
    pub datasets: Vec<(String, TimeSeries)>,
}

/// Evaluates one recording against its test description.
///
/// Records are emitted axis by axis in [`Axis::ALL`] order, and within an axis
/// in pre, test, post order. Empty portions contribute nothing.
pub fn evaluate_test(
    test_name: &str,
    version: &str,
    dataset: &TimeSeries,
    description: &TestDescription,
) -> Result<Vec<MetricRecord>> {
    let start_time = description.start_time_ms();
    let duration = description.duration_ms();
    let segments = segment(&normalize(dataset), start_time, duration);

    let mut records = Vec::new();
    for axis in Axis::ALL {
        let profile = expected_profile(start_time, duration, description.distance(axis));
        debug!(
            "{} {} {}: {} over {} ms, {}/ms",
            test_name,
            version,
            axis,
            profile.test.endpoint(),
            duration,
            profile.test.average_velocity()
        );
        for portion in Portion::ALL {
            if let Some(portion_records) = evaluate_portion(
                test_name,
                version,
                segments.get(portion),
                &profile.get(portion),
                portion,
                axis,
            )? {
                records.extend(portion_records);
            }
        }
    }

    info!(
        "{} {}: {} readings, {} metrics",
        test_name,
        version,
        dataset.len(),
        records.len()
    );
    Ok(records)
}

/// Evaluates every version of every test case. The first failure aborts the batch.
pub fn evaluate_batch(cases: &[TestCase]) -> Result<Vec<MetricRecord>> {
    let mut records = Vec::new();
    for case in cases {
        for (version, dataset) in &case.datasets {
            records.extend(evaluate_test(
                &case.name,
                version,
                dataset,
                &case.description,
            )?);
        }
    }
    Ok(records)
}
