use log::debug;

use super::{Axis, ExpectedFunction, MetricKind, MetricRecord};
use crate::{
    dataset::{Portion, TimeSeries},
    Error, Result,
};

/// `|actual - expected|`. NaN or infinite operands are rejected.
pub fn absolute_error(expected: f64, actual: f64) -> Result<f64> {
    if !expected.is_finite() || !actual.is_finite() {
        return Err(Error::NonNumericOperand { expected, actual });
    }
    Ok((actual - expected).abs())
}

/// Error as a percentage of `expected`, or the absolute error when `expected` is zero.
pub fn relative_error(expected: f64, actual: f64) -> Result<f64> {
    let absolute = absolute_error(expected, actual)?;
    if expected == 0.0 {
        Ok(absolute)
    } else {
        Ok(100.0 * absolute / expected)
    }
}

/// RMS error of `axis` over `segment`, `None` for an empty segment.
pub fn rms_error(
    segment: &TimeSeries,
    axis: Axis,
    expected: &ExpectedFunction,
) -> Result<Option<f64>> {
    if segment.is_empty() {
        return Ok(None);
    }
    let errors = segment
        .iter()
        .map(|reading| absolute_error(expected.evaluate(reading.timestamp), axis.value(reading)))
        .collect::<Result<Vec<_>>>()?;

    // Scaled by the largest error so squaring cannot overflow.
    let largest = errors.iter().copied().fold(0.0, f64::max);
    if largest == 0.0 {
        return Ok(Some(0.0));
    }
    let mean_square = errors
        .iter()
        .map(|error| (error / largest).powi(2))
        .sum::<f64>()
        / errors.len() as f64;
    Ok(Some(largest * mean_square.sqrt()))
}

/// Compares one portion of a recording against its expected function.
///
/// Returns `None` when the portion has no readings. Otherwise returns one
/// record per [`MetricKind`], in `RMS, ABS, EXP, ACT` order.
pub fn evaluate_portion(
    test_name: &str,
    version: &str,
    segment: &TimeSeries,
    expected: &ExpectedFunction,
    portion: Portion,
    axis: Axis,
) -> Result<Option<Vec<MetricRecord>>> {
    let (Some(rms), Some(last)) = (rms_error(segment, axis, expected)?, segment.last()) else {
        debug!(
            "{} {} {} {} ({}): no readings",
            test_name,
            version,
            axis,
            portion,
            axis.column_name()
        );
        return Ok(None);
    };

    let expected_end = expected.evaluate(last.timestamp);
    let actual_end = axis.value(last);
    let values = [
        (MetricKind::Rms, rms),
        (MetricKind::Abs, absolute_error(expected_end, actual_end)?),
        (MetricKind::Exp, expected_end),
        (MetricKind::Act, actual_end),
    ];

    Ok(Some(
        values
            .into_iter()
            .map(|(metric, value)| MetricRecord {
                test_name: test_name.into(),
                version: version.into(),
                axis,
                portion,
                metric,
                value,
            })
            .collect(),
    ))
}

#[cfg(test)]
mod test {
    use approx::assert_abs_diff_eq;

    use super::*;
    use crate::{dataset::IMUReading, evaluation::generate};

    fn acc_x_series(points: &[(f64, f64)]) -> TimeSeries {
        points
            .iter()
            .map(|(t, acc_x)| IMUReading::new(*t, [0.0; 3], [*acc_x, 0.0, 0.0]))
            .collect()
    }

    fn value_of(records: &[MetricRecord], metric: MetricKind) -> f64 {
        records
            .iter()
            .find(|record| record.metric == metric)
            .map(|record| record.value)
            .unwrap()
    }

    #[test]
    fn perfect_tracking_has_zero_rms() {
        let expected = generate(0.0, 2000.0, 10.0);
        let segment = acc_x_series(&[(0.0, 0.0), (1000.0, 5.0), (2000.0, 10.0)]);
        let records = evaluate_portion(
            "t",
            "v1",
            &segment,
            &expected,
            Portion::Test,
            Axis::XTranslation,
        )
        .unwrap()
        .unwrap();

        assert_eq!(records.len(), 4);
        let metrics: Vec<MetricKind> = records.iter().map(|record| record.metric).collect();
        assert_eq!(metrics, MetricKind::ALL);
        assert_eq!(value_of(&records, MetricKind::Rms), 0.0);
        assert_eq!(value_of(&records, MetricKind::Abs), 0.0);
        assert_eq!(value_of(&records, MetricKind::Exp), 10.0);
        assert_eq!(value_of(&records, MetricKind::Act), 10.0);
        assert!(records.iter().all(|record| record.test_name == "t"
            && record.version == "v1"
            && record.axis == Axis::XTranslation
            && record.portion == Portion::Test));
    }

    #[test]
    fn rms_and_endpoint_errors() {
        let expected = ExpectedFunction::ConstantAt(1.0);
        let segment = acc_x_series(&[(0.0, 2.0), (10.0, 0.0), (20.0, 4.0)]);
        let records = evaluate_portion(
            "t",
            "v1",
            &segment,
            &expected,
            Portion::Post,
            Axis::XTranslation,
        )
        .unwrap()
        .unwrap();

        // errors 1, 1, 3
        assert_abs_diff_eq!(
            value_of(&records, MetricKind::Rms),
            (11.0f64 / 3.0).sqrt(),
            epsilon = 1e-12
        );
        assert_eq!(value_of(&records, MetricKind::Abs), 3.0);
        assert_eq!(value_of(&records, MetricKind::Exp), 1.0);
        assert_eq!(value_of(&records, MetricKind::Act), 4.0);
    }

    #[test]
    fn reads_the_mapped_column() {
        let segment: TimeSeries =
            vec![IMUReading::new(0.0, [0.0, 7.0, 0.0], [0.0; 3])].into();
        let records = evaluate_portion(
            "t",
            "v1",
            &segment,
            &ExpectedFunction::Zero,
            Portion::Pre,
            Axis::YRotation,
        )
        .unwrap()
        .unwrap();
        assert_eq!(value_of(&records, MetricKind::Act), 7.0);
        assert_eq!(value_of(&records, MetricKind::Rms), 7.0);
    }

    #[test]
    fn rms_of_huge_errors_stays_finite() {
        let segment = acc_x_series(&[(0.0, 1e200)]);
        let rms = rms_error(&segment, Axis::XTranslation, &ExpectedFunction::Zero).unwrap();
        assert_eq!(rms, Some(1e200));

        let segment = acc_x_series(&[(0.0, 1e200), (10.0, -1e200)]);
        let rms = rms_error(&segment, Axis::XTranslation, &ExpectedFunction::Zero).unwrap();
        assert_eq!(rms, Some(1e200));
    }

    #[test]
    fn empty_segment_yields_nothing() {
        let result = evaluate_portion(
            "t",
            "v1",
            &TimeSeries::default(),
            &ExpectedFunction::Zero,
            Portion::Pre,
            Axis::ZRotation,
        )
        .unwrap();
        assert!(result.is_none());
    }

    #[test]
    fn nan_reading_is_rejected() {
        let segment = acc_x_series(&[(0.0, f64::NAN)]);
        let result = evaluate_portion(
            "t",
            "v1",
            &segment,
            &ExpectedFunction::Zero,
            Portion::Test,
            Axis::XTranslation,
        );
        assert!(matches!(result, Err(Error::NonNumericOperand { .. })));
    }

    #[test]
    fn absolute_error_helper() {
        assert_eq!(absolute_error(3.0, 1.0).unwrap(), 2.0);
        assert_eq!(absolute_error(-1.0, 1.0).unwrap(), 2.0);
        assert!(matches!(
            absolute_error(f64::INFINITY, 1.0),
            Err(Error::NonNumericOperand { .. })
        ));
        assert!(absolute_error(1.0, f64::NAN).is_err());
    }

    #[test]
    fn relative_error_guards_zero_baseline() {
        assert_eq!(relative_error(4.0, 5.0).unwrap(), 25.0);
        for actual in [-3.5, 0.0, 2.0, 1e9] {
            assert_eq!(
                relative_error(0.0, actual).unwrap(),
                absolute_error(0.0, actual).unwrap()
            );
        }
        assert!(relative_error(0.0, f64::NAN).is_err());
    }
}
