use crate::dataset::Portion;

/// Expected sensor reading as a function of time (ms) for one axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ExpectedFunction {
    Zero,
    /// Constant velocity move covering `distance` over `[start_time, start_time + duration]`.
    /// Not clamped outside that window.
    Linear {
        start_time: f64,
        duration: f64,
        distance: f64,
    },
    ConstantAt(f64),
}

impl ExpectedFunction {
    pub fn evaluate(&self, t: f64) -> f64 {
        match *self {
            ExpectedFunction::Zero => 0.0,
            ExpectedFunction::Linear {
                start_time,
                duration,
                distance,
            } => {
                // Rounded the same way as `t - start_time` at the end of the
                // move, so the ratio there is exactly 1.
                let span = (start_time + duration) - start_time;
                distance * ((t - start_time) / span)
            }
            ExpectedFunction::ConstantAt(value) => value,
        }
    }

    pub fn average_velocity(&self) -> f64 {
        match *self {
            ExpectedFunction::Linear {
                duration, distance, ..
            } => distance / duration,
            _ => 0.0,
        }
    }

    /// Value once the move has completed.
    pub fn endpoint(&self) -> f64 {
        match *self {
            ExpectedFunction::Zero => 0.0,
            ExpectedFunction::Linear { distance, .. } => distance,
            ExpectedFunction::ConstantAt(value) => value,
        }
    }
}

/// Builds the in-move expected function for one axis. Times are in ms.
pub fn generate(start_time: f64, duration: f64, distance: f64) -> ExpectedFunction {
    if distance == 0.0 {
        ExpectedFunction::Zero
    } else {
        ExpectedFunction::Linear {
            start_time,
            duration,
            distance,
        }
    }
}

/// Expected functions for the three portions of one axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExpectedProfile {
    pub pre: ExpectedFunction,
    pub test: ExpectedFunction,
    pub post: ExpectedFunction,
}

impl ExpectedProfile {
    pub fn get(&self, portion: Portion) -> ExpectedFunction {
        match portion {
            Portion::Pre => self.pre,
            Portion::Test => self.test,
            Portion::Post => self.post,
        }
    }
}

pub fn expected_profile(start_time: f64, duration: f64, distance: f64) -> ExpectedProfile {
    let test = generate(start_time, duration, distance);
    let post = match test {
        ExpectedFunction::Zero => ExpectedFunction::Zero,
        _ => ExpectedFunction::ConstantAt(test.endpoint()),
    };
    ExpectedProfile {
        pre: ExpectedFunction::Zero,
        test,
        post,
    }
}
