use std::fmt;

/// Errors while aggregating forecast samples
///
/// `InvalidSample` carries the timestamp of the offending sample and what is wrong with it,
/// either a missing temperature or a timestamp that can't be placed on a calendar
#[derive(Debug, PartialEq)]
pub enum ForecastError {
    InvalidInput(String),
    InvalidSample(i64, SampleFault),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SampleFault {
    NoTemperature,
    TimestampOutOfRange,
}

impl fmt::Display for SampleFault {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            SampleFault::NoTemperature => write!(f, "no usable temperature"),
            SampleFault::TimestampOutOfRange => write!(f, "timestamp out of range"),
        }
    }
}

impl fmt::Display for ForecastError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ForecastError::InvalidInput(e) => write!(f, "ForecastError::InvalidInput: {}", e),
            ForecastError::InvalidSample(ts, fault) => write!(f, "ForecastError::InvalidSample: {} in sample at {}", fault, ts),
        }
    }
}
