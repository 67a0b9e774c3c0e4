use thiserror::Error;

/// Raised when note or simulation parameters cannot describe a valid run.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("{name} must be a positive whole number of months, got {value} years")]
    NotWholeMonths { name: &'static str, value: f64 },
    #[error("call interval of {interval} years exceeds the maturity of {maturity} years")]
    IntervalExceedsMaturity { interval: f64, maturity: f64 },
    #[error("invalid parameter '{name}': {reason}")]
    InvalidParameter { name: &'static str, reason: String },
    #[error(
        "invalid path count {0}: must be in range [1, {max}]",
        max = crate::simulation::MAX_PATHS
    )]
    InvalidPathCount(usize),
    #[error("invalid steps per year {0}: must be positive")]
    InvalidStepsPerYear(usize),
    #[error("failed to parse configuration: {0}")]
    Parse(String),
}
