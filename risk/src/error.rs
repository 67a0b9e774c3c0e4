use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum RiskError {
    #[error("division by 0")]
    ZeroDivision,
    #[error("terminal wealth {0} is not positive")]
    NonPositiveWealth(f64),
}
