pub mod error;
pub mod risk_figures;

pub use error::RiskError;
pub use risk_figures::{annualized_return, PseudoField};
