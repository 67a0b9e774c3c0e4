use serde::{Deserialize, Serialize};

use super::error::ConfigError;

const MONTHS_PER_YEAR: f64 = 12.0;
const MONTH_TOLERANCE: f64 = 1e-9;

/// Contract terms of an autocallable income note.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NoteParameters {
    /// time to maturity in years
    pub maturity_years: f64,
    /// the gross annual coupon rate, paid in twelfths
    pub coupon_annual: f64,
    /// the coupon barrier as a fraction of the start price
    pub monthly_barrier: f64,
    /// the early redemption level as a fraction of the start price
    pub autocall_trigger: f64,
    /// the annual expense ratio, applied continuously
    pub fee_annual: f64,
    /// years between two autocall observations
    pub call_interval_years: f64,
}

impl Default for NoteParameters {
    fn default() -> Self {
        Self {
            maturity_years: 5.0,
            coupon_annual: 0.147,
            monthly_barrier: 0.60,
            autocall_trigger: 1.00,
            fee_annual: 0.0074,
            call_interval_years: 1.0,
        }
    }
}

impl NoteParameters {
    pub fn new(
        maturity_years: f64,
        coupon_annual: f64,
        monthly_barrier: f64,
        autocall_trigger: f64,
        fee_annual: f64,
        call_interval_years: f64,
    ) -> Self {
        Self {
            maturity_years,
            coupon_annual,
            monthly_barrier,
            autocall_trigger,
            fee_annual,
            call_interval_years,
        }
    }

    /// Checks that the terms describe a note the schedule builder can lay out.
    pub fn validate(&self) -> Result<(), ConfigError> {
        whole_months("maturity_years", self.maturity_years)?;
        whole_months("call_interval_years", self.call_interval_years)?;
        if self.call_interval_months() > self.maturity_months() {
            return Err(ConfigError::IntervalExceedsMaturity {
                interval: self.call_interval_years,
                maturity: self.maturity_years,
            });
        }
        positive("monthly_barrier", self.monthly_barrier)?;
        positive("autocall_trigger", self.autocall_trigger)?;
        non_negative("coupon_annual", self.coupon_annual)?;
        non_negative("fee_annual", self.fee_annual)?;
        Ok(())
    }

    pub fn monthly_coupon(&self) -> f64 {
        self.coupon_annual / MONTHS_PER_YEAR
    }

    pub fn maturity_months(&self) -> u32 {
        (self.maturity_years * MONTHS_PER_YEAR).round() as u32
    }

    pub fn call_interval_months(&self) -> u32 {
        (self.call_interval_years * MONTHS_PER_YEAR).round() as u32
    }

    /// Number of autocall observations over the life of the note.
    pub fn autocall_count(&self) -> u32 {
        match self.call_interval_months() {
            0 => 0,
            interval => self.maturity_months() / interval,
        }
    }
}

fn whole_months(name: &'static str, years: f64) -> Result<(), ConfigError> {
    let months = years * MONTHS_PER_YEAR;
    let off_grid = (months - months.round()).abs() > MONTH_TOLERANCE;
    if !months.is_finite() || months.round() < 1.0 || off_grid {
        return Err(ConfigError::NotWholeMonths { name, value: years });
    }
    Ok(())
}

fn positive(name: &'static str, value: f64) -> Result<(), ConfigError> {
    if !(value.is_finite() && value > 0.0) {
        return Err(ConfigError::InvalidParameter {
            name,
            reason: format!("must be positive, got {value}"),
        });
    }
    Ok(())
}

fn non_negative(name: &'static str, value: f64) -> Result<(), ConfigError> {
    if !(value.is_finite() && value >= 0.0) {
        return Err(ConfigError::InvalidParameter {
            name,
            reason: format!("must be non-negative, got {value}"),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_terms_are_valid() {
        let params = NoteParameters::default();
        assert!(params.validate().is_ok());
        assert_eq!(params.maturity_months(), 60);
        assert_eq!(params.call_interval_months(), 12);
        assert_eq!(params.autocall_count(), 5);
        assert_eq!(params.monthly_coupon(), 0.147 / 12.0);
    }

    #[test]
    fn semi_annual_calls() {
        let params = NoteParameters::new(3.0, 0.1, 0.7, 1.0, 0.0, 0.5);
        assert!(params.validate().is_ok());
        assert_eq!(params.autocall_count(), 6);
    }

    #[test]
    fn partial_months_are_rejected() {
        let params = NoteParameters {
            maturity_years: 1.01,
            ..Default::default()
        };
        assert_eq!(
            params.validate(),
            Err(ConfigError::NotWholeMonths {
                name: "maturity_years",
                value: 1.01
            })
        );
    }

    #[test]
    fn interval_longer_than_maturity() {
        let params = NoteParameters {
            maturity_years: 1.0,
            call_interval_years: 2.0,
            ..Default::default()
        };
        assert!(matches!(
            params.validate(),
            Err(ConfigError::IntervalExceedsMaturity { .. })
        ));
    }

    #[test]
    fn negative_fee() {
        let params = NoteParameters {
            fee_annual: -0.01,
            ..Default::default()
        };
        assert!(matches!(
            params.validate(),
            Err(ConfigError::InvalidParameter { name: "fee_annual", .. })
        ));
    }
}
