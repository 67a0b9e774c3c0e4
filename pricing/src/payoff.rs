//! Cash-flow arithmetic shared by every evaluation regime.

/// Fraction of the gross payoff left after paying `fee_annual` continuously for `duration_years`.
#[inline]
pub fn fee_drag(fee_annual: f64, duration_years: f64) -> f64 {
    (-fee_annual * duration_years).exp()
}

/// The holding period fees and annualisation apply to.
///
/// A non-positive duration falls back to the full maturity.
#[inline]
pub fn effective_duration(duration_years: f64, maturity_years: f64) -> f64 {
    if duration_years > 0.0 {
        duration_years
    } else {
        maturity_years
    }
}

/// Holding period rounded to whole months.
pub fn duration_months(duration_years: f64) -> u32 {
    (duration_years * 12.0).round() as u32
}

/// Principal paid back at maturity when the note was not called.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Redemption {
    /// redeemed principal as a fraction of the notional
    pub principal: f64,
    /// `1 - S_T / S0` when the barrier was breached
    pub loss: Option<f64>,
}

/// Full principal when `final_price` holds the barrier, otherwise principal
/// impaired one for one with the index decline.
pub fn redemption(final_price: f64, start_price: f64, barrier: f64) -> Redemption {
    if final_price >= barrier * start_price {
        Redemption {
            principal: 1.0,
            loss: None,
        }
    } else {
        let performance = final_price / start_price;
        Redemption {
            principal: performance,
            loss: Some(1.0 - performance),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_approx_eq::assert_approx_eq;

    #[test]
    fn fee_drag_decays_exponentially() {
        assert_eq!(fee_drag(0.0074, 0.0), 1.0);
        assert_eq!(fee_drag(0.0, 5.0), 1.0);
        assert_approx_eq!(fee_drag(0.01, 5.0), (-0.05_f64).exp());
        assert_approx_eq!(fee_drag(0.02, 2.0) * fee_drag(0.02, 3.0), fee_drag(0.02, 5.0));
    }

    #[test]
    fn zero_duration_falls_back_to_maturity() {
        assert_eq!(effective_duration(0.0, 5.0), 5.0);
        assert_eq!(effective_duration(-1.0, 5.0), 5.0);
        assert_eq!(effective_duration(2.0, 5.0), 2.0);
    }

    #[test]
    fn months() {
        assert_eq!(duration_months(1.0), 12);
        assert_eq!(duration_months(366.0 / 365.25), 12);
        assert_eq!(duration_months(5.0), 60);
    }

    #[test]
    fn redemption_at_and_below_barrier() {
        // touching the barrier keeps the principal whole
        assert_eq!(redemption(60.0, 100.0, 0.6).principal, 1.0);
        assert_eq!(redemption(60.0, 100.0, 0.6).loss, None);

        let impaired = redemption(45.0, 100.0, 0.6);
        assert_approx_eq!(impaired.principal, 0.45);
        assert_approx_eq!(impaired.loss.unwrap(), 0.55);
    }
}
