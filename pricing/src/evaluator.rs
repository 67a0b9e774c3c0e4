//! The note payoff evaluator.
//!
//! Walks one price path through the observation schedule of a note and turns
//! what it sees into a cash-flow outcome. The same code serves historical
//! windows and simulated paths, so both regimes stay directly comparable.

use std::fmt::Debug;

use risk::{annualized_return, RiskError};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::common::NoteParameters;
use crate::path::PricePath;
use crate::payoff::{duration_months, effective_duration, fee_drag, redemption};
use crate::schedule::{Observation, ObservationSchedule};

/// The path stops before the note matures; drop it from the result set.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("path ends at {available:?} but the note matures at {required:?}")]
pub struct IncompletePath<O: Debug> {
    pub required: O,
    pub available: O,
}

/// Cash flows of one note over one path.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EvaluationOutcome {
    /// redeemed early on an autocall observation
    pub called: bool,
    /// time to the call, or the full maturity
    pub duration_years: f64,
    /// `duration_years` rounded to whole months
    pub duration_months: u32,
    /// paid coupons as a fraction of the notional
    pub accrued_coupons: f64,
    /// principal plus coupons before fees
    pub gross_total: f64,
    /// return on the notional after fees
    pub net_total_return: f64,
    pub principal_loss_occurred: bool,
    /// `1 - S_T / S0`, zero unless the principal was impaired
    pub principal_loss_amount: f64,
    pub missed_coupon_months: u32,
}

impl EvaluationOutcome {
    /// Final wealth per unit of notional.
    pub fn net_total(&self) -> f64 {
        1.0 + self.net_total_return
    }

    /// Compound annual growth rate over the holding period.
    pub fn annualized_return(&self) -> Result<f64, RiskError> {
        annualized_return(self.net_total_return, self.duration_years, None)
    }
}

/// Evaluates the note struck at the start of `path`.
///
/// Coupon checks pay `coupon_annual / 12` when the observed price is at or
/// above the barrier. The first autocall check at or above the trigger ends
/// the note; a coupon check on the same offset is settled before it. Without
/// a call the principal is returned at maturity, impaired if the final price
/// closed below the barrier. Fees are charged continuously over the realised
/// holding period.
pub fn evaluate<P: PricePath>(
    path: &P,
    schedule: &ObservationSchedule<P::Offset>,
    params: &NoteParameters,
) -> Result<EvaluationOutcome, IncompletePath<P::Offset>> {
    let maturity = schedule.maturity();
    if !path.covers(maturity) {
        return Err(IncompletePath {
            required: maturity,
            available: path.last_offset(),
        });
    }

    let s0 = path.start_price();
    let coupon_level = params.monthly_barrier * s0;
    let call_level = params.autocall_trigger * s0;

    let mut paid_months = 0_u32;
    let mut missed_months = 0_u32;
    let mut call_offset = None;

    for observation in schedule.observations() {
        match observation {
            Observation::Coupon(offset) => {
                if observe(path, offset) >= coupon_level {
                    paid_months += 1;
                } else {
                    missed_months += 1;
                }
            }
            Observation::Autocall(offset) => {
                if observe(path, offset) >= call_level {
                    call_offset = Some(offset);
                    break;
                }
            }
        }
    }

    let accrued_coupons = paid_months as f64 * params.monthly_coupon();

    let (duration, principal, loss) = match call_offset {
        Some(offset) => (path.years_elapsed(offset), 1.0, None),
        None => {
            let final_price = observe(path, maturity);
            let redeemed = redemption(final_price, s0, params.monthly_barrier);
            (params.maturity_years, redeemed.principal, redeemed.loss)
        }
    };
    let duration_years = effective_duration(duration, params.maturity_years);

    let gross_total = principal + accrued_coupons;
    let net_total = gross_total * fee_drag(params.fee_annual, duration_years);

    Ok(EvaluationOutcome {
        called: call_offset.is_some(),
        duration_years,
        duration_months: duration_months(duration_years),
        accrued_coupons,
        gross_total,
        net_total_return: net_total - 1.0,
        principal_loss_occurred: loss.is_some(),
        principal_loss_amount: loss.unwrap_or(0.0),
        missed_coupon_months: missed_months,
    })
}

/// Price governing an observation; schedules never reach back before the start.
fn observe<P: PricePath>(path: &P, offset: P::Offset) -> f64 {
    path.price_at_or_before(offset).unwrap_or_else(|| path.start_price())
}
