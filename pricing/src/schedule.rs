//! Coupon and autocall observation dates of a note, expressed as path offsets.

use std::iter::Peekable;
use std::slice::Iter;

use chrono::{Datelike, Days, Months, NaiveDate};

use crate::common::NoteParameters;

/// One scheduled look at the underlying.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Observation<O> {
    /// coupon barrier check
    Coupon(O),
    /// early redemption check
    Autocall(O),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObservationSchedule<O> {
    monthly: Vec<O>,
    annual: Vec<O>,
    maturity: O,
}

impl<O: Copy + Ord> ObservationSchedule<O> {
    pub fn new(mut monthly: Vec<O>, mut annual: Vec<O>, maturity: O) -> Self {
        monthly.sort_unstable();
        monthly.dedup();
        annual.sort_unstable();
        annual.dedup();
        Self {
            monthly,
            annual,
            maturity,
        }
    }

    pub fn monthly(&self) -> &[O] {
        &self.monthly
    }

    pub fn annual(&self) -> &[O] {
        &self.annual
    }

    /// End of the note's life; a path must reach it to be evaluated.
    pub fn maturity(&self) -> O {
        self.maturity
    }

    /// Both schedules merged in time order.
    ///
    /// A coupon check sharing its offset with an autocall check comes first.
    pub fn observations(&self) -> Observations<'_, O> {
        Observations {
            monthly: self.monthly.iter().peekable(),
            annual: self.annual.iter().peekable(),
        }
    }
}

impl ObservationSchedule<usize> {
    /// Schedule on a uniform grid of `steps_per_year` steps, rounding each
    /// observation time to the nearest step (ties to even).
    ///
    /// Step 0 is the strike and is never observed; on grids coarser than a
    /// month the observations rounding down to it are dropped.
    pub fn for_steps(params: &NoteParameters, steps_per_year: usize) -> Self {
        let steps_per_year = steps_per_year as f64;
        let nearest_step = |years: f64| (years * steps_per_year).round_ties_even() as usize;

        let monthly = (1..=params.maturity_months())
            .map(|k| nearest_step(k as f64 / 12.0))
            .filter(|step| *step > 0)
            .collect();
        let annual = (1..=params.autocall_count())
            .map(|k| nearest_step(k as f64 * params.call_interval_years))
            .filter(|step| *step > 0)
            .collect();
        let maturity = (params.maturity_years * steps_per_year).ceil() as usize;

        Self::new(monthly, annual, maturity)
    }

    /// Number of steps a path needs after its start price.
    pub fn step_count(&self) -> usize {
        self.maturity
    }
}

impl ObservationSchedule<NaiveDate> {
    /// Calendar schedule for a note struck on `start`.
    ///
    /// Coupons are observed on every month end from the end of the start month
    /// up to maturity; autocalls on the anniversaries of `start`, with the day
    /// clamped to the month's length (Feb 29 rolls back to Feb 28).
    pub fn for_calendar(params: &NoteParameters, start: NaiveDate) -> Self {
        let maturity = start + Months::new(params.maturity_months());

        let mut monthly = Vec::with_capacity(params.maturity_months() as usize + 1);
        let mut month_end = last_day_of_month(start);
        while month_end <= maturity {
            monthly.push(month_end);
            month_end = last_day_of_month(month_end + Days::new(1));
        }

        let interval = params.call_interval_months();
        let annual = (1..=params.autocall_count())
            .map(|k| start + Months::new(k * interval))
            .collect();

        Self::new(monthly, annual, maturity)
    }
}

fn last_day_of_month(date: NaiveDate) -> NaiveDate {
    let first = date.with_day(1).unwrap_or(date);
    first + Months::new(1) - Days::new(1)
}

pub struct Observations<'a, O> {
    monthly: Peekable<Iter<'a, O>>,
    annual: Peekable<Iter<'a, O>>,
}

impl<'a, O: Copy + Ord> Iterator for Observations<'a, O> {
    type Item = Observation<O>;

    fn next(&mut self) -> Option<Self::Item> {
        let coupon_first = match (self.monthly.peek(), self.annual.peek()) {
            (Some(m), Some(a)) => m <= a,
            (Some(_), None) => true,
            (None, Some(_)) => false,
            (None, None) => return None,
        };
        if coupon_first {
            self.monthly.next().map(|o| Observation::Coupon(*o))
        } else {
            self.annual.next().map(|o| Observation::Autocall(*o))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn daily_steps() {
        let schedule = ObservationSchedule::for_steps(&NoteParameters::default(), 252);

        assert_eq!(schedule.monthly().len(), 60);
        assert_eq!(schedule.monthly()[0], 21);
        assert_eq!(schedule.monthly()[59], 1260);
        assert_eq!(schedule.annual(), &[252, 504, 756, 1008, 1260]);
        assert_eq!(schedule.step_count(), 1260);
    }

    #[test]
    fn rounding_to_nearest_step() {
        let params = NoteParameters {
            maturity_years: 1.0,
            ..Default::default()
        };
        // 365 / 12 = 30.416..
        let schedule = ObservationSchedule::for_steps(&params, 365);
        assert_eq!(&schedule.monthly()[..3], &[30, 61, 91]);
        assert_eq!(schedule.annual(), &[365]);

        // 18 / 12 = 1.5 steps per month, halves go to the even step
        let schedule = ObservationSchedule::for_steps(&params, 18);
        assert_eq!(&schedule.monthly()[..4], &[2, 3, 4, 6]);
    }

    #[test]
    fn coarse_grid_collapses_months() {
        let params = NoteParameters {
            maturity_years: 1.0,
            ..Default::default()
        };
        let schedule = ObservationSchedule::for_steps(&params, 4);
        // the first month rounds to the strike step and is not observed
        assert_eq!(schedule.monthly(), &[1, 2, 3, 4]);
        assert_eq!(schedule.annual(), &[4]);
    }

    #[test]
    fn strike_step_is_never_observed() {
        let params = NoteParameters::new(2.0, 0.12, 0.6, 1.0, 0.0, 0.5);
        let schedule = ObservationSchedule::for_steps(&params, 1);

        assert_eq!(schedule.monthly(), &[1, 2]);
        assert_eq!(schedule.annual(), &[1, 2]);
        assert_eq!(schedule.step_count(), 2);
    }

    #[test]
    fn semi_annual_autocalls() {
        let params = NoteParameters::new(2.0, 0.1, 0.6, 1.0, 0.0, 0.5);
        let schedule = ObservationSchedule::for_steps(&params, 252);
        assert_eq!(schedule.annual(), &[126, 252, 378, 504]);
    }

    #[test]
    fn coupon_precedes_autocall_on_shared_offsets() {
        let params = NoteParameters {
            maturity_years: 1.0,
            ..Default::default()
        };
        let schedule = ObservationSchedule::for_steps(&params, 12);
        let observations: Vec<_> = schedule.observations().collect();

        assert_eq!(observations.len(), 13);
        assert_eq!(observations[11], Observation::Coupon(12));
        assert_eq!(observations[12], Observation::Autocall(12));
    }

    #[test]
    fn calendar_mid_month_start() {
        let schedule =
            ObservationSchedule::for_calendar(&NoteParameters::default(), date(2000, 1, 14));

        assert_eq!(schedule.maturity(), date(2005, 1, 14));
        assert_eq!(schedule.monthly().len(), 60);
        assert_eq!(schedule.monthly()[0], date(2000, 1, 31));
        assert_eq!(schedule.monthly()[1], date(2000, 2, 29));
        assert_eq!(schedule.monthly()[59], date(2004, 12, 31));
        assert_eq!(schedule.annual()[0], date(2001, 1, 14));
        assert_eq!(schedule.annual()[4], date(2005, 1, 14));

        // the anniversary falls between the December and January month ends
        let observations: Vec<_> = schedule.observations().take(13).collect();
        assert_eq!(observations[11], Observation::Coupon(date(2000, 12, 31)));
        assert_eq!(observations[12], Observation::Autocall(date(2001, 1, 14)));
    }

    #[test]
    fn calendar_month_end_start() {
        let params = NoteParameters {
            maturity_years: 1.0,
            ..Default::default()
        };
        let schedule = ObservationSchedule::for_calendar(&params, date(2001, 1, 31));

        // both the start and the maturity month ends are observed
        assert_eq!(schedule.monthly().len(), 13);
        assert_eq!(schedule.monthly()[0], date(2001, 1, 31));
        assert_eq!(schedule.monthly()[1], date(2001, 2, 28));
        assert_eq!(schedule.monthly()[12], date(2002, 1, 31));
        assert_eq!(schedule.annual(), &[date(2002, 1, 31)]);
    }

    #[test]
    fn leap_day_anniversary_is_clamped() {
        let params = NoteParameters {
            maturity_years: 1.0,
            ..Default::default()
        };
        let schedule = ObservationSchedule::for_calendar(&params, date(2000, 2, 29));
        assert_eq!(schedule.annual(), &[date(2001, 2, 28)]);
        assert_eq!(schedule.maturity(), date(2001, 2, 28));
    }
}
