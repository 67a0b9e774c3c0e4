//! Rolling-window evaluation of a note over observed index history.
//!
//! Every date of the series is tried as a strike date; windows without a full
//! note life of history after them are dropped.

use chrono::NaiveDate;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::common::{ConfigError, NoteParameters};
use crate::evaluator::{evaluate, EvaluationOutcome, IncompletePath};
use crate::path::{PriceSeries, SeriesError};
use crate::schedule::ObservationSchedule;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum BacktestError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Series(#[from] SeriesError),
    #[error(transparent)]
    Incomplete(#[from] IncompletePath<NaiveDate>),
}

/// The outcome of the note struck on `start`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WindowOutcome {
    pub start: NaiveDate,
    pub outcome: EvaluationOutcome,
}

pub struct Backtest {
    series: PriceSeries,
    params: NoteParameters,
}

impl Backtest {
    pub fn new(series: PriceSeries, params: NoteParameters) -> Result<Self, ConfigError> {
        params.validate()?;
        Ok(Self { series, params })
    }

    /// Backtest on raw closes, forward-filled onto business days first.
    pub fn from_closes(
        closes: &PriceSeries,
        params: NoteParameters,
    ) -> Result<Self, BacktestError> {
        let series = closes.to_business_daily()?;
        Ok(Self::new(series, params)?)
    }

    pub fn series(&self) -> &PriceSeries {
        &self.series
    }

    pub fn params(&self) -> &NoteParameters {
        &self.params
    }

    /// Evaluates the note struck on `start` against the history that follows.
    pub fn evaluate_window(&self, start: NaiveDate) -> Result<EvaluationOutcome, BacktestError> {
        let path = self.series.path_from(start)?;
        let schedule = ObservationSchedule::for_calendar(&self.params, start);
        Ok(evaluate(&path, &schedule, &self.params)?)
    }

    /// One outcome per start date with complete forward history, in date order.
    pub fn run(&self) -> Vec<WindowOutcome> {
        let evaluated: Vec<(NaiveDate, Result<EvaluationOutcome, BacktestError>)> = self
            .series
            .dates()
            .par_iter()
            .map(|start| (*start, self.evaluate_window(*start)))
            .collect();

        let mut outcomes = Vec::with_capacity(evaluated.len());
        let mut dropped = 0_usize;
        for (start, result) in evaluated {
            match result {
                Ok(outcome) => outcomes.push(WindowOutcome { start, outcome }),
                Err(err) => {
                    debug!(%start, %err, "dropping window");
                    dropped += 1;
                }
            }
        }

        if outcomes.is_empty() {
            warn!(
                first = %self.series.first_date(),
                last = %self.series.last_date(),
                maturity_years = self.params.maturity_years,
                "no complete window in the price history"
            );
        }
        info!(
            evaluated = outcomes.len(),
            dropped,
            called = outcomes.iter().filter(|w| w.outcome.called).count(),
            "backtest finished"
        );
        outcomes
    }
}
