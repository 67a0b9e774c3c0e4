//! Payoffs of autocallable income notes.
//!
//! A note pays a monthly coupon while the index holds a barrier, is redeemed
//! early when the index is at or above a trigger on an autocall date, and
//! otherwise returns principal at maturity, impaired below the barrier. The
//! [`evaluator`] turns one price path into an [`EvaluationOutcome`]; the
//! [`backtest`] and [`simulation`] drivers feed it historical windows and
//! simulated GBM paths respectively.

pub mod backtest;
pub mod common;
pub mod evaluator;
pub mod path;
pub mod payoff;
pub mod schedule;
pub mod simulation;

pub use backtest::{Backtest, BacktestError, WindowOutcome};
pub use common::{ConfigError, NoteConfig, NoteParameters};
pub use evaluator::{evaluate, EvaluationOutcome, IncompletePath};
pub use path::{CalendarPath, PricePath, PriceSeries, SeriesError, StepPath};
pub use schedule::{Observation, ObservationSchedule};
pub use simulation::{GeometricBrownianMotion, MonteCarloConfig, MonteCarloNoteSimulator};
