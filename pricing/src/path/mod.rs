//! Price paths the note evaluator walks over.
//!
//! A path is either indexed by simulation step ([`StepPath`]) or by calendar
//! date ([`CalendarPath`]). Both expose the same step-function lookup, so the
//! payoff logic never needs to know which regime produced the prices.

mod calendar;
mod step;

pub use calendar::{CalendarPath, PriceSeries, SeriesError};
pub use step::StepPath;

/// An immutable, time-ordered sequence of positive prices.
pub trait PricePath {
    /// Position on the path: a step index or a calendar date.
    type Offset: Copy + Ord + std::fmt::Debug;

    /// The reference price `S0` the note's levels are expressed against.
    fn start_price(&self) -> f64;

    /// The latest recorded price at or before `offset`.
    ///
    /// Never looks ahead. `None` when `offset` precedes the start of the path.
    fn price_at_or_before(&self, offset: Self::Offset) -> Option<f64>;

    /// Whether the path extends up to `offset`.
    fn covers(&self, offset: Self::Offset) -> bool;

    /// The last offset carrying data.
    fn last_offset(&self) -> Self::Offset;

    /// Time from the start of the path to `offset`, in years.
    fn years_elapsed(&self, offset: Self::Offset) -> f64;
}
