use chrono::{Datelike, NaiveDate, Weekday};
use thiserror::Error;

use super::PricePath;

const DAYS_PER_YEAR: f64 = 365.25;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum SeriesError {
    #[error("price series is empty")]
    Empty,
    #[error("{dates} dates but {prices} prices")]
    LengthMismatch { dates: usize, prices: usize },
    #[error("dates must be strictly increasing, {0} is out of order")]
    Unordered(NaiveDate),
    #[error("price {price} on {date} is not positive")]
    NonPositivePrice { date: NaiveDate, price: f64 },
    #[error("{0} is not a date of the series")]
    UnknownStart(NaiveDate),
}

/// Observed index closes on strictly increasing dates.
#[derive(Debug, Clone, PartialEq)]
pub struct PriceSeries {
    dates: Vec<NaiveDate>,
    prices: Vec<f64>,
}

impl PriceSeries {
    pub fn new(dates: Vec<NaiveDate>, prices: Vec<f64>) -> Result<Self, SeriesError> {
        if dates.len() != prices.len() {
            return Err(SeriesError::LengthMismatch {
                dates: dates.len(),
                prices: prices.len(),
            });
        }
        if dates.is_empty() {
            return Err(SeriesError::Empty);
        }
        if let Some(pair) = dates.windows(2).find(|pair| pair[0] >= pair[1]) {
            return Err(SeriesError::Unordered(pair[1]));
        }
        if let Some((date, price)) = dates
            .iter()
            .zip(&prices)
            .find(|(_, price)| !(price.is_finite() && **price > 0.0))
        {
            return Err(SeriesError::NonPositivePrice {
                date: *date,
                price: *price,
            });
        }
        Ok(Self { dates, prices })
    }

    pub fn from_pairs(
        observations: impl IntoIterator<Item = (NaiveDate, f64)>,
    ) -> Result<Self, SeriesError> {
        let (dates, prices) = observations.into_iter().unzip();
        Self::new(dates, prices)
    }

    pub fn dates(&self) -> &[NaiveDate] {
        &self.dates
    }

    pub fn prices(&self) -> &[f64] {
        &self.prices
    }

    pub fn len(&self) -> usize {
        self.dates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    pub fn first_date(&self) -> NaiveDate {
        self.dates[0]
    }

    pub fn last_date(&self) -> NaiveDate {
        self.dates[self.dates.len() - 1]
    }

    /// Index of the last observation on or before `date`.
    fn index_at_or_before(&self, date: NaiveDate) -> Option<usize> {
        self.dates.partition_point(|d| *d <= date).checked_sub(1)
    }

    /// Forward-fills the series onto the Monday to Friday grid spanning it.
    ///
    /// Every business day between the first and last observation carries the
    /// latest close on or before it, so holidays repeat the previous close.
    pub fn to_business_daily(&self) -> Result<PriceSeries, SeriesError> {
        let mut dates = Vec::with_capacity(self.len() * 7 / 5 + 1);
        let mut prices = Vec::with_capacity(dates.capacity());
        let mut source = 0;

        for day in self.first_date().iter_days() {
            if day > self.last_date() {
                break;
            }
            while source + 1 < self.len() && self.dates[source + 1] <= day {
                source += 1;
            }
            if is_business_day(day) {
                dates.push(day);
                prices.push(self.prices[source]);
            }
        }

        if dates.is_empty() {
            return Err(SeriesError::Empty);
        }
        Ok(PriceSeries { dates, prices })
    }

    /// A path starting at `start`, which must be one of the series' dates.
    pub fn path_from(&self, start: NaiveDate) -> Result<CalendarPath<'_>, SeriesError> {
        let start = self
            .dates
            .binary_search(&start)
            .map_err(|_| SeriesError::UnknownStart(start))?;
        Ok(CalendarPath {
            series: self,
            start,
        })
    }
}

fn is_business_day(day: NaiveDate) -> bool {
    !matches!(day.weekday(), Weekday::Sat | Weekday::Sun)
}

/// A read-only view of a [`PriceSeries`] from one start date onwards.
#[derive(Debug, Clone, Copy)]
pub struct CalendarPath<'a> {
    series: &'a PriceSeries,
    start: usize,
}

impl<'a> CalendarPath<'a> {
    pub fn start_date(&self) -> NaiveDate {
        self.series.dates[self.start]
    }
}

impl<'a> PricePath for CalendarPath<'a> {
    type Offset = NaiveDate;

    fn start_price(&self) -> f64 {
        self.series.prices[self.start]
    }

    fn price_at_or_before(&self, date: NaiveDate) -> Option<f64> {
        self.series
            .index_at_or_before(date)
            .filter(|idx| *idx >= self.start)
            .map(|idx| self.series.prices[idx])
    }

    fn covers(&self, date: NaiveDate) -> bool {
        self.series.last_date() >= date
    }

    fn last_offset(&self) -> NaiveDate {
        self.series.last_date()
    }

    fn years_elapsed(&self, date: NaiveDate) -> f64 {
        (date - self.start_date()).num_days() as f64 / DAYS_PER_YEAR
    }
}
