use crate::error::RiskError;
use std::ops::{Add, Div, Mul, Sub};

/// Mimic the key features of a field, plus the powers needed for compounding.
pub trait PseudoField:
    Sized + Copy + Add<Output = Self> + Div<Output = Self> + Mul<Output = Self> + Sub<Output = Self>
{
    fn one() -> Self;

    fn is_divisible(&self, threshold: Option<Self>) -> bool;

    fn is_positive(&self) -> bool;

    fn pow(self, exponent: Self) -> Self;

    fn as_f64(self) -> f64;
}

#[macro_export]
macro_rules! impl_numeric {
    ($impl_type:ty) => {
        impl PseudoField for $impl_type {
            fn one() -> Self {
                1.0
            }

            fn is_divisible(&self, tolerance: Option<Self>) -> bool {
                match tolerance {
                    Some(tol) => self.abs() >= tol,
                    None => self.abs() != 0.0,
                }
            }

            fn is_positive(&self) -> bool {
                *self > 0.0
            }

            fn pow(self, exponent: Self) -> Self {
                self.powf(exponent)
            }

            fn as_f64(self) -> f64 {
                self as f64
            }
        }
    };
}

impl_numeric! { f32 }
impl_numeric! { f64 }

/// The compound annual growth rate equivalent to `total_return` earned over `duration_years`:
/// '''math
/// (1 + R)^(1 / T) - 1
/// '''
/// Use the threshold for the division by the duration.
/// See https://en.wikipedia.org/wiki/Compound_annual_growth_rate
pub fn annualized_return<Numeric>(
    total_return: Numeric,
    duration_years: Numeric,
    threshold: Option<Numeric>,
) -> Result<Numeric, RiskError>
where
    Numeric: PseudoField,
{
    if !(duration_years.is_divisible(threshold)) {
        return Err(RiskError::ZeroDivision);
    }
    let wealth = Numeric::one() + total_return;
    if !wealth.is_positive() {
        return Err(RiskError::NonPositiveWealth(wealth.as_f64()));
    }
    Ok(wealth.pow(Numeric::one() / duration_years) - Numeric::one())
}
