use crate::constants::{DAYS_PER_YEAR, XIRR_MAX_ITERATIONS, XIRR_TOLERANCE};
use chrono::NaiveDate;
use log::debug;
use thiserror::Error;

/// Why no internal rate of return could be found.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum XirrError {
    /// The present value, its derivative or the rate estimate blew up.
    #[error("Rate of return overflowed")]
    Overflow,
    #[error("Rate of return did not converge")]
    NoConvergence,
}

fn sorted_by_date(cashflows: &[(NaiveDate, f64)]) -> Vec<(NaiveDate, f64)> {
    let mut sorted = cashflows.to_vec();
    sorted.sort_by_key(|(date, _)| *date);
    sorted
}

fn years_since(t0: NaiveDate, date: NaiveDate) -> f64 {
    (date - t0).num_days() as f64 / DAYS_PER_YEAR
}

/// Net present value and its derivative with respect to `rate`, discounting
/// every flow back to the earliest date.
fn npv_and_derivative(rate: f64, cashflows: &[(NaiveDate, f64)]) -> (f64, f64) {
    let Some(t0) = cashflows.iter().map(|(date, _)| *date).min() else {
        return (0.0, 0.0);
    };
    let mut npv = 0.0;
    let mut derivative = 0.0;
    for (date, amount) in cashflows {
        let years = years_since(t0, *date);
        npv += amount / (1.0 + rate).powf(years);
        // d/dr [a * (1+r)^(-t)] = -t * a * (1+r)^(-t-1)
        derivative -= years * amount / (1.0 + rate).powf(years + 1.0);
    }
    (npv, derivative)
}

/// Net present value at `rate` of cashflows on irregular dates (Actual/365),
/// discounted to the earliest date. An empty series is worth 0.
///
/// Rates at or below -1 are not special-cased; the resulting infinity or NaN is
/// returned as is.
pub fn xnpv(rate: f64, cashflows: &[(NaiveDate, f64)]) -> f64 {
    let sorted = sorted_by_date(cashflows);
    let Some((t0, _)) = sorted.first().copied() else {
        return 0.0;
    };
    sorted
        .iter()
        .map(|(date, amount)| amount / (1.0 + rate).powf(years_since(t0, *date)))
        .sum()
}

/// Annualized rate at which the cashflows' net present value is zero.
///
/// Newton-Raphson starting at `guess`. Needs at least two cashflows with both
/// signs present.
pub fn xirr(cashflows: &[(NaiveDate, f64)], guess: f64) -> Result<f64, XirrError> {
    if cashflows.len() < 2 {
        return Err(XirrError::NoConvergence);
    }
    let has_negative = cashflows.iter().any(|(_, amount)| *amount < 0.0);
    let has_positive = cashflows.iter().any(|(_, amount)| *amount > 0.0);
    if !has_negative || !has_positive {
        return Err(XirrError::NoConvergence);
    }

    let sorted = sorted_by_date(cashflows);
    let mut rate = guess;

    for _ in 0..XIRR_MAX_ITERATIONS {
        let (npv, derivative) = npv_and_derivative(rate, &sorted);
        if npv.is_infinite() || derivative.is_infinite() {
            return Err(XirrError::Overflow);
        }
        if npv.is_nan() || derivative.is_nan() || derivative == 0.0 {
            return Err(XirrError::NoConvergence);
        }

        let mut next = rate - npv / derivative;
        if next.is_infinite() {
            return Err(XirrError::Overflow);
        }
        if next.is_nan() {
            return Err(XirrError::NoConvergence);
        }
        // (1 + r) must stay positive.
        if next <= -1.0 {
            next = (rate - 1.0) / 2.0;
        }

        if (next - rate).abs() < XIRR_TOLERANCE {
            return Ok(next);
        }
        rate = next;
    }

    debug!(
        "No rate of return after {} iterations, last estimate {}",
        XIRR_MAX_ITERATIONS, rate
    );
    Err(XirrError::NoConvergence)
}
