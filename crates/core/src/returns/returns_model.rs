use super::return_solver::XirrError;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Outcome of solving for an asset account's rate of return.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RateOfReturn {
    /// Annualized rate, 0.1 meaning 10%
    Rate(f64),
    Overflow,
    Diverged,
    /// Fewer than two cashflows or no sign change among them
    InsufficientData,
}

impl RateOfReturn {
    pub fn from_xirr(result: Result<f64, XirrError>) -> Self {
        match result {
            Ok(rate) => RateOfReturn::Rate(rate),
            Err(XirrError::Overflow) => RateOfReturn::Overflow,
            Err(XirrError::NoConvergence) => RateOfReturn::Diverged,
        }
    }

    pub fn rate(&self) -> Option<f64> {
        match self {
            RateOfReturn::Rate(rate) => Some(*rate),
            _ => None,
        }
    }
}

impl fmt::Display for RateOfReturn {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            RateOfReturn::Rate(rate) => write!(f, "{:.2}%", rate * 100.0),
            RateOfReturn::Overflow => write!(f, "(overflow)"),
            RateOfReturn::Diverged => write!(f, "(diverged)"),
            RateOfReturn::InsufficientData => write!(f, "(no data)"),
        }
    }
}

/// One row of a returns report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetReturnSummary {
    pub asset_account: String,
    /// Sum of every cashflow except the ending balance
    pub net_inflows: Decimal,
    /// Value held at the end of the window, when it could be priced
    pub market_value: Option<Decimal>,
    pub rate: RateOfReturn,
}
