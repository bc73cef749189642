use crate::errors::{Result, ValidationError};
use chrono::{Datelike, Months, NaiveDate};
use serde::{Deserialize, Serialize};

/// Named reporting window, resolved against the current date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ReportPeriod {
    /// A calendar year
    Year(i32),
    #[serde(rename = "ytd")]
    YearToDate,
    /// The last `n` years up to today
    TrailingYears(u32),
}

impl ReportPeriod {
    /// Inclusive `(start, end)` dates of this period.
    pub fn resolve(&self, today: NaiveDate) -> Result<(NaiveDate, NaiveDate)> {
        match *self {
            ReportPeriod::Year(year) => {
                let start = year_start(year)?;
                let end = NaiveDate::from_ymd_opt(year, 12, 31)
                    .ok_or_else(|| invalid_period(format!("Year {} is out of range", year)))?;
                Ok((start, end))
            }
            ReportPeriod::YearToDate => Ok((year_start(today.year())?, today)),
            ReportPeriod::TrailingYears(years) => {
                // Feb 29 minus a year lands on Feb 28.
                let start = years
                    .checked_mul(12)
                    .and_then(|months| today.checked_sub_months(Months::new(months)))
                    .ok_or_else(|| {
                        invalid_period(format!("{} trailing years is out of range", years))
                    })?;
                Ok((start, today))
            }
        }
    }
}

fn year_start(year: i32) -> Result<NaiveDate> {
    NaiveDate::from_ymd_opt(year, 1, 1)
        .ok_or_else(|| invalid_period(format!("Year {} is out of range", year)))
}

fn invalid_period(message: String) -> crate::errors::Error {
    ValidationError::InvalidInput(message).into()
}
