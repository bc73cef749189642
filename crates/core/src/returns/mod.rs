mod report_period;
mod return_solver;
pub mod returns_model;
mod returns_service;

pub use report_period::ReportPeriod;
pub use return_solver::{xirr, xnpv, XirrError};
pub use returns_model::*;
pub use returns_service::ReturnsService;
