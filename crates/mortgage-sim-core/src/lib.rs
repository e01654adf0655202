pub mod error;
mod math;
pub mod types;

pub mod amortization;
pub mod validation;

#[cfg(feature = "export")]
pub mod export;

#[cfg(feature = "simulation")]
pub mod simulation;

pub use amortization::comparison::{compare_schedules, ComparisonOutput};
pub use amortization::rates::{normalize_rates, MonthlyRates};
pub use amortization::schedule::{
    compute_schedule, simulate, Installment, LoanParameters, Schedule, ScheduleType,
    SimulationOutput,
};
pub use amortization::summary::{summarize, ScheduleSummary};
pub use error::MortgageSimError;
pub use types::*;
pub use validation::{validate_request, LoanRequest};

/// Standard result type for all mortgage-sim operations
pub type MortgageSimResult<T> = Result<T, MortgageSimError>;
