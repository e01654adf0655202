use napi::Result as NapiResult;
use napi_derive::napi;

use mortgage_sim_core::{LoanParameters, LoanRequest, Schedule};

/// Convert any Display error into a napi::Error.
fn to_napi_error(e: impl std::fmt::Display) -> napi::Error {
    napi::Error::from_reason(e.to_string())
}

// ---------------------------------------------------------------------------
// Engine
// ---------------------------------------------------------------------------

#[napi]
pub fn compute_schedule(params_json: String) -> NapiResult<String> {
    let params: LoanParameters = serde_json::from_str(&params_json).map_err(to_napi_error)?;
    let schedule = mortgage_sim_core::compute_schedule(&params).map_err(to_napi_error)?;
    serde_json::to_string(&schedule).map_err(to_napi_error)
}

#[napi]
pub fn simulate(params_json: String) -> NapiResult<String> {
    let params: LoanParameters = serde_json::from_str(&params_json).map_err(to_napi_error)?;
    let output = mortgage_sim_core::simulate(&params).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn compare_schedules(params_json: String) -> NapiResult<String> {
    let params: LoanParameters = serde_json::from_str(&params_json).map_err(to_napi_error)?;
    let output = mortgage_sim_core::compare_schedules(&params).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Form support
// ---------------------------------------------------------------------------

/// Validate a raw form request; returns the derived parameters or the first
/// failing rule as the error message.
#[napi]
pub fn validate_request(request_json: String) -> NapiResult<String> {
    let request: LoanRequest = serde_json::from_str(&request_json).map_err(to_napi_error)?;
    let params = mortgage_sim_core::validate_request(&request).map_err(to_napi_error)?;
    serde_json::to_string(&params).map_err(to_napi_error)
}

/// Semicolon CSV for a schedule previously returned by `compute_schedule`.
#[napi]
pub fn export_schedule_csv(schedule_json: String) -> NapiResult<String> {
    let schedule: Schedule = serde_json::from_str(&schedule_json).map_err(to_napi_error)?;
    mortgage_sim_core::export::export_schedule_csv(&schedule).map_err(to_napi_error)
}
