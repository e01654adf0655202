use clap::{Args, ValueEnum};
use log::debug;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde_json::{json, Value};
use std::path::Path;

use mortgage_sim_core::simulation::SimulationRecord;
use mortgage_sim_core::{compare_schedules, simulate, validate_request, LoanRequest, ScheduleType};

use crate::input;
use crate::store::SimulationStore;

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ScheduleKind {
    /// Constant amortization
    Sac,
    /// Constant installment
    Price,
}

impl From<ScheduleKind> for ScheduleType {
    fn from(kind: ScheduleKind) -> Self {
        match kind {
            ScheduleKind::Sac => ScheduleType::ConstantAmortization,
            ScheduleKind::Price => ScheduleType::ConstantInstallment,
        }
    }
}

/// Loan request, from a file, piped JSON, or individual flags
#[derive(Args)]
pub struct LoanArgs {
    /// Path to JSON or YAML request file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    /// Repayment regime
    #[arg(long, value_enum, default_value = "sac")]
    pub schedule_type: ScheduleKind,

    /// Property value
    #[arg(long)]
    pub property_value: Option<Decimal>,

    /// Down payment (at least 20% of the property value)
    #[arg(long)]
    pub down_payment: Option<Decimal>,

    /// Number of monthly installments (120 to 420)
    #[arg(long)]
    pub term_months: Option<u32>,

    /// Annual effective interest rate in percent (e.g. 10.5)
    #[arg(long)]
    pub interest_rate: Option<Decimal>,

    /// Annual reference-index rate in percent
    #[arg(long)]
    pub reference_rate: Option<Decimal>,

    /// Monthly administrative charge
    #[arg(long)]
    pub admin_charge: Option<Decimal>,

    /// Monthly insurance charge
    #[arg(long)]
    pub insurance_charge: Option<Decimal>,
}

#[derive(Args)]
pub struct SimulateArgs {
    #[command(flatten)]
    pub loan: LoanArgs,

    /// Append the simulation to the store
    #[arg(long)]
    pub save: bool,
}

#[derive(Args)]
pub struct CompareArgs {
    #[command(flatten)]
    pub loan: LoanArgs,
}

pub fn run_simulate(args: SimulateArgs, store_path: &Path) -> Result<Value, Box<dyn std::error::Error>> {
    let request = read_request(&args.loan)?;
    simulate_request(request, args.save.then_some(store_path))
}

/// Simulate once; the saved record reuses the schedule that is printed.
fn simulate_request(
    request: LoanRequest,
    store_path: Option<&Path>,
) -> Result<Value, Box<dyn std::error::Error>> {
    let params = validate_request(&request)?;
    let output = simulate(&params)?;
    let schedule = output.result.installments.clone();

    let mut value = serde_json::to_value(output)?;
    if let Some(path) = store_path {
        let mut store = SimulationStore::open(path)?;
        let index = store.append(SimulationRecord::from_computed(request, params, schedule))?;
        value["saved_index"] = json!(index);
    }
    Ok(value)
}

pub fn run_compare(args: CompareArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let request = read_request(&args.loan)?;
    let params = validate_request(&request)?;
    let result = compare_schedules(&params)?;
    Ok(serde_json::to_value(result)?)
}

fn read_request(args: &LoanArgs) -> Result<LoanRequest, Box<dyn std::error::Error>> {
    if let Some(ref path) = args.input {
        debug!("reading loan request from {path}");
        return input::file::read_structured(path);
    }
    if let Some(request) = input::stdin::read_piped()? {
        debug!("reading loan request from stdin");
        return Ok(request);
    }
    request_from_flags(args)
}

fn request_from_flags(args: &LoanArgs) -> Result<LoanRequest, Box<dyn std::error::Error>> {
    let property_value = args
        .property_value
        .ok_or("--property-value is required (or provide --input)")?;
    let down_payment = args
        .down_payment
        .ok_or("--down-payment is required (or provide --input)")?;
    let term_months = args
        .term_months
        .ok_or("--term-months is required (or provide --input)")?;
    let annual_interest_rate = args
        .interest_rate
        .ok_or("--interest-rate is required (or provide --input)")?;

    Ok(LoanRequest {
        schedule_type: args.schedule_type.into(),
        property_value,
        down_payment,
        term_months,
        annual_interest_rate,
        annual_reference_rate: args.reference_rate.unwrap_or(dec!(0)),
        monthly_admin_charge: args.admin_charge.unwrap_or(dec!(0)),
        monthly_insurance_charge: args.insurance_charge.unwrap_or(dec!(0)),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn flags() -> LoanArgs {
        LoanArgs {
            input: None,
            schedule_type: ScheduleKind::Price,
            property_value: Some(dec!(450000)),
            down_payment: Some(dec!(90000)),
            term_months: Some(300),
            interest_rate: Some(dec!(11.19)),
            reference_rate: None,
            admin_charge: Some(dec!(25)),
            insurance_charge: None,
        }
    }

    #[test]
    fn test_request_from_flags_defaults_optional_fields() {
        let req = request_from_flags(&flags()).unwrap();
        assert_eq!(req.schedule_type, ScheduleType::ConstantInstallment);
        assert_eq!(req.principal(), dec!(360000));
        assert_eq!(req.annual_reference_rate, Decimal::ZERO);
        assert_eq!(req.monthly_insurance_charge, Decimal::ZERO);
    }

    #[test]
    fn test_saved_record_matches_printed_schedule() {
        let path = std::env::temp_dir().join(format!("msim-simulate-{}.json", std::process::id()));
        let _ = std::fs::remove_file(&path);

        let request = request_from_flags(&flags()).unwrap();
        let value = simulate_request(request, Some(&path)).unwrap();
        assert_eq!(value["saved_index"], json!(0));

        let store = SimulationStore::open(&path).unwrap();
        let saved = store.list().get(0).unwrap();
        assert_eq!(serde_json::to_value(&saved.schedule).unwrap(), value["result"]["installments"]);

        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_unsaved_simulation_has_no_index() {
        let request = request_from_flags(&flags()).unwrap();
        let value = simulate_request(request, None).unwrap();
        assert!(value.get("saved_index").is_none());
        assert_eq!(value["result"]["installments"].as_array().unwrap().len(), 300);
    }

    #[test]
    fn test_missing_required_flag() {
        let mut args = flags();
        args.term_months = None;
        let err = request_from_flags(&args).unwrap_err();
        assert!(err.to_string().contains("--term-months"));
    }
}
