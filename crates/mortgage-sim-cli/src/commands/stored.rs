use clap::Args;
use serde_json::{json, Value};
use std::fs;
use std::path::{Path, PathBuf};

use mortgage_sim_core::export::export_schedule_csv;
use mortgage_sim_core::simulation::SimulationRecord;

use crate::store::SimulationStore;

#[derive(Args)]
pub struct RemoveArgs {
    /// Position of the simulation in the list (from `msim list`)
    #[arg(long)]
    pub index: usize,
}

#[derive(Args)]
pub struct ExportArgs {
    /// Position of the simulation in the list (from `msim list`)
    #[arg(long)]
    pub index: usize,

    /// Destination file or directory; stdout when omitted
    #[arg(long)]
    pub out: Option<PathBuf>,
}

pub fn run_list(store_path: &Path) -> Result<Value, Box<dyn std::error::Error>> {
    let store = SimulationStore::open(store_path)?;
    let results: Vec<Value> = store
        .list()
        .iter()
        .enumerate()
        .map(|(index, record)| list_row(index, record))
        .collect();
    Ok(json!({ "results": results }))
}

pub fn run_remove(args: RemoveArgs, store_path: &Path) -> Result<Value, Box<dyn std::error::Error>> {
    let mut store = SimulationStore::open(store_path)?;
    let removed = store.remove(args.index)?;
    Ok(json!({
        "result": {
            "removed_index": args.index,
            "schedule_type": removed.parameters.schedule_type.to_string(),
            "created_at": removed.created_at.to_rfc3339(),
            "remaining": store.list().len(),
        }
    }))
}

/// Writes the CSV itself; returns `Value::Null` when it went to stdout.
pub fn run_export(args: ExportArgs, store_path: &Path) -> Result<Value, Box<dyn std::error::Error>> {
    let store = SimulationStore::open(store_path)?;
    let record = store.list().get(args.index)?;
    let csv = export_schedule_csv(&record.schedule)?;

    match args.out {
        None => {
            print!("{csv}");
            Ok(Value::Null)
        }
        Some(out) => {
            let target = if out.is_dir() {
                out.join(record.export_file_name())
            } else {
                out
            };
            fs::write(&target, &csv)
                .map_err(|e| format!("Failed to write '{}': {}", target.display(), e))?;
            Ok(json!({
                "result": {
                    "index": args.index,
                    "path": target.display().to_string(),
                    "rows": record.schedule.len(),
                }
            }))
        }
    }
}

fn list_row(index: usize, record: &SimulationRecord) -> Value {
    let summary = record.summary();
    json!({
        "index": index,
        "schedule_type": record.parameters.schedule_type.to_string(),
        "property_value": record.request.property_value,
        "principal": record.parameters.principal,
        "term_months": record.parameters.term_months,
        "annual_interest_rate": record.parameters.annual_interest_rate,
        "annual_reference_rate": record.parameters.annual_reference_rate,
        "first_payment": summary.first_payment,
        "last_payment": summary.last_payment,
        "total_paid": summary.total_paid,
        "total_interest": summary.total_interest,
        "total_charges": summary.total_charges,
        "created_at": record.created_at.to_rfc3339(),
    })
}
