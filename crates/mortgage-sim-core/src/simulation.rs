//! Saved simulations: request, derived parameters, schedule and timestamp.
//!
//! The list is keyed only by position. Removing an entry shifts every later
//! entry down by one.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use crate::amortization::schedule::{compute_schedule, LoanParameters, Schedule};
use crate::amortization::summary::{summarize, ScheduleSummary};
use crate::error::MortgageSimError;
use crate::validation::{validate_request, LoanRequest};
use crate::MortgageSimResult;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationRecord {
    pub request: LoanRequest,
    pub parameters: LoanParameters,
    pub schedule: Schedule,
    pub created_at: DateTime<Utc>,
}

impl SimulationRecord {
    /// Validate, compute and timestamp a new simulation.
    pub fn new(request: LoanRequest) -> MortgageSimResult<Self> {
        Self::at(request, Utc::now())
    }

    pub fn at(request: LoanRequest, created_at: DateTime<Utc>) -> MortgageSimResult<Self> {
        let parameters = validate_request(&request)?;
        let schedule = compute_schedule(&parameters)?;
        Ok(SimulationRecord {
            request,
            parameters,
            schedule,
            created_at,
        })
    }

    /// Record a schedule that was already computed from `parameters`.
    pub fn from_computed(request: LoanRequest, parameters: LoanParameters, schedule: Schedule) -> Self {
        SimulationRecord {
            request,
            parameters,
            schedule,
            created_at: Utc::now(),
        }
    }

    pub fn summary(&self) -> ScheduleSummary {
        summarize(&self.schedule)
    }

    /// `simulation_<RFC 3339 timestamp>.csv`
    pub fn export_file_name(&self) -> String {
        format!(
            "simulation_{}.csv",
            self.created_at.to_rfc3339_opts(SecondsFormat::Millis, true)
        )
    }
}

/// Append-only list of saved simulations.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SimulationList {
    records: Vec<SimulationRecord>,
}

impl SimulationList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, record: SimulationRecord) -> usize {
        self.records.push(record);
        self.records.len() - 1
    }

    pub fn get(&self, index: usize) -> MortgageSimResult<&SimulationRecord> {
        self.records.get(index).ok_or_else(|| self.missing(index))
    }

    pub fn remove(&mut self, index: usize) -> MortgageSimResult<SimulationRecord> {
        if index >= self.records.len() {
            return Err(self.missing(index));
        }
        Ok(self.records.remove(index))
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, SimulationRecord> {
        self.records.iter()
    }

    pub fn from_json(json: &str) -> MortgageSimResult<Self> {
        if json.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> MortgageSimResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    fn missing(&self, index: usize) -> MortgageSimError {
        MortgageSimError::NotFound(format!(
            "simulation {index} (list holds {})",
            self.records.len()
        ))
    }
}
