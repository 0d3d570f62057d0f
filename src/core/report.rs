use crate::core::{Citizen, Startup};
use crate::domain::model::{EligibilityRecord, Participant};
use crate::utils::error::{IncentiveError, Result};
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct ProgrammeReport {
    pub startup: String,
    pub received_incentives: Vec<String>,
    pub participants: Vec<Participant>,
    pub partner_associations: Vec<String>,
    pub citizens: Vec<CitizenSummary>,
    pub investments: Vec<InvestmentEntry>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CitizenSummary {
    pub tax_id: String,
    pub full_name: String,
    pub age: u32,
    pub annual_income: f64,
    pub eligibility: EligibilityRecord,
    pub savings: f64,
    pub computed_indicator: Option<f64>,
}

impl From<&Citizen> for CitizenSummary {
    fn from(citizen: &Citizen) -> Self {
        Self {
            tax_id: citizen.tax_id().to_string(),
            full_name: citizen.full_name(),
            age: citizen.age(),
            annual_income: citizen.annual_income(),
            eligibility: citizen.eligibility(),
            savings: citizen.savings(),
            computed_indicator: citizen.computed_indicator(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum InvestmentOutcome {
    /// Savings deducted and the association confirmed as a partner.
    Settled,
    /// Savings deducted but the association is not a partner.
    DeductedUnregistered { reason: String },
    /// Nothing deducted.
    Rejected { reason: String },
}

#[derive(Debug, Clone, Serialize)]
pub struct InvestmentEntry {
    pub tax_id: String,
    pub association: String,
    pub amount: f64,
    pub outcome: InvestmentOutcome,
}

// csv cannot serialise nested structs, so citizens are flattened per row.
#[derive(Serialize)]
struct CitizenRow<'a> {
    tax_id: &'a str,
    full_name: &'a str,
    age: u32,
    annual_income: f64,
    isee: bool,
    gas: bool,
    electric: bool,
    water: bool,
    savings: f64,
    computed_indicator: Option<f64>,
}

#[derive(Serialize)]
struct LedgerRow<'a> {
    tax_id: &'a str,
    association: &'a str,
    amount: f64,
    status: &'static str,
    reason: &'a str,
}

impl InvestmentOutcome {
    pub fn status(&self) -> &'static str {
        match self {
            InvestmentOutcome::Settled => "settled",
            InvestmentOutcome::DeductedUnregistered { .. } => "deducted_unregistered",
            InvestmentOutcome::Rejected { .. } => "rejected",
        }
    }

    pub fn reason(&self) -> Option<&str> {
        match self {
            InvestmentOutcome::Settled => None,
            InvestmentOutcome::DeductedUnregistered { reason }
            | InvestmentOutcome::Rejected { reason } => Some(reason),
        }
    }
}

impl ProgrammeReport {
    pub fn new(startup: &Startup, citizens: &[Citizen], investments: Vec<InvestmentEntry>) -> Self {
        Self {
            startup: startup.name().to_string(),
            received_incentives: startup
                .received_incentives()
                .iter()
                .map(|i| i.code().to_string())
                .collect(),
            participants: startup.participants().to_vec(),
            partner_associations: startup.partner_associations().to_vec(),
            citizens: citizens.iter().map(CitizenSummary::from).collect(),
            investments,
        }
    }

    pub fn citizen(&self, tax_id: &str) -> Option<&CitizenSummary> {
        self.citizens.iter().find(|c| c.tax_id == tax_id)
    }

    pub fn total_savings(&self) -> f64 {
        self.citizens.iter().map(|c| c.savings).sum()
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// One row per citizen.
    pub fn to_csv(&self) -> Result<Vec<u8>> {
        let mut writer = csv::Writer::from_writer(Vec::new());
        for citizen in &self.citizens {
            writer.serialize(CitizenRow {
                tax_id: &citizen.tax_id,
                full_name: &citizen.full_name,
                age: citizen.age,
                annual_income: citizen.annual_income,
                isee: citizen.eligibility.isee,
                gas: citizen.eligibility.gas,
                electric: citizen.eligibility.electric,
                water: citizen.eligibility.water,
                savings: citizen.savings,
                computed_indicator: citizen.computed_indicator,
            })?;
        }
        writer
            .into_inner()
            .map_err(|e| IncentiveError::IoError(e.into_error()))
    }

    /// One row per investment attempt, in the order they were made.
    pub fn ledger_to_csv(&self) -> Result<Vec<u8>> {
        let mut writer = csv::Writer::from_writer(Vec::new());
        for entry in &self.investments {
            writer.serialize(LedgerRow {
                tax_id: &entry.tax_id,
                association: &entry.association,
                amount: entry.amount,
                status: entry.outcome.status(),
                reason: entry.outcome.reason().unwrap_or(""),
            })?;
        }
        writer
            .into_inner()
            .map_err(|e| IncentiveError::IoError(e.into_error()))
    }
}
