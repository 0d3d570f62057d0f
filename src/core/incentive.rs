use crate::domain::model::{Sector, ValidityWindow};
use crate::domain::ports::Registrable;
use chrono::NaiveDate;
use serde::Serialize;

/// A government incentive. Immutable once built; `code` is its unique key.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Incentive {
    code: String,
    name: String,
    description: String,
    issuing_authority: String,
    eligibility_criteria: Vec<String>,
    validity: ValidityWindow,
    sector: Sector,
    value: Option<f64>,
}

impl Incentive {
    pub fn builder(
        code: impl Into<String>,
        name: impl Into<String>,
        sector: Sector,
        validity: ValidityWindow,
    ) -> IncentiveBuilder {
        IncentiveBuilder {
            incentive: Incentive {
                code: code.into(),
                name: name.into(),
                description: String::new(),
                issuing_authority: String::new(),
                eligibility_criteria: Vec::new(),
                validity,
                sector,
                value: None,
            },
        }
    }

    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn issuing_authority(&self) -> &str {
        &self.issuing_authority
    }

    /// Free text; never evaluated.
    pub fn eligibility_criteria(&self) -> &[String] {
        &self.eligibility_criteria
    }

    pub fn validity(&self) -> ValidityWindow {
        self.validity
    }

    pub fn sector(&self) -> Sector {
        self.sector
    }

    pub fn value(&self) -> Option<f64> {
        self.value
    }

    /// Informational only; assignment never checks it.
    pub fn is_active_on(&self, date: NaiveDate) -> bool {
        self.validity.contains(date)
    }

    /// Assigns the incentive without checking that the startup qualifies.
    pub fn assign_to_startup<R: Registrable>(&self, startup: &mut R) -> bool {
        tracing::info!(
            "Assigning incentive \"{}\" to startup \"{}\"",
            self.name,
            startup.name()
        );
        startup.receive_incentive(self)
    }
}

pub struct IncentiveBuilder {
    incentive: Incentive,
}

impl IncentiveBuilder {
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.incentive.description = description.into();
        self
    }

    pub fn issuing_authority(mut self, authority: impl Into<String>) -> Self {
        self.incentive.issuing_authority = authority.into();
        self
    }

    pub fn eligibility_criteria(mut self, criteria: Vec<String>) -> Self {
        self.incentive.eligibility_criteria = criteria;
        self
    }

    pub fn value(mut self, value: Option<f64>) -> Self {
        self.incentive.value = value;
        self
    }

    pub fn build(self) -> Incentive {
        self.incentive
    }
}
