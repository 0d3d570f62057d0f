use crate::domain::model::{EligibilityRecord, FiscalData, ServiceKind};
use crate::domain::ports::{Investor, Registrable};
use crate::utils::error::{IncentiveError, Result};
use serde::Serialize;
use uuid::Uuid;

/// A citizen taking part in startup initiatives.
///
/// Eligibility, savings and the computed indicator are only written by a
/// [`Startup`](crate::core::Startup); the citizen can only draw savings down.
///
/// `id` is the citizen's identity and survives questionnaire updates; the tax
/// id is a value that may change.
#[derive(Debug, Clone, Serialize)]
pub struct Citizen {
    id: Uuid,
    first_name: String,
    last_name: String,
    age: u32,
    sport_interests: Vec<String>,
    tax_id: String,
    annual_income: f64,
    computed_indicator: Option<f64>,
    eligibility: EligibilityRecord,
    savings: f64,
}

impl Citizen {
    pub fn new(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        age: u32,
        fiscal: FiscalData,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            first_name: first_name.into(),
            last_name: last_name.into(),
            age,
            sport_interests: Vec::new(),
            tax_id: fiscal.tax_id,
            annual_income: fiscal.annual_income,
            computed_indicator: None,
            eligibility: EligibilityRecord::default(),
            savings: 0.0,
        }
    }

    pub fn with_sport_interests(mut self, interests: Vec<String>) -> Self {
        self.sport_interests = interests;
        self
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn first_name(&self) -> &str {
        &self.first_name
    }

    pub fn last_name(&self) -> &str {
        &self.last_name
    }

    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    pub fn age(&self) -> u32 {
        self.age
    }

    pub fn sport_interests(&self) -> &[String] {
        &self.sport_interests
    }

    pub fn tax_id(&self) -> &str {
        &self.tax_id
    }

    pub fn annual_income(&self) -> f64 {
        self.annual_income
    }

    pub fn computed_indicator(&self) -> Option<f64> {
        self.computed_indicator
    }

    pub fn eligibility(&self) -> EligibilityRecord {
        self.eligibility
    }

    pub fn savings(&self) -> f64 {
        self.savings
    }

    /// Overwrites tax id and income unconditionally.
    pub fn submit_fiscal_questionnaire(&mut self, fiscal: FiscalData) {
        self.tax_id = fiscal.tax_id;
        self.annual_income = fiscal.annual_income;
        tracing::info!("{} submitted the fiscal questionnaire", self.full_name());
    }

    pub fn join_startup<R: Registrable>(&self, startup: &mut R) -> bool {
        tracing::info!(
            "{} is trying to join the activities of \"{}\"",
            self.full_name(),
            startup.name()
        );
        startup.register_participant(self)
    }

    /// Signals intent only; the startup handles the request separately.
    pub fn request_additional_service(&self, kind: ServiceKind) -> bool {
        tracing::info!("{} requested the additional service {}", self.full_name(), kind);
        true
    }

    /// Deducts `amount` from savings. Association membership is not checked here.
    pub fn try_invest_savings(&mut self, association: &str, amount: f64) -> Result<()> {
        if amount.is_nan() || amount <= 0.0 {
            return Err(IncentiveError::InvalidAmount { amount });
        }
        if amount > self.savings {
            return Err(IncentiveError::InsufficientSavings {
                requested: amount,
                available: self.savings,
            });
        }

        self.savings -= amount;
        tracing::info!(
            "{} invested {:.2} in \"{}\", remaining savings {:.2}",
            self.full_name(),
            amount,
            association,
            self.savings
        );
        Ok(())
    }

    pub fn invest_savings(&mut self, association: &str, amount: f64) -> bool {
        match self.try_invest_savings(association, amount) {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!("{} cannot invest in \"{}\": {}", self.full_name(), association, e);
                false
            }
        }
    }

    pub(crate) fn record_eligibility(&mut self, record: EligibilityRecord, reward: f64) {
        self.eligibility = record;
        self.savings += reward;
    }

    pub(crate) fn record_computed_indicator(&mut self, value: f64) {
        self.computed_indicator = Some(value);
    }
}

impl Investor for Citizen {
    fn tax_id(&self) -> &str {
        &self.tax_id
    }

    fn display_name(&self) -> String {
        self.full_name()
    }

    fn savings(&self) -> f64 {
        self.savings
    }

    fn invest_savings(&mut self, association: &str, amount: f64) -> bool {
        Citizen::invest_savings(self, association, amount)
    }
}
