use crate::core::citizen::Citizen;
use crate::core::incentive::Incentive;
use crate::core::policy::BonusPolicy;
use crate::domain::model::{EligibilityRecord, Participant, ServiceKind};
use crate::domain::ports::{Investor, Registrable};
use crate::utils::error::{IncentiveError, Result};
use crate::utils::validation::Validate;
use std::str::FromStr;

/// A startup that receives incentives, enrols citizens and evaluates their
/// fiscal-bonus eligibility.
///
/// Both registries are append-only and keep insertion order.
#[derive(Debug, Clone)]
pub struct Startup {
    name: String,
    focus_sector: String,
    description: String,
    offerings: Vec<String>,
    received_incentives: Vec<Incentive>,
    participants: Vec<Participant>,
    partner_associations: Vec<String>,
    policy: BonusPolicy,
}

impl Startup {
    pub fn new(
        name: impl Into<String>,
        focus_sector: impl Into<String>,
        partner_associations: Vec<String>,
    ) -> Self {
        Self {
            name: name.into(),
            focus_sector: focus_sector.into(),
            description: String::new(),
            offerings: Vec::new(),
            received_incentives: Vec::new(),
            participants: Vec::new(),
            partner_associations,
            policy: BonusPolicy::default(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_offerings(mut self, offerings: Vec<String>) -> Self {
        self.offerings = offerings;
        self
    }

    /// Rejects policies with negative thresholds or rewards, or an ISEE ratio
    /// outside `0..=1`, so that evaluation can never drain savings.
    pub fn with_policy(mut self, policy: BonusPolicy) -> Result<Self> {
        policy.validate()?;
        self.policy = policy;
        Ok(self)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn focus_sector(&self) -> &str {
        &self.focus_sector
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn offerings(&self) -> &[String] {
        &self.offerings
    }

    pub fn policy(&self) -> &BonusPolicy {
        &self.policy
    }

    pub fn received_incentives(&self) -> &[Incentive] {
        &self.received_incentives
    }

    pub fn participants(&self) -> &[Participant] {
        &self.participants
    }

    pub fn partner_associations(&self) -> &[String] {
        &self.partner_associations
    }

    pub fn has_incentive(&self, code: &str) -> bool {
        self.received_incentives.iter().any(|i| i.code() == code)
    }

    pub fn has_participant(&self, tax_id: &str) -> bool {
        self.participants.iter().any(|p| p.tax_id == tax_id)
    }

    /// Exact, case-sensitive match.
    pub fn is_partner(&self, association: &str) -> bool {
        self.partner_associations.iter().any(|a| a == association)
    }

    pub fn try_receive_incentive(&mut self, incentive: &Incentive) -> Result<()> {
        if self.has_incentive(incentive.code()) {
            return Err(IncentiveError::DuplicateIncentive {
                code: incentive.code().to_string(),
            });
        }
        self.received_incentives.push(incentive.clone());
        tracing::info!(
            "Startup \"{}\" received incentive \"{}\"",
            self.name,
            incentive.name()
        );
        Ok(())
    }

    pub fn receive_incentive(&mut self, incentive: &Incentive) -> bool {
        match self.try_receive_incentive(incentive) {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!("Startup \"{}\": {}", self.name, e);
                false
            }
        }
    }

    /// Rejects a citizen already registered under the same tax id, or the
    /// same citizen registered earlier under a tax id it has since changed.
    pub fn try_register_participant(&mut self, citizen: &Citizen) -> Result<()> {
        let already_registered = self
            .participants
            .iter()
            .any(|p| p.citizen_id == citizen.id() || p.tax_id == citizen.tax_id());
        if already_registered {
            return Err(IncentiveError::DuplicateParticipant {
                tax_id: citizen.tax_id().to_string(),
            });
        }
        self.participants.push(Participant {
            citizen_id: citizen.id(),
            tax_id: citizen.tax_id().to_string(),
            full_name: citizen.full_name(),
        });
        tracing::info!(
            "Startup \"{}\" registered the participation of {}",
            self.name,
            citizen.full_name()
        );
        Ok(())
    }

    pub fn register_participant(&mut self, citizen: &Citizen) -> bool {
        match self.try_register_participant(citizen) {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!("Startup \"{}\": {}", self.name, e);
                false
            }
        }
    }

    /// Replaces the citizen's eligibility record and credits the reward for
    /// every eligible flag. Rewards accumulate on every call.
    pub fn evaluate_bonus_eligibility(&self, citizen: &mut Citizen) -> EligibilityRecord {
        let record = self.policy.evaluate(citizen.annual_income(), citizen.age());
        let reward = self.policy.reward_for(&record);
        citizen.record_eligibility(record, reward);

        tracing::info!(
            "Bonus eligibility for {} ({}): {:?}",
            citizen.full_name(),
            citizen.tax_id(),
            record
        );
        tracing::debug!(
            "Credited {:.2}, accumulated savings {:.2}",
            reward,
            citizen.savings()
        );
        record
    }

    pub fn handle_service_request(&self, citizen: &mut Citizen, kind: ServiceKind) -> bool {
        tracing::info!(
            "Startup \"{}\" is handling the {} request of {}",
            self.name,
            kind,
            citizen.full_name()
        );
        match kind {
            ServiceKind::Isee => {
                let value = self.policy.computed_indicator(citizen.annual_income());
                citizen.record_computed_indicator(value);
                tracing::debug!("ISEE computed for {}: {:.2}", citizen.full_name(), value);
            }
            ServiceKind::AnnualTaxFiling => {}
        }
        true
    }

    /// Same as [`handle_service_request`](Self::handle_service_request) for a
    /// service named by string; unknown names are rejected.
    pub fn handle_service_request_named(&self, citizen: &mut Citizen, kind: &str) -> bool {
        match ServiceKind::from_str(kind) {
            Ok(kind) => self.handle_service_request(citizen, kind),
            Err(e) => {
                tracing::warn!("Startup \"{}\": {}", self.name, e);
                false
            }
        }
    }

    /// Confirms that `association` is a partner. Moves no money: the
    /// deduction must already have happened through the investor.
    pub fn try_register_association_investment<I: Investor + ?Sized>(
        &self,
        investor: &I,
        association: &str,
        amount: f64,
    ) -> Result<()> {
        if !self.is_partner(association) {
            return Err(IncentiveError::UnknownAssociation {
                name: association.to_string(),
                startup: self.name.clone(),
            });
        }
        tracing::info!(
            "Startup \"{}\" registered an investment of {:.2} by {} in \"{}\"",
            self.name,
            amount,
            investor.display_name(),
            association
        );
        Ok(())
    }

    pub fn register_association_investment<I: Investor + ?Sized>(
        &self,
        investor: &I,
        association: &str,
        amount: f64,
    ) -> bool {
        match self.try_register_association_investment(investor, association, amount) {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!("Cannot register the investment: {}", e);
                false
            }
        }
    }

    /// Validates the partnership first, then deducts. Nothing changes on error.
    pub fn settle_investment(
        &self,
        citizen: &mut Citizen,
        association: &str,
        amount: f64,
    ) -> Result<()> {
        if !self.is_partner(association) {
            return Err(IncentiveError::UnknownAssociation {
                name: association.to_string(),
                startup: self.name.clone(),
            });
        }
        citizen.try_invest_savings(association, amount)?;
        self.try_register_association_investment(&*citizen, association, amount)
    }
}

impl Registrable for Startup {
    fn name(&self) -> &str {
        &self.name
    }

    fn receive_incentive(&mut self, incentive: &Incentive) -> bool {
        Startup::receive_incentive(self, incentive)
    }

    fn register_participant(&mut self, citizen: &Citizen) -> bool {
        Startup::register_participant(self, citizen)
    }
}
