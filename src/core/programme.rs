use crate::core::report::{InvestmentEntry, InvestmentOutcome, ProgrammeReport};
use crate::core::{Citizen, Incentive, Startup};
use crate::domain::model::{FiscalData, InvestmentRequest, ServiceKind};

/// What a single citizen does during a programme run.
#[derive(Debug, Clone)]
pub struct Enrolment {
    pub citizen: Citizen,
    pub questionnaire: Option<FiscalData>,
    pub services: Vec<ServiceKind>,
    pub investments: Vec<InvestmentRequest>,
    pub join: bool,
}

impl Enrolment {
    pub fn new(citizen: Citizen) -> Self {
        Self {
            citizen,
            questionnaire: None,
            services: Vec::new(),
            investments: Vec::new(),
            join: true,
        }
    }
}

/// Drives one startup, its incentives and its citizens through a full round:
/// incentive assignment, questionnaires, eligibility, services, enrolment and
/// reinvestment of savings.
pub struct Programme {
    startup: Startup,
    incentives: Vec<Incentive>,
    enrolments: Vec<Enrolment>,
    atomic_investments: bool,
}

impl Programme {
    pub fn new(startup: Startup) -> Self {
        Self {
            startup,
            incentives: Vec::new(),
            enrolments: Vec::new(),
            atomic_investments: false,
        }
    }

    pub fn with_incentive(mut self, incentive: Incentive) -> Self {
        self.incentives.push(incentive);
        self
    }

    pub fn with_enrolment(mut self, enrolment: Enrolment) -> Self {
        self.enrolments.push(enrolment);
        self
    }

    /// Use [`Startup::settle_investment`] instead of the split
    /// deduct-then-register flow.
    pub fn with_atomic_investments(mut self, atomic: bool) -> Self {
        self.atomic_investments = atomic;
        self
    }

    pub fn startup(&self) -> &Startup {
        &self.startup
    }

    pub fn citizens(&self) -> impl Iterator<Item = &Citizen> {
        self.enrolments.iter().map(|e| &e.citizen)
    }

    /// Runs every step once. Calling it again re-evaluates eligibility and so
    /// credits the bonus rewards a second time.
    pub fn run(&mut self) -> ProgrammeReport {
        tracing::info!(
            "Starting programme for \"{}\" with {} incentives and {} citizens",
            self.startup.name(),
            self.incentives.len(),
            self.enrolments.len()
        );

        for incentive in &self.incentives {
            incentive.assign_to_startup(&mut self.startup);
        }

        for enrolment in &mut self.enrolments {
            let citizen = &mut enrolment.citizen;
            if let Some(fiscal) = enrolment.questionnaire.clone() {
                citizen.submit_fiscal_questionnaire(fiscal);
            }

            self.startup.evaluate_bonus_eligibility(citizen);

            for kind in &enrolment.services {
                if citizen.request_additional_service(*kind) {
                    self.startup.handle_service_request(citizen, *kind);
                }
            }

            if enrolment.join {
                citizen.join_startup(&mut self.startup);
            }
        }

        let mut ledger = Vec::new();
        for enrolment in &mut self.enrolments {
            for request in &enrolment.investments {
                let outcome = if self.atomic_investments {
                    settle(&self.startup, &mut enrolment.citizen, request)
                } else {
                    deduct_then_register(&self.startup, &mut enrolment.citizen, request)
                };
                ledger.push(InvestmentEntry {
                    tax_id: enrolment.citizen.tax_id().to_string(),
                    association: request.association.clone(),
                    amount: request.amount,
                    outcome,
                });
            }
        }

        let citizens: Vec<Citizen> = self.citizens().cloned().collect();
        let report = ProgrammeReport::new(&self.startup, &citizens, ledger);
        tracing::info!(
            "Programme finished: {} incentives received, {} participants, {:.2} total savings",
            report.received_incentives.len(),
            report.participants.len(),
            report.total_savings()
        );
        report
    }
}

fn settle(
    startup: &Startup,
    citizen: &mut Citizen,
    request: &InvestmentRequest,
) -> InvestmentOutcome {
    match startup.settle_investment(citizen, &request.association, request.amount) {
        Ok(()) => InvestmentOutcome::Settled,
        Err(e) => {
            tracing::warn!("Investment by {} rejected: {}", citizen.full_name(), e);
            InvestmentOutcome::Rejected {
                reason: e.to_string(),
            }
        }
    }
}

// The deduction is kept even when the association turns out not to be a partner.
fn deduct_then_register(
    startup: &Startup,
    citizen: &mut Citizen,
    request: &InvestmentRequest,
) -> InvestmentOutcome {
    if let Err(e) = citizen.try_invest_savings(&request.association, request.amount) {
        tracing::warn!("Investment by {} rejected: {}", citizen.full_name(), e);
        return InvestmentOutcome::Rejected {
            reason: e.to_string(),
        };
    }

    let registered =
        startup.try_register_association_investment(&*citizen, &request.association, request.amount);
    match registered {
        Ok(()) => InvestmentOutcome::Settled,
        Err(e) => {
            tracing::warn!(
                "{} deducted {:.2} but the investment was not registered: {}",
                citizen.full_name(),
                request.amount,
                e
            );
            InvestmentOutcome::DeductedUnregistered {
                reason: e.to_string(),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn citizen(first: &str, tax_id: &str, income: f64, age: u32) -> Citizen {
        Citizen::new(
            first,
            "Test",
            age,
            FiscalData {
                tax_id: tax_id.to_string(),
                annual_income: income,
            },
        )
    }

    fn invest(association: &str, amount: f64) -> InvestmentRequest {
        InvestmentRequest {
            association: association.to_string(),
            amount,
        }
    }

    fn programme(atomic: bool) -> Programme {
        let startup = Startup::new("Bonny Platform", "sport", vec!["A".to_string()]);
        let mut giulia = Enrolment::new(citizen("Giulia", "TAX-G", 12_000.0, 20));
        giulia.services = vec![ServiceKind::Isee];
        giulia.investments = vec![invest("A", 50.0), invest("C", 30.0), invest("A", -5.0)];

        Programme::new(startup)
            .with_enrolment(giulia)
            .with_atomic_investments(atomic)
    }

    #[test]
    fn test_split_flow_keeps_non_partner_deduction() {
        let mut programme = programme(false);
        let report = programme.run();

        let outcomes: Vec<&InvestmentOutcome> = report.investments.iter().map(|i| &i.outcome).collect();
        assert_eq!(outcomes[0], &InvestmentOutcome::Settled);
        assert!(matches!(outcomes[1], InvestmentOutcome::DeductedUnregistered { .. }));
        assert!(matches!(outcomes[2], InvestmentOutcome::Rejected { .. }));

        let giulia = report.citizen("TAX-G").unwrap();
        assert_eq!(giulia.savings, 170.0);
        assert_eq!(giulia.computed_indicator, Some(6_000.0));
    }

    #[test]
    fn test_split_flow_failed_deduction_skips_registration() {
        let startup = Startup::new("Bonny Platform", "sport", vec!["A".to_string()]);
        let mut marco = Enrolment::new(citizen("Marco", "TAX-M", 50_000.0, 45));
        marco.investments = vec![invest("A", 100.0)];

        let report = Programme::new(startup).with_enrolment(marco).run();

        match &report.investments[0].outcome {
            InvestmentOutcome::Rejected { reason } => {
                assert!(reason.starts_with("Insufficient savings"))
            }
            other => panic!("expected Rejected, got {:?}", other),
        }
        assert_eq!(report.citizen("TAX-M").unwrap().savings, 0.0);
    }

    #[test]
    fn test_atomic_flow_rejects_non_partner_without_deduction() {
        let mut programme = programme(true);
        let report = programme.run();

        assert!(matches!(report.investments[1].outcome, InvestmentOutcome::Rejected { .. }));
        assert_eq!(report.citizen("TAX-G").unwrap().savings, 200.0);
    }

    #[test]
    fn test_questionnaire_applies_before_evaluation() {
        let mut enrolment = Enrolment::new(citizen("Marco", "OLD", 10_000.0, 40));
        enrolment.questionnaire = Some(FiscalData {
            tax_id: "NEW".to_string(),
            annual_income: 25_000.0,
        });
        let mut programme = Programme::new(Startup::new("S", "sport", vec![])).with_enrolment(enrolment);

        let report = programme.run();
        let marco = report.citizen("NEW").unwrap();
        assert!(marco.eligibility.is_none());
        assert_eq!(marco.savings, 0.0);
        assert!(programme.startup().has_participant("NEW"));
    }

    #[test]
    fn test_non_joining_citizen_is_not_a_participant() {
        let mut enrolment = Enrolment::new(citizen("Anna", "TAX-A", 10_000.0, 30));
        enrolment.join = false;
        let mut programme = Programme::new(Startup::new("S", "sport", vec![])).with_enrolment(enrolment);

        let report = programme.run();
        assert!(report.participants.is_empty());
        assert_eq!(report.citizens.len(), 1);
    }

    #[test]
    fn test_rerun_compounds_rewards() {
        let mut programme = Programme::new(Startup::new("S", "sport", vec![]))
            .with_enrolment(Enrolment::new(citizen("Anna", "TAX-A", 12_000.0, 30)));

        assert_eq!(programme.run().citizen("TAX-A").unwrap().savings, 250.0);
        let report = programme.run();
        assert_eq!(report.citizen("TAX-A").unwrap().savings, 500.0);
        assert_eq!(report.participants.len(), 1);
    }
}
