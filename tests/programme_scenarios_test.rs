use chrono::NaiveDate;
use civic_incentives::{
    BonusPolicy, Citizen, EligibilityRecord, FiscalData, Incentive, Sector, ServiceKind, Startup,
    ValidityWindow,
};

fn citizen(tax_id: &str, income: f64, age: u32) -> Citizen {
    Citizen::new(
        "Test",
        "Citizen",
        age,
        FiscalData {
            tax_id: tax_id.to_string(),
            annual_income: income,
        },
    )
}

fn partner_startup() -> Startup {
    Startup::new("Bonny Platform", "sport", vec!["A".to_string(), "B".to_string()])
}

fn incentive(code: &str) -> Incentive {
    let window = ValidityWindow::new(
        NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
        NaiveDate::from_ymd_opt(2025, 12, 31).unwrap(),
    )
    .unwrap();
    Incentive::builder(code, "Sport Innovation Fund", Sector::Sport, window)
        .issuing_authority("Ministry of Innovation")
        .value(Some(150_000.0))
        .build()
}

#[test]
fn test_low_income_young_citizen_is_eligible_for_everything() {
    let startup = partner_startup();
    let mut giulia = citizen("GLIVRD05A41F205P", 12_000.0, 20);

    let record = startup.evaluate_bonus_eligibility(&mut giulia);

    assert_eq!(
        record,
        EligibilityRecord {
            isee: true,
            gas: true,
            electric: true,
            water: true,
        }
    );
    assert_eq!(giulia.savings(), 250.0);
}

#[test]
fn test_high_income_citizen_is_eligible_for_nothing() {
    let startup = partner_startup();
    let mut marco = citizen("MRCRSS80A01H501K", 25_000.0, 40);

    let record = startup.evaluate_bonus_eligibility(&mut marco);

    assert_eq!(record, EligibilityRecord::default());
    assert_eq!(marco.savings(), 0.0);
}

#[test]
fn test_flags_match_thresholds_across_incomes_and_ages() {
    let startup = partner_startup();
    let policy = BonusPolicy::default();

    for income in [0.0, 14_999.0, 15_000.0, 15_500.0, 16_000.0, 17_999.0, 18_000.0, 20_000.0, 20_001.0] {
        for age in [18, 64, 65, 90] {
            let mut c = citizen("T", income, age);
            let record = startup.evaluate_bonus_eligibility(&mut c);

            assert_eq!(record.isee, income <= 20_000.0 && age < 65, "isee {} {}", income, age);
            assert_eq!(record.gas, income <= 15_000.0, "gas {}", income);
            assert_eq!(record.electric, income <= 18_000.0, "electric {}", income);
            assert_eq!(record.water, income <= 16_000.0, "water {}", income);
            assert_eq!(c.eligibility(), record);
            assert_eq!(c.savings(), policy.reward_for(&record));
        }
    }
}

#[test]
fn test_repeated_evaluation_compounds_rewards() {
    let startup = partner_startup();
    let mut giulia = citizen("GLIVRD05A41F205P", 12_000.0, 20);

    startup.evaluate_bonus_eligibility(&mut giulia);
    startup.evaluate_bonus_eligibility(&mut giulia);

    assert_eq!(giulia.savings(), 500.0);
}

#[test]
fn test_negative_investment_is_rejected() {
    let startup = partner_startup();
    let mut giulia = citizen("GLIVRD05A41F205P", 12_000.0, 20);
    startup.evaluate_bonus_eligibility(&mut giulia);

    assert!(!giulia.invest_savings("X", -10.0));
    assert_eq!(giulia.savings(), 250.0);

    let mut empty = citizen("EMPTY", 50_000.0, 30);
    assert!(!empty.invest_savings("X", -10.0));
    assert!(!empty.invest_savings("X", 1.0));
    assert_eq!(empty.savings(), 0.0);
}

#[test]
fn test_association_must_be_a_partner() {
    let startup = partner_startup();
    let c = citizen("T", 12_000.0, 20);

    assert!(!startup.register_association_investment(&c, "C", 30.0));
    assert!(startup.register_association_investment(&c, "A", 30.0));
    assert!(startup.is_partner("B"));
}

#[test]
fn test_incentive_and_participant_registries_are_idempotent() {
    let mut startup = partner_startup();
    let fund = incentive("FINN-001");

    assert!(fund.assign_to_startup(&mut startup));
    assert!(!fund.assign_to_startup(&mut startup));
    assert!(!startup.receive_incentive(&incentive("FINN-001")));
    assert_eq!(startup.received_incentives().len(), 1);

    let giulia = citizen("GLIVRD05A41F205P", 12_000.0, 20);
    assert!(giulia.join_startup(&mut startup));
    assert!(!giulia.join_startup(&mut startup));
    assert!(!startup.register_participant(&giulia));
    assert_eq!(startup.participants().len(), 1);
}

#[test]
fn test_demonstration_walkthrough() {
    let mut startup = Startup::new(
        "Bonny Platform",
        "state bonus brokerage and sport promotion",
        vec![
            "Associazione Calcistica Roma".to_string(),
            "Centro Nuoto Acquatica".to_string(),
            "Palestra Fitness Life".to_string(),
        ],
    );
    assert!(incentive("FINN-001").assign_to_startup(&mut startup));

    let mut marco = citizen("MRCRSS80A01H501K", 25_000.0, 40);
    let mut giulia = citizen("GLIVRD05A41F205P", 12_000.0, 20);

    startup.evaluate_bonus_eligibility(&mut marco);
    startup.evaluate_bonus_eligibility(&mut giulia);

    assert!(marco.request_additional_service(ServiceKind::AnnualTaxFiling));
    assert!(startup.handle_service_request(&mut marco, ServiceKind::AnnualTaxFiling));
    assert_eq!(marco.computed_indicator(), None);

    assert!(giulia.request_additional_service(ServiceKind::Isee));
    assert!(startup.handle_service_request(&mut giulia, ServiceKind::Isee));
    assert_eq!(giulia.computed_indicator(), Some(6_000.0));

    assert!(marco.join_startup(&mut startup));
    assert!(giulia.join_startup(&mut startup));

    assert!(giulia.invest_savings("Centro Nuoto Acquatica", 50.0));
    assert!(startup.register_association_investment(&giulia, "Centro Nuoto Acquatica", 50.0));

    // Marco has no savings to invest.
    assert!(!marco.invest_savings("Associazione Calcistica Roma", 100.0));

    // Split flow: the deduction stands even though registration fails.
    assert!(giulia.invest_savings("Associazione Basket", 30.0));
    assert!(!startup.register_association_investment(&giulia, "Associazione Basket", 30.0));

    assert_eq!(giulia.savings(), 170.0);
    assert_eq!(marco.savings(), 0.0);
    let names: Vec<&str> = startup.participants().iter().map(|p| p.full_name.as_str()).collect();
    assert_eq!(names.len(), 2);
}
