use crate::domain::model::EligibilityRecord;
use crate::utils::error::Result;
use crate::utils::validation::{validate_non_negative, validate_range, Validate};
use serde::{Deserialize, Serialize};

/// Income thresholds and rewards used to evaluate fiscal-bonus eligibility.
///
/// Thresholds are inclusive (`income <= threshold`); the ISEE age limit is
/// exclusive (`age < isee_max_age`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BonusPolicy {
    pub isee_income_threshold: f64,
    pub isee_max_age: u32,
    pub gas_income_threshold: f64,
    pub electric_income_threshold: f64,
    pub water_income_threshold: f64,

    pub isee_reward: f64,
    pub gas_reward: f64,
    pub electric_reward: f64,
    pub water_reward: f64,

    /// Share of annual income reported as the computed ISEE indicator.
    pub isee_ratio: f64,
}

impl Default for BonusPolicy {
    fn default() -> Self {
        Self {
            isee_income_threshold: 20_000.0,
            isee_max_age: 65,
            gas_income_threshold: 15_000.0,
            electric_income_threshold: 18_000.0,
            water_income_threshold: 16_000.0,
            isee_reward: 100.0,
            gas_reward: 50.0,
            electric_reward: 70.0,
            water_reward: 30.0,
            isee_ratio: 0.5,
        }
    }
}

impl BonusPolicy {
    pub fn evaluate(&self, annual_income: f64, age: u32) -> EligibilityRecord {
        EligibilityRecord {
            isee: annual_income <= self.isee_income_threshold && age < self.isee_max_age,
            gas: annual_income <= self.gas_income_threshold,
            electric: annual_income <= self.electric_income_threshold,
            water: annual_income <= self.water_income_threshold,
        }
    }

    /// Sum of the rewards for every flag set in `record`.
    pub fn reward_for(&self, record: &EligibilityRecord) -> f64 {
        let mut reward = 0.0;
        if record.isee {
            reward += self.isee_reward;
        }
        if record.gas {
            reward += self.gas_reward;
        }
        if record.electric {
            reward += self.electric_reward;
        }
        if record.water {
            reward += self.water_reward;
        }
        reward
    }

    pub fn computed_indicator(&self, annual_income: f64) -> f64 {
        annual_income * self.isee_ratio
    }
}

impl Validate for BonusPolicy {
    fn validate(&self) -> Result<()> {
        validate_non_negative("policy.isee_income_threshold", self.isee_income_threshold)?;
        validate_non_negative("policy.gas_income_threshold", self.gas_income_threshold)?;
        validate_non_negative(
            "policy.electric_income_threshold",
            self.electric_income_threshold,
        )?;
        validate_non_negative("policy.water_income_threshold", self.water_income_threshold)?;

        // Savings must never go negative, so rewards cannot either.
        validate_non_negative("policy.isee_reward", self.isee_reward)?;
        validate_non_negative("policy.gas_reward", self.gas_reward)?;
        validate_non_negative("policy.electric_reward", self.electric_reward)?;
        validate_non_negative("policy.water_reward", self.water_reward)?;

        validate_non_negative("policy.isee_ratio", self.isee_ratio)?;
        validate_range("policy.isee_ratio", self.isee_ratio, 0.0, 1.0)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_thresholds_are_inclusive() {
        let policy = BonusPolicy::default();

        let record = policy.evaluate(15_000.0, 30);
        assert!(record.isee);
        assert!(record.gas);
        assert!(record.electric);
        assert!(record.water);

        let record = policy.evaluate(15_000.01, 30);
        assert!(!record.gas);
        assert!(record.water);

        let record = policy.evaluate(16_000.5, 30);
        assert!(!record.water);
        assert!(record.electric);

        let record = policy.evaluate(20_000.0, 30);
        assert!(record.isee);
        assert!(!record.electric);
    }

    #[test]
    fn test_isee_age_limit_is_exclusive() {
        let policy = BonusPolicy::default();
        assert!(policy.evaluate(10_000.0, 64).isee);
        assert!(!policy.evaluate(10_000.0, 65).isee);
        // The other bonuses ignore age.
        assert!(policy.evaluate(10_000.0, 80).gas);
    }

    #[test]
    fn test_reward_for() {
        let policy = BonusPolicy::default();
        assert_eq!(policy.reward_for(&policy.evaluate(12_000.0, 20)), 250.0);
        assert_eq!(policy.reward_for(&policy.evaluate(19_000.0, 40)), 100.0);
        assert_eq!(policy.reward_for(&policy.evaluate(17_000.0, 70)), 70.0);
        assert_eq!(policy.reward_for(&EligibilityRecord::default()), 0.0);
    }

    #[test]
    fn test_validate_rejects_negative_reward() {
        let policy = BonusPolicy {
            gas_reward: -5.0,
            ..BonusPolicy::default()
        };
        assert!(policy.validate().is_err());
        assert!(BonusPolicy::default().validate().is_ok());
    }
}
