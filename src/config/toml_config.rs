use crate::core::{
    BonusPolicy, Citizen, Enrolment, FiscalData, Incentive, InvestmentRequest, Programme, Sector,
    ServiceKind, Startup, Storage, ValidityWindow,
};
use crate::utils::error::{IncentiveError, Result};
use crate::utils::validation::{validate_non_empty_string, validate_non_negative, Validate};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// A roster: one startup, the incentives it is offered and the citizens
/// taking part, loaded from TOML.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RosterConfig {
    pub startup: StartupConfig,
    pub policy: Option<BonusPolicy>,
    pub options: Option<OptionsConfig>,
    #[serde(default)]
    pub incentives: Vec<IncentiveConfig>,
    #[serde(default)]
    pub citizens: Vec<CitizenConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StartupConfig {
    pub name: String,
    pub focus_sector: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub offerings: Vec<String>,
    #[serde(default)]
    pub partner_associations: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OptionsConfig {
    pub atomic_investments: Option<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IncentiveConfig {
    pub code: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub issuing_authority: String,
    #[serde(default)]
    pub eligibility_criteria: Vec<String>,
    /// ISO date, quoted: `"2025-01-01"`.
    pub valid_from: NaiveDate,
    pub valid_until: NaiveDate,
    pub sector: String,
    pub value: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CitizenConfig {
    pub first_name: String,
    pub last_name: String,
    pub age: u32,
    #[serde(default)]
    pub sport_interests: Vec<String>,
    pub tax_id: String,
    pub annual_income: f64,
    pub questionnaire: Option<FiscalData>,
    #[serde(default)]
    pub services: Vec<ServiceKind>,
    #[serde(default)]
    pub investments: Vec<InvestmentRequest>,
    pub join: Option<bool>,
}

impl RosterConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        Self::from_toml_str(&content)
    }

    pub async fn from_storage<S: Storage>(storage: &S, path: &str) -> Result<Self> {
        let bytes = storage.read_file(path).await?;
        let content = String::from_utf8(bytes).map_err(|e| IncentiveError::ConfigParseError {
            message: format!("Roster is not valid UTF-8: {}", e),
        })?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| IncentiveError::ConfigParseError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Replaces `${VAR}` with the environment value; unset variables are left as-is.
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = regex::Regex::new(r"\$\{([^}]+)\}").map_err(|e| {
            IncentiveError::ConfigParseError {
                message: e.to_string(),
            }
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn atomic_investments(&self) -> bool {
        self.options
            .as_ref()
            .and_then(|o| o.atomic_investments)
            .unwrap_or(false)
    }

    pub fn policy(&self) -> BonusPolicy {
        self.policy.clone().unwrap_or_default()
    }

    /// Validates the roster and builds a ready-to-run [`Programme`].
    pub fn into_programme(self) -> Result<Programme> {
        self.validate()?;

        let startup = Startup::new(
            self.startup.name.clone(),
            self.startup.focus_sector.clone(),
            self.startup.partner_associations.clone(),
        )
        .with_description(self.startup.description.clone())
        .with_offerings(self.startup.offerings.clone())
        .with_policy(self.policy())?;

        let mut programme = Programme::new(startup).with_atomic_investments(self.atomic_investments());

        for incentive in &self.incentives {
            programme = programme.with_incentive(incentive.to_incentive()?);
        }
        for citizen in self.citizens {
            programme = programme.with_enrolment(citizen.into_enrolment());
        }

        Ok(programme)
    }
}

impl IncentiveConfig {
    pub fn to_incentive(&self) -> Result<Incentive> {
        let sector: Sector = self.sector.parse()?;
        let validity = ValidityWindow::new(self.valid_from, self.valid_until)?;

        Ok(
            Incentive::builder(self.code.clone(), self.name.clone(), sector, validity)
                .description(self.description.clone())
                .issuing_authority(self.issuing_authority.clone())
                .eligibility_criteria(self.eligibility_criteria.clone())
                .value(self.value)
                .build(),
        )
    }
}

impl CitizenConfig {
    pub fn into_enrolment(self) -> Enrolment {
        let citizen = Citizen::new(
            self.first_name,
            self.last_name,
            self.age,
            FiscalData {
                tax_id: self.tax_id,
                annual_income: self.annual_income,
            },
        )
        .with_sport_interests(self.sport_interests);

        Enrolment {
            citizen,
            questionnaire: self.questionnaire,
            services: self.services,
            investments: self.investments,
            join: self.join.unwrap_or(true),
        }
    }
}

impl Validate for RosterConfig {
    fn validate(&self) -> Result<()> {
        validate_non_empty_string("startup.name", &self.startup.name)?;

        if let Some(policy) = &self.policy {
            policy.validate()?;
        }

        for (i, incentive) in self.incentives.iter().enumerate() {
            validate_non_empty_string(&format!("incentives[{}].code", i), &incentive.code)?;
            validate_non_empty_string(&format!("incentives[{}].name", i), &incentive.name)?;
            if let Some(value) = incentive.value {
                validate_non_negative(&format!("incentives[{}].value", i), value)?;
            }
            incentive.to_incentive()?;
        }

        for (i, citizen) in self.citizens.iter().enumerate() {
            validate_non_empty_string(&format!("citizens[{}].first_name", i), &citizen.first_name)?;
            validate_non_empty_string(&format!("citizens[{}].tax_id", i), &citizen.tax_id)?;
            validate_non_negative(
                &format!("citizens[{}].annual_income", i),
                citizen.annual_income,
            )?;
            if let Some(fiscal) = &citizen.questionnaire {
                validate_non_empty_string(
                    &format!("citizens[{}].questionnaire.tax_id", i),
                    &fiscal.tax_id,
                )?;
                validate_non_negative(
                    &format!("citizens[{}].questionnaire.annual_income", i),
                    fiscal.annual_income,
                )?;
            }
        }

        Ok(())
    }
}
