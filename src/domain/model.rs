use crate::utils::error::{IncentiveError, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;
use std::str::FromStr;

/// Sector an incentive applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sector {
    Sport,
    Culture,
    Environment,
    Energy,
    Health,
    Other,
}

impl Sector {
    pub fn as_str(&self) -> &'static str {
        match self {
            Sector::Sport => "sport",
            Sector::Culture => "culture",
            Sector::Environment => "environment",
            Sector::Energy => "energy",
            Sector::Health => "health",
            Sector::Other => "other",
        }
    }
}

impl fmt::Display for Sector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Sector {
    type Err = IncentiveError;

    // Italian names are accepted for rosters exported from the legacy platform.
    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "sport" => Ok(Sector::Sport),
            "culture" | "cultura" => Ok(Sector::Culture),
            "environment" | "ambiente" => Ok(Sector::Environment),
            "energy" | "energia" => Ok(Sector::Energy),
            "health" | "salute" => Ok(Sector::Health),
            "other" | "altro" => Ok(Sector::Other),
            _ => Err(IncentiveError::UnknownSector {
                sector: s.to_string(),
            }),
        }
    }
}

/// Additional service a citizen can ask the startup to handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ServiceKind {
    #[serde(rename = "ISEE")]
    Isee,
    #[serde(rename = "ANNUAL-TAX-FILING", alias = "730")]
    AnnualTaxFiling,
}

impl ServiceKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ServiceKind::Isee => "ISEE",
            ServiceKind::AnnualTaxFiling => "ANNUAL-TAX-FILING",
        }
    }
}

impl fmt::Display for ServiceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ServiceKind {
    type Err = IncentiveError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim() {
            "ISEE" => Ok(ServiceKind::Isee),
            "ANNUAL-TAX-FILING" | "730" => Ok(ServiceKind::AnnualTaxFiling),
            other => Err(IncentiveError::UnsupportedService {
                kind: other.to_string(),
            }),
        }
    }
}

/// Fiscal bonuses a citizen qualifies for.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EligibilityRecord {
    pub isee: bool,
    pub gas: bool,
    pub electric: bool,
    pub water: bool,
}

impl EligibilityRecord {
    pub fn eligible_count(&self) -> usize {
        [self.isee, self.gas, self.electric, self.water]
            .iter()
            .filter(|flag| **flag)
            .count()
    }

    pub fn is_none(&self) -> bool {
        self.eligible_count() == 0
    }
}

/// Data a citizen submits through the fiscal questionnaire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FiscalData {
    pub tax_id: String,
    pub annual_income: f64,
}

/// Inclusive date range during which an incentive is offered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ValidityWindow {
    start: NaiveDate,
    end: NaiveDate,
}

impl ValidityWindow {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self> {
        if start > end {
            return Err(IncentiveError::InvalidValidityWindow { start, end });
        }
        Ok(Self { start, end })
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }
}

/// A citizen as recorded in a startup's participant registry.
///
/// `tax_id` and `full_name` are captured at registration time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Participant {
    pub citizen_id: Uuid,
    pub tax_id: String,
    pub full_name: String,
}

/// A citizen's request to reinvest savings in an association.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvestmentRequest {
    pub association: String,
    pub amount: f64,
}
