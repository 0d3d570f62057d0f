pub mod citizen;
pub mod incentive;
pub mod policy;
pub mod programme;
pub mod report;
pub mod startup;

pub use crate::domain::model::{
    EligibilityRecord, FiscalData, InvestmentRequest, Participant, Sector, ServiceKind,
    ValidityWindow,
};
pub use crate::domain::ports::{Investor, Registrable, Storage};
pub use crate::utils::error::Result;
pub use citizen::Citizen;
pub use incentive::{Incentive, IncentiveBuilder};
pub use policy::BonusPolicy;
pub use programme::{Enrolment, Programme};
pub use report::{CitizenSummary, InvestmentEntry, InvestmentOutcome, ProgrammeReport};
pub use startup::Startup;
