use crate::core::{Citizen, Incentive};
use crate::utils::error::Result;

/// Something incentives and citizens can be registered with.
pub trait Registrable {
    fn name(&self) -> &str;
    fn receive_incentive(&mut self, incentive: &Incentive) -> bool;
    fn register_participant(&mut self, citizen: &Citizen) -> bool;
}

/// Something that holds savings and can draw them down.
pub trait Investor {
    fn tax_id(&self) -> &str;
    fn display_name(&self) -> String;
    fn savings(&self) -> f64;
    fn invest_savings(&mut self, association: &str, amount: f64) -> bool;
}

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}
