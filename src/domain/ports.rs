use crate::domain::model::{DirectoryPlan, PhysicianRecord};
use crate::utils::error::Result;

pub trait Storage {
    fn write_file(&self, path: &str, data: &[u8]) -> Result<String>;
}

pub trait Pipeline {
    fn extract(&self) -> Result<Vec<PhysicianRecord>>;
    fn transform(&self, records: Vec<PhysicianRecord>) -> Result<DirectoryPlan>;
    /// Returns the location of every written document.
    fn load(&self, plan: DirectoryPlan) -> Result<Vec<String>>;
}
