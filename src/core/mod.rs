pub mod etl;
pub mod grouping;
pub mod layout;
pub mod pipeline;
pub mod render;

pub use crate::domain::model::{DirectoryDocument, DirectoryPlan, PhysicianRecord};
pub use crate::domain::ports::{Pipeline, Storage};
pub use crate::utils::error::Result;
