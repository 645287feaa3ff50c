pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use config::{cli::LocalStorage, DirectoryConfig};
pub use core::{etl::EtlEngine, pipeline::DirectoryPipeline};
pub use domain::model::{DirectoryDocument, DirectoryPlan, PhysicianRecord, RunSummary, SectionMode};
pub use utils::error::{DirectoryError, Result};
