pub mod describer;
pub mod report;
pub mod traversal;

#[cfg(test)]
pub(crate) mod testing;

pub use crate::domain::model::{Package, Plan, Service};
pub use crate::domain::ports::CatalogApi;
pub use crate::utils::error::Result;
pub use describer::{build_description, DescriptionUpdater, PlanOutcome};
pub use report::RunReport;
pub use traversal::{TraversalDriver, TraversalMode};
