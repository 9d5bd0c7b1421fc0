pub mod cashflow;
pub mod error;
pub mod project;
pub mod time_value;
pub mod types;

pub use cashflow::model::{model_solar_project, run_pipeline, SolarProjectOutput};
pub use error::SolarModelError;
pub use project::location::{LocationCatalog, LocationProfile};
pub use project::parameters::{ProjectInputs, ProjectParameters};
pub use project::session::ModelSession;
pub use types::*;

/// Standard result type for all solar cash-flow operations
pub type SolarModelResult<T> = Result<T, SolarModelError>;
