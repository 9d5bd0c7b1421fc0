use crate::cashflow::model::{model_solar_project, SolarProjectOutput};
use crate::project::location::LocationCatalog;
use crate::project::parameters::{ProjectInputs, ProjectParameters};
use crate::types::ComputationOutput;
use crate::SolarModelResult;

/// Caller-owned state for an interactive front end.
///
/// Holds the location catalog, the parameters of the last accepted update
/// and the output they produced. The engine itself keeps nothing between
/// runs; a front end creates one session per user and passes it around.
#[derive(Debug, Clone, Default)]
pub struct ModelSession {
    catalog: LocationCatalog,
    current: Option<ProjectParameters>,
    last_output: Option<ComputationOutput<SolarProjectOutput>>,
}

impl ModelSession {
    pub fn new(catalog: LocationCatalog) -> Self {
        ModelSession {
            catalog,
            current: None,
            last_output: None,
        }
    }

    pub fn catalog(&self) -> &LocationCatalog {
        &self.catalog
    }

    pub fn current_parameters(&self) -> Option<&ProjectParameters> {
        self.current.as_ref()
    }

    pub fn last_output(&self) -> Option<&ComputationOutput<SolarProjectOutput>> {
        self.last_output.as_ref()
    }

    /// Validate `inputs`, recompute from scratch and store the result.
    ///
    /// On any error the previous parameters and output are left untouched.
    pub fn update(
        &mut self,
        inputs: &ProjectInputs,
    ) -> SolarModelResult<&ComputationOutput<SolarProjectOutput>> {
        let params = ProjectParameters::resolve(inputs, &self.catalog)?;
        let output = model_solar_project(&params)?;

        tracing::debug!(location = %params.location().name, "session updated");
        self.current = Some(params);
        Ok(self.last_output.insert(output))
    }

    /// [`update`](Self::update) from a loosely-typed dictionary.
    pub fn update_from_value(
        &mut self,
        value: serde_json::Value,
    ) -> SolarModelResult<&ComputationOutput<SolarProjectOutput>> {
        let inputs = ProjectInputs::from_value(value)?;
        self.update(&inputs)
    }

    /// Forget the current parameters and output.
    pub fn clear(&mut self) {
        self.current = None;
        self.last_output = None;
    }
}
