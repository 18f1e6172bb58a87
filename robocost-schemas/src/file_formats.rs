use crate::form::FormValues;
use serde::Deserialize;

/// A named set of raw form values, as a customer would have typed them.
#[derive(Debug, Clone, Deserialize)]
pub struct Scenario {
    pub scenario_id: String,
    pub name: String,
    #[serde(default)]
    pub fields: FormValues,
}

#[derive(Debug, Deserialize)]
pub struct RoiScenarioFile {
    pub schema_version: String,
    pub roi_scenarios: Vec<Scenario>,
}

#[derive(Debug, Deserialize)]
pub struct DiagnosticScenarioFile {
    pub schema_version: String,
    pub diagnostic_scenarios: Vec<Scenario>,
}
