use anyhow::{Context, Result};
use robocost_schemas::file_formats::{DiagnosticScenarioFile, RoiScenarioFile, Scenario};
use serde::Deserialize;
use std::{collections::BTreeMap, fs, path::Path};
use tracing::{debug, info};

/// Scenario file layouts this build understands.
pub const SUPPORTED_SCHEMA_VERSIONS: [&str; 1] = ["1.0"];

/// Every scenario found under a path, keyed by scenario id so runs are
/// reported in a stable order.
pub struct ScenarioBook {
    pub scenarios: BTreeMap<String, Scenario>,
}

impl ScenarioBook {
    pub fn load_roi(path: &Path) -> Result<Self> {
        Self::load(path, |file: RoiScenarioFile| (file.schema_version, file.roi_scenarios))
    }

    pub fn load_diagnostic(path: &Path) -> Result<Self> {
        Self::load(path, |file: DiagnosticScenarioFile| {
            (file.schema_version, file.diagnostic_scenarios)
        })
    }

    /// Loads a single YAML file, or every YAML file in a directory.
    fn load<F, E>(path: &Path, extract: E) -> Result<Self>
    where
        F: for<'de> Deserialize<'de>,
        E: Fn(F) -> (String, Vec<Scenario>),
    {
        info!(path = %path.display(), "loading scenarios");
        let scenarios = if path.is_dir() {
            load_yaml_files_into_map::<F, E>(path, &extract)?
        } else {
            let mut map = BTreeMap::new();
            insert_from_file::<F, E>(path, &extract, &mut map)?;
            map
        };
        info!(count = scenarios.len(), "scenarios loaded");
        Ok(Self { scenarios })
    }
}

/// Generic helper to load all YAML files in a directory into a map.
fn load_yaml_files_into_map<F, E>(dir_path: &Path, extract: &E) -> Result<BTreeMap<String, Scenario>>
where
    F: for<'de> Deserialize<'de>, // The file wrapper struct (e.g., RoiScenarioFile)
    E: Fn(F) -> (String, Vec<Scenario>),
{
    let mut map = BTreeMap::new();
    for entry in fs::read_dir(dir_path)
        .with_context(|| format!("Failed to read directory: {:?}", dir_path))?
    {
        let entry = entry?;
        let path = entry.path();
        if path.is_file() && path.extension().map_or(false, |s| s == "yaml" || s == "yml") {
            insert_from_file::<F, E>(&path, extract, &mut map)?;
        }
    }
    Ok(map)
}

fn insert_from_file<F, E>(path: &Path, extract: &E, map: &mut BTreeMap<String, Scenario>) -> Result<()>
where
    F: for<'de> Deserialize<'de>,
    E: Fn(F) -> (String, Vec<Scenario>),
{
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read scenario file {:?}", path))?;
    let file_wrapper: F = serde_yaml::from_str(&content)
        .with_context(|| format!("Failed to parse YAML from {:?}", path))?;

    let (schema_version, scenarios) = extract(file_wrapper);
    if !SUPPORTED_SCHEMA_VERSIONS.contains(&schema_version.as_str()) {
        anyhow::bail!(
            "Unsupported schema_version '{}' in {:?} (expected one of {:?})",
            schema_version,
            path,
            SUPPORTED_SCHEMA_VERSIONS
        );
    }

    for scenario in scenarios {
        debug!(id = %scenario.scenario_id, file = ?path, "scenario registered");
        if map.insert(scenario.scenario_id.clone(), scenario).is_some() {
            anyhow::bail!("Duplicate scenario id in {:?}", path);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use robocost_schemas::form::FieldValue;

    const ROI_YAML: &str = r#"
schema_version: "1.0"
roi_scenarios:
  - scenario_id: petit-jardin
    name: Petit jardin
    fields:
      fuelCostPerSeason: 50
      manualMowerCost: "100"
      gardeningServiceCost: 200
      mowsPerSeason: 30
      purchasePrice: 500
      annualMaintenanceCost: 50
      robotMowsPerSeason: 30
      durationYears: 5
      lawnAreaM2: ~
"#;

    #[test]
    fn loads_a_single_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("roi.yaml");
        fs::write(&path, ROI_YAML).unwrap();

        let book = ScenarioBook::load_roi(&path).unwrap();
        let scenario = &book.scenarios["petit-jardin"];
        assert_eq!(scenario.name, "Petit jardin");
        assert_eq!(scenario.fields["fuelCostPerSeason"], FieldValue::Number(50.0));
        assert_eq!(scenario.fields["manualMowerCost"], FieldValue::Text("100".into()));
        assert_eq!(scenario.fields["lawnAreaM2"], FieldValue::Null);
    }

    #[test]
    fn loads_every_yaml_file_in_a_directory() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("a.yaml"), ROI_YAML).unwrap();
        fs::write(
            dir.path().join("b.yml"),
            ROI_YAML.replace("petit-jardin", "grand-jardin"),
        )
        .unwrap();
        fs::write(dir.path().join("notes.txt"), "ignored").unwrap();

        let book = ScenarioBook::load_roi(dir.path()).unwrap();
        let ids: Vec<_> = book.scenarios.keys().cloned().collect();
        assert_eq!(ids, vec!["grand-jardin", "petit-jardin"]);
    }

    #[test]
    fn rejects_unknown_schema_versions() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("roi.yaml");
        fs::write(&path, ROI_YAML.replace("\"1.0\"", "\"2.0\"")).unwrap();
        assert!(ScenarioBook::load_roi(&path).is_err());
    }

    #[test]
    fn rejects_duplicate_ids() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("a.yaml"), ROI_YAML).unwrap();
        fs::write(dir.path().join("b.yaml"), ROI_YAML).unwrap();
        assert!(ScenarioBook::load_roi(dir.path()).is_err());
    }

    #[test]
    fn demo_scenarios_parse() {
        let demos = Path::new(env!("CARGO_MANIFEST_DIR")).join("../demos/scenarios");
        let roi = ScenarioBook::load_roi(&demos.join("roi.yaml")).unwrap();
        assert_eq!(roi.scenarios.len(), 3);
        let diagnostic = ScenarioBook::load_diagnostic(&demos.join("diagnostic.yaml")).unwrap();
        assert_eq!(
            diagnostic.scenarios["terrain-accidente"].fields["accessories"],
            FieldValue::List(vec!["Module GPS".into(), "Capteur de pluie".into()])
        );
    }
}
