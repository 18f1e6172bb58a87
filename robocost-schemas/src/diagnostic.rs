use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UsageFrequency {
    #[serde(alias = "Quotidienne", alias = "Quotidien")]
    Daily,
    #[serde(alias = "Hebdomadaire")]
    Weekly,
    #[serde(alias = "Mensuelle", alias = "Mensuel")]
    Monthly,
}

impl UsageFrequency {
    pub const ALL: [UsageFrequency; 3] = [Self::Daily, Self::Weekly, Self::Monthly];

    /// Label shown to customers.
    pub fn label(self) -> &'static str {
        match self {
            Self::Daily => "Quotidienne",
            Self::Weekly => "Hebdomadaire",
            Self::Monthly => "Mensuelle",
        }
    }

    /// Accepts the customer-facing label or the English variant name, ignoring case.
    pub fn from_label(input: &str) -> Option<Self> {
        let needle = input.trim();
        Self::ALL.into_iter().find(|freq| {
            needle.eq_ignore_ascii_case(freq.label())
                || needle.eq_ignore_ascii_case(&format!("{:?}", freq))
                || (*freq == Self::Daily && needle.eq_ignore_ascii_case("Quotidien"))
                || (*freq == Self::Monthly && needle.eq_ignore_ascii_case("Mensuel"))
        })
    }
}

impl fmt::Display for UsageFrequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TerrainType {
    #[serde(alias = "Plat")]
    Flat,
    #[serde(alias = "Accidenté")]
    Rough,
    #[serde(alias = "En pente", alias = "Pentu")]
    Sloped,
}

impl TerrainType {
    pub const ALL: [TerrainType; 3] = [Self::Flat, Self::Rough, Self::Sloped];

    pub fn label(self) -> &'static str {
        match self {
            Self::Flat => "Plat",
            Self::Rough => "Accidenté",
            Self::Sloped => "En pente",
        }
    }

    pub fn from_label(input: &str) -> Option<Self> {
        let needle = input.trim();
        Self::ALL.into_iter().find(|terrain| {
            needle.eq_ignore_ascii_case(terrain.label())
                || needle.eq_ignore_ascii_case(&format!("{:?}", terrain))
                || (*terrain == Self::Rough && needle.eq_ignore_ascii_case("Accidente"))
                || (*terrain == Self::Sloped && needle.eq_ignore_ascii_case("Pentu"))
        })
    }
}

impl fmt::Display for TerrainType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// The answers collected by the diagnostic quiz.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiagnosticAnswers {
    pub brand: String,
    pub model: String,
    pub lawn_area_m2: f64,
    pub usage_frequency: UsageFrequency,
    pub terrain_type: TerrainType,
    pub had_technical_issues: bool,
    pub had_regular_maintenance: bool,
    /// Kept in the order the customer listed them; duplicates and empty
    /// entries are priced like any other accessory.
    #[serde(default)]
    pub accessories: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiagnosticResult {
    pub estimated_annual_cost: f64,
    pub breakdown_lines: Vec<String>,
    pub explanation_lines: Vec<String>,
}
