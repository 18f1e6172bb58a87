use anyhow::{Context, Result};
use csv::Writer;
use serde::Serialize;
use std::{fs, path::Path};

#[derive(Debug, Serialize)]
struct LedgerEntry<'a> {
    recorded_at: String,
    calculator: &'a str,
    scenario_id: &'a str,
    status: &'a str,
    amount_eur: Option<f64>,
    result_json: String,
    errors_json: String,
}

/// Appends one CSV row per calculation, flushed immediately so a crash
/// mid-run still leaves the earlier rows on disk.
pub struct CalculationLedger {
    writer: Writer<fs::File>,
}

impl CalculationLedger {
    pub fn new(path: &Path) -> Result<Self> {
        let writer = Writer::from_path(path)
            .with_context(|| format!("Failed to create ledger {:?}", path))?;
        Ok(Self { writer })
    }

    /// Records a successful calculation. `amount_eur` is the headline figure
    /// (net savings or estimated annual cost).
    pub fn record_success<T: Serialize>(
        &mut self,
        calculator: &str,
        scenario_id: &str,
        amount_eur: f64,
        result: &T,
    ) -> Result<()> {
        self.write(LedgerEntry {
            recorded_at: chrono::Utc::now().to_rfc3339(),
            calculator,
            scenario_id,
            status: "ok",
            amount_eur: Some(amount_eur),
            result_json: serde_json::to_string(result)?,
            errors_json: "[]".to_string(),
        })
    }

    /// Records a scenario that was rejected by validation.
    pub fn record_rejection(
        &mut self,
        calculator: &str,
        scenario_id: &str,
        errors: &[(String, String)],
    ) -> Result<()> {
        self.write(LedgerEntry {
            recorded_at: chrono::Utc::now().to_rfc3339(),
            calculator,
            scenario_id,
            status: "invalid",
            amount_eur: None,
            result_json: "null".to_string(),
            errors_json: serde_json::to_string(errors)?,
        })
    }

    fn write(&mut self, entry: LedgerEntry<'_>) -> Result<()> {
        self.writer.serialize(entry)?;
        self.writer.flush()?;
        Ok(())
    }
}
