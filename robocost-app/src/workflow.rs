use crate::config::ScenarioBook;
use crate::ledger::CalculationLedger;
use crate::plotting;
use crate::report;
use anyhow::Result;
use robocost_core::{
    cost_model::cumulative_costs,
    diagnostic::{estimate_checked, validate_diagnostic_form},
    error::ValidationErrors,
    roi::{calculate_roi, validate_roi_form},
};
use robocost_schemas::{
    diagnostic::DiagnosticResult,
    file_formats::Scenario,
    roi::{RoiInputs, RoiResult},
};
use serde::Serialize;
use std::path::PathBuf;
use tracing::{info, warn};

pub struct RunOptions {
    pub output_dir: PathBuf,
    pub json: bool,
    pub plots: bool,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    pub calculated: usize,
    pub rejected: usize,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct JsonOutcome<'a, T: Serialize> {
    scenario_id: &'a str,
    status: &'static str,
    result: Option<&'a T>,
    errors: &'a [(String, String)],
}

/// Runs every ROI scenario of the book, printing a report per scenario and
/// recording each outcome in the ledger.
pub fn run_roi_scenarios(book: &ScenarioBook, options: &RunOptions) -> Result<RunSummary> {
    println!("\n--- [Workflow] Running ROI scenarios ---");
    let mut ledger = CalculationLedger::new(&options.output_dir.join("ledger.csv"))?;
    let mut summary = RunSummary::default();

    for scenario in book.scenarios.values() {
        match evaluate_roi(scenario) {
            Ok((inputs, result)) => {
                summary.calculated += 1;
                let series = cumulative_costs(&inputs);
                if options.json {
                    print_json(&scenario.scenario_id, Some(&result), &[])?;
                } else {
                    report::print_roi_report(&scenario.name, &inputs, &result, &series);
                }
                if options.plots {
                    plotting::plot_cumulative_costs(
                        &options.output_dir,
                        &scenario.scenario_id,
                        &scenario.name,
                        &series,
                    )?;
                }
                ledger.record_success("roi", &scenario.scenario_id, result.net_savings, &result)?;
            }
            Err(err) => {
                summary.rejected += 1;
                reject(&mut ledger, "roi", scenario, err, options.json)?;
            }
        }
    }

    info!(calculated = summary.calculated, rejected = summary.rejected, "roi run finished");
    Ok(summary)
}

/// Runs every diagnostic scenario of the book.
pub fn run_diagnostic_scenarios(book: &ScenarioBook, options: &RunOptions) -> Result<RunSummary> {
    println!("\n--- [Workflow] Running diagnostic scenarios ---");
    let mut ledger = CalculationLedger::new(&options.output_dir.join("ledger.csv"))?;
    let mut summary = RunSummary::default();

    for scenario in book.scenarios.values() {
        match evaluate_diagnostic(scenario) {
            Ok(result) => {
                summary.calculated += 1;
                if options.json {
                    print_json(&scenario.scenario_id, Some(&result), &[])?;
                } else {
                    report::print_diagnostic_report(&scenario.name, &result);
                }
                ledger.record_success(
                    "diagnostic",
                    &scenario.scenario_id,
                    result.estimated_annual_cost,
                    &result,
                )?;
            }
            Err(err) => {
                summary.rejected += 1;
                reject(&mut ledger, "diagnostic", scenario, err, options.json)?;
            }
        }
    }

    info!(calculated = summary.calculated, rejected = summary.rejected, "diagnostic run finished");
    Ok(summary)
}

fn evaluate_roi(scenario: &Scenario) -> Result<(RoiInputs, RoiResult), ValidationErrors> {
    let inputs = validate_roi_form(&scenario.fields)?;
    let result = calculate_roi(&inputs)?;
    Ok((inputs, result))
}

fn evaluate_diagnostic(scenario: &Scenario) -> Result<DiagnosticResult, ValidationErrors> {
    let answers = validate_diagnostic_form(&scenario.fields)?;
    estimate_checked(&answers)
}

fn reject(
    ledger: &mut CalculationLedger,
    calculator: &str,
    scenario: &Scenario,
    errors: ValidationErrors,
    json: bool,
) -> Result<()> {
    let errors = errors.messages();
    warn!(scenario = %scenario.scenario_id, count = errors.len(), "scenario rejected");

    if json {
        print_json::<RoiResult>(&scenario.scenario_id, None, &errors)?;
    } else {
        report::print_field_errors(&scenario.name, &errors);
    }
    ledger.record_rejection(calculator, &scenario.scenario_id, &errors)
}

fn print_json<T: Serialize>(
    scenario_id: &str,
    result: Option<&T>,
    errors: &[(String, String)],
) -> Result<()> {
    let outcome = JsonOutcome {
        scenario_id,
        status: if result.is_some() { "ok" } else { "invalid" },
        result,
        errors,
    };
    println!("{}", serde_json::to_string_pretty(&outcome)?);
    Ok(())
}
