use robocost_core::{cost_model::break_even_year, currency::format_eur, roi::outcome};
use robocost_schemas::{
    diagnostic::DiagnosticResult,
    roi::{RoiInputs, RoiResult, YearlyCost},
};

pub fn print_roi_report(name: &str, inputs: &RoiInputs, result: &RoiResult, series: &[YearlyCost]) {
    let years = inputs.duration_years();

    println!("\n--- [ROI] {} ---", name);
    println!("========================================");
    println!(
        "  - Entretien traditionnel (par an):  {:>16}",
        format_eur(result.annual_traditional_cost)
    );
    println!(
        "  - Entretien traditionnel ({} ans):   {:>16}",
        years,
        format_eur(result.annual_traditional_cost * f64::from(years))
    );
    println!(
        "  - Robot tondeuse ({} ans):           {:>16}",
        years,
        format_eur(result.total_robot_cost)
    );
    println!("  --------------------------------------");
    println!("  - Économies nettes:                 {:>16}", format_eur(result.net_savings));

    match break_even_year(series) {
        Some(year) => println!("  - Rentabilisé dès l'année {}", year),
        None => println!("  - Non rentabilisé sur {} ans", years),
    }

    println!("\n{}", outcome(result).headline(years));
    println!("========================================");
}

pub fn print_diagnostic_report(name: &str, result: &DiagnosticResult) {
    println!("\n--- [Diagnostic] {} ---", name);
    println!("========================================");
    println!("Détail du calcul:");
    for (line, why) in result.breakdown_lines.iter().zip(&result.explanation_lines) {
        println!("  - {}", line);
        println!("      {}", why);
    }
    println!("  --------------------------------------");
    println!(
        "  - Coût d'entretien annuel estimé: {}",
        format_eur(result.estimated_annual_cost)
    );
    println!("========================================");
}

/// Prints rejected fields in declaration order; the first one is the field a
/// form would focus.
pub fn print_field_errors(name: &str, errors: &[(String, String)]) {
    println!("\n--- [Invalid] {} ---", name);
    for (field, message) in errors {
        println!("  - {:<24} {}", field, message);
    }
}
