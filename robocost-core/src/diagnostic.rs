//! The diagnostic cost-estimator behind the maintenance quiz.
//!
//! Adjustments are applied in a fixed order and each one produces a breakdown
//! line and an explanation line, so the same answers always give the same text.

use crate::{
    currency::{format_decimal, format_eur, round_half_up},
    error::{FieldError, FieldErrorKind, ValidationErrors},
    validation::{check_positive, split_accessories, FormReader, DIAGNOSTIC_FIELDS},
};
use robocost_schemas::{
    diagnostic::{DiagnosticAnswers, DiagnosticResult, TerrainType, UsageFrequency},
    form::FormValues,
};
use tracing::debug;

/// Yearly maintenance cost per m² of lawn, in euros.
pub const BASE_COST_PER_M2: f64 = 0.10;
pub const TECHNICAL_ISSUES_SURCHARGE: f64 = 100.0;
pub const REGULAR_MAINTENANCE_FACTOR: f64 = 0.9;
pub const ACCESSORY_COST: f64 = 20.0;

pub fn usage_multiplier(frequency: UsageFrequency) -> f64 {
    match frequency {
        UsageFrequency::Daily => 1.2,
        UsageFrequency::Weekly => 1.0,
        UsageFrequency::Monthly => 0.8,
    }
}

pub fn terrain_surcharge(terrain: TerrainType) -> f64 {
    match terrain {
        TerrainType::Flat => 0.0,
        TerrainType::Rough => 50.0,
        TerrainType::Sloped => 30.0,
    }
}

/// Accumulates the running total alongside its two text columns.
struct Estimate {
    total: f64,
    breakdown: Vec<String>,
    explanations: Vec<String>,
}

impl Estimate {
    fn step(&mut self, name: &str, breakdown: String, explanation: String) {
        debug!(step = name, running_total = self.total, "diagnostic adjustment");
        self.breakdown.push(breakdown);
        self.explanations.push(explanation);
    }

    fn running(&self) -> String {
        format_eur(round_half_up(self.total, 2))
    }
}

/// Estimates the yearly maintenance cost of a robot from the quiz answers.
pub fn estimate(answers: &DiagnosticAnswers) -> DiagnosticResult {
    let area = format_decimal(answers.lawn_area_m2, 2);
    let mut est = Estimate {
        total: answers.lawn_area_m2 * BASE_COST_PER_M2,
        breakdown: Vec::with_capacity(6),
        explanations: Vec::with_capacity(6),
    };

    let line = format!(
        "Coût de base : {} m² × {} = {}",
        area,
        format_eur(BASE_COST_PER_M2),
        est.running()
    );
    let why = format!(
        "L'entretien annuel est estimé à {} par m² ; votre pelouse de {} m² sert de base au calcul.",
        format_eur(BASE_COST_PER_M2),
        area
    );
    est.step("base", line, why);

    let frequency = answers.usage_frequency;
    let multiplier = usage_multiplier(frequency);
    est.total *= multiplier;
    let line = match frequency {
        UsageFrequency::Weekly => format!(
            "Fréquence d'utilisation ({}) : aucun ajustement = {}",
            frequency,
            est.running()
        ),
        _ => format!(
            "Fréquence d'utilisation ({}) : × {} = {}",
            frequency,
            format_decimal(multiplier, 2),
            est.running()
        ),
    };
    let why = match frequency {
        UsageFrequency::Daily => {
            "Une utilisation quotidienne use davantage les lames et la batterie (+20 %).".to_string()
        }
        UsageFrequency::Weekly => {
            "Une utilisation hebdomadaire correspond à notre référence, sans ajustement.".to_string()
        }
        UsageFrequency::Monthly => {
            "Une utilisation mensuelle sollicite moins le robot (-20 %).".to_string()
        }
    };
    est.step("usage", line, why);

    let terrain = answers.terrain_type;
    let surcharge = terrain_surcharge(terrain);
    est.total += surcharge;
    let line = match terrain {
        TerrainType::Flat => format!(
            "Type de terrain ({}) : aucun supplément = {}",
            terrain,
            est.running()
        ),
        _ => format!(
            "Type de terrain ({}) : + {} = {}",
            terrain,
            format_eur(surcharge),
            est.running()
        ),
    };
    let why = match terrain {
        TerrainType::Flat => "Un terrain plat n'entraîne aucune usure supplémentaire.".to_string(),
        TerrainType::Rough => format!(
            "Un terrain accidenté fatigue les roues et la transmission (+{}).",
            format_eur(surcharge)
        ),
        TerrainType::Sloped => format!(
            "Un terrain en pente sollicite davantage les moteurs (+{}).",
            format_eur(surcharge)
        ),
    };
    est.step("terrain", line, why);

    let machine = format!("{} {}", answers.brand, answers.model);
    let (line, why) = if answers.had_technical_issues {
        est.total += TECHNICAL_ISSUES_SURCHARGE;
        (
            format!(
                "Problèmes techniques : + {} = {}",
                format_eur(TECHNICAL_ISSUES_SURCHARGE),
                est.running()
            ),
            format!(
                "Les problèmes déjà rencontrés sur votre {} laissent prévoir des interventions (+{}).",
                machine,
                format_eur(TECHNICAL_ISSUES_SURCHARGE)
            ),
        )
    } else {
        (
            format!("Aucun problème technique : + {} = {}", format_eur(0.0), est.running()),
            format!("Aucun problème technique signalé sur votre {}.", machine),
        )
    };
    est.step("technical_issues", line, why);

    // Applied after every flat surcharge so the discount covers them too.
    let (line, why) = if answers.had_regular_maintenance {
        est.total *= REGULAR_MAINTENANCE_FACTOR;
        (
            format!("Entretien régulier : remise de 10 % = {}", est.running()),
            "Un entretien régulier prolonge la durée de vie du robot : 10 % de remise sur l'estimation."
                .to_string(),
        )
    } else {
        (
            format!("Pas d'entretien régulier : aucune remise = {}", est.running()),
            "Sans entretien régulier, aucune remise n'est appliquée.".to_string(),
        )
    };
    est.step("maintenance", line, why);

    let count = answers.accessories.len();
    let accessories_cost = count as f64 * ACCESSORY_COST;
    est.total += accessories_cost;
    let (line, why) = if count > 0 {
        (
            format!(
                "Accessoires ({}) : {} × {} = + {} → {}",
                answers.accessories.join(", "),
                count,
                format_eur(ACCESSORY_COST),
                format_eur(accessories_cost),
                est.running()
            ),
            format!(
                "Chaque accessoire ({} au total) ajoute {} d'entretien annuel.",
                count,
                format_eur(ACCESSORY_COST)
            ),
        )
    } else {
        (
            format!("Aucun accessoire : + {} = {}", format_eur(0.0), est.running()),
            "Aucun accessoire à entretenir.".to_string(),
        )
    };
    est.step("accessories", line, why);

    let estimated_annual_cost = round_half_up(est.total, 2);
    debug!(estimated_annual_cost, "diagnostic estimate complete");

    DiagnosticResult {
        estimated_annual_cost,
        breakdown_lines: est.breakdown,
        explanation_lines: est.explanations,
    }
}

/// Typed entry point; rejects answers the quiz itself would not accept.
pub fn estimate_checked(answers: &DiagnosticAnswers) -> Result<DiagnosticResult, ValidationErrors> {
    let mut errors = ValidationErrors::new();
    for (field, text) in [
        (DIAGNOSTIC_FIELDS[0], &answers.brand),
        (DIAGNOSTIC_FIELDS[1], &answers.model),
    ] {
        if text.trim().is_empty() {
            errors.push(FieldError::new(field, FieldErrorKind::Missing));
        }
    }
    if let Err(kind) = check_positive(answers.lawn_area_m2) {
        errors.push(FieldError::new(DIAGNOSTIC_FIELDS[2], kind));
    }
    errors.into_result(|| estimate(answers))
}

/// Raw form entry point. `accessories` holds the ticked boxes and
/// `otherAccessories` the free text, which is split on commas.
pub fn estimate_from_form(form: &FormValues) -> Result<DiagnosticResult, ValidationErrors> {
    let answers = validate_diagnostic_form(form)?;
    Ok(estimate(&answers))
}

pub fn validate_diagnostic_form(form: &FormValues) -> Result<DiagnosticAnswers, ValidationErrors> {
    let mut reader = FormReader::new(form);

    let brand = reader.text(DIAGNOSTIC_FIELDS[0]);
    let model = reader.text(DIAGNOSTIC_FIELDS[1]);
    let area = reader.positive(DIAGNOSTIC_FIELDS[2]);
    let usage = reader.choice(DIAGNOSTIC_FIELDS[3], UsageFrequency::from_label);
    let terrain = reader.choice(DIAGNOSTIC_FIELDS[4], TerrainType::from_label);
    let issues = reader.flag(DIAGNOSTIC_FIELDS[5]);
    let maintenance = reader.flag(DIAGNOSTIC_FIELDS[6]);
    let ticked = reader.optional_list(DIAGNOSTIC_FIELDS[7]);
    let other = reader.optional_text(DIAGNOSTIC_FIELDS[8]);

    match (brand, model, area, usage, terrain, issues, maintenance, ticked, other) {
        (
            Some(brand),
            Some(model),
            Some(lawn_area_m2),
            Some(usage_frequency),
            Some(terrain_type),
            Some(had_technical_issues),
            Some(had_regular_maintenance),
            Some(mut accessories),
            Some(other),
        ) => {
            accessories.extend(split_accessories(&other));
            reader.finish(|| DiagnosticAnswers {
                brand,
                model,
                lawn_area_m2,
                usage_frequency,
                terrain_type,
                had_technical_issues,
                had_regular_maintenance,
                accessories,
            })
        }
        _ => Err(reader.into_errors()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use robocost_schemas::form::FieldValue;

    fn answers() -> DiagnosticAnswers {
        DiagnosticAnswers {
            brand: "Husqvarna".into(),
            model: "Automower 305".into(),
            lawn_area_m2: 500.0,
            usage_frequency: UsageFrequency::Monthly,
            terrain_type: TerrainType::Flat,
            had_technical_issues: false,
            had_regular_maintenance: true,
            accessories: vec![],
        }
    }

    #[test]
    fn small_maintained_lawn() {
        let result = estimate(&answers());
        assert_eq!(result.estimated_annual_cost, 36.0);
        assert_eq!(result.breakdown_lines.len(), 6);
        assert_eq!(result.explanation_lines.len(), 6);
        assert_eq!(
            result.breakdown_lines[0],
            "Coût de base : 500 m² × 0,10\u{a0}€ = 50,00\u{a0}€"
        );
        assert_eq!(
            result.breakdown_lines[1],
            "Fréquence d'utilisation (Mensuelle) : × 0,8 = 40,00\u{a0}€"
        );
        assert_eq!(
            result.breakdown_lines[4],
            "Entretien régulier : remise de 10 % = 36,00\u{a0}€"
        );
        assert_eq!(
            result.breakdown_lines[5],
            "Aucun accessoire : + 0,00\u{a0}€ = 36,00\u{a0}€"
        );
        assert_eq!(result.explanation_lines[5], "Aucun accessoire à entretenir.");
    }

    #[test]
    fn large_rough_lawn_with_issues_and_accessories() {
        let result = estimate(&DiagnosticAnswers {
            lawn_area_m2: 1000.0,
            usage_frequency: UsageFrequency::Daily,
            terrain_type: TerrainType::Rough,
            had_technical_issues: true,
            had_regular_maintenance: false,
            accessories: vec!["Module GPS".into(), "Capteur de pluie".into()],
            ..answers()
        });
        assert_eq!(result.estimated_annual_cost, 310.0);
        assert_eq!(
            result.breakdown_lines[2],
            "Type de terrain (Accidenté) : + 50,00\u{a0}€ = 170,00\u{a0}€"
        );
        assert_eq!(
            result.breakdown_lines[3],
            "Problèmes techniques : + 100,00\u{a0}€ = 270,00\u{a0}€"
        );
        assert!(result.breakdown_lines[5].starts_with("Accessoires (Module GPS, Capteur de pluie) : 2 ×"));
        assert!(result.breakdown_lines[5].ends_with("310,00\u{a0}€"));
        assert!(result.explanation_lines[3].contains("Husqvarna Automower 305"));
    }

    #[test]
    fn maintenance_discount_also_reduces_terrain_surcharge() {
        let result = estimate(&DiagnosticAnswers {
            usage_frequency: UsageFrequency::Weekly,
            terrain_type: TerrainType::Sloped,
            ..answers()
        });
        // (50 + 30) * 0.9
        assert_eq!(result.estimated_annual_cost, 72.0);
        assert_eq!(
            result.breakdown_lines[1],
            "Fréquence d'utilisation (Hebdomadaire) : aucun ajustement = 50,00\u{a0}€"
        );
    }

    #[test]
    fn accessories_are_not_discounted() {
        let result = estimate(&DiagnosticAnswers {
            accessories: vec!["Garage".into()],
            ..answers()
        });
        assert_eq!(result.estimated_annual_cost, 56.0);
    }

    #[test]
    fn result_is_rounded_to_cents() {
        let result = estimate(&DiagnosticAnswers {
            lawn_area_m2: 123.456,
            usage_frequency: UsageFrequency::Weekly,
            had_regular_maintenance: false,
            ..answers()
        });
        assert_eq!(result.estimated_annual_cost, 12.35);
    }

    #[test]
    fn form_entry_point_merges_free_text_accessories() {
        let form: FormValues = [
            ("brand", FieldValue::from("Worx")),
            ("model", FieldValue::from("Landroid")),
            ("lawnAreaM2", FieldValue::from("1000")),
            ("usageFrequency", FieldValue::from("Quotidienne")),
            ("terrainType", FieldValue::from("Accidenté")),
            ("hadTechnicalIssues", FieldValue::from("Oui")),
            ("hadRegularMaintenance", FieldValue::from("Non")),
            ("accessories", FieldValue::List(vec!["Module GPS".into()])),
            ("otherAccessories", FieldValue::from("Capteur de pluie,")),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v))
        .collect();

        let answers = validate_diagnostic_form(&form).unwrap();
        assert_eq!(answers.accessories, vec!["Module GPS", "Capteur de pluie", ""]);
        // The trailing comma is priced as a third accessory.
        assert_eq!(estimate(&answers).estimated_annual_cost, 330.0);
    }

    #[test]
    fn form_entry_point_reports_every_bad_answer() {
        let form: FormValues = [
            ("brand", FieldValue::from("")),
            ("model", FieldValue::from("X")),
            ("lawnAreaM2", FieldValue::from("-5")),
            ("usageFrequency", FieldValue::from("Annuelle")),
            ("terrainType", FieldValue::from("Plat")),
            ("hadTechnicalIssues", FieldValue::from(false)),
            ("hadRegularMaintenance", FieldValue::from(true)),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v))
        .collect();

        let errors = estimate_from_form(&form).unwrap_err();
        let kinds: Vec<_> = errors.iter().map(|e| (e.field.as_str(), e.kind)).collect();
        assert_eq!(
            kinds,
            vec![
                ("brand", FieldErrorKind::Missing),
                ("lawnAreaM2", FieldErrorKind::NotPositive),
                ("usageFrequency", FieldErrorKind::UnknownOption),
            ]
        );
    }

    #[test]
    fn checked_entry_point_rejects_zero_area() {
        let errors = estimate_checked(&DiagnosticAnswers {
            lawn_area_m2: 0.0,
            ..answers()
        })
        .unwrap_err();
        assert_eq!(errors.get("lawnAreaM2").unwrap().kind, FieldErrorKind::NotPositive);
    }
}
