use proptest::prelude::*;
use robocost_core::{
    cost_model::{robot_total_cost, traditional_annual_cost},
    diagnostic::estimate,
    roi::calculate_roi,
};
use robocost_schemas::{
    diagnostic::{DiagnosticAnswers, TerrainType, UsageFrequency},
    roi::{RobotCostInputs, RoiInputs, TraditionalCostInputs},
};

fn money() -> impl Strategy<Value = f64> {
    0.0..10_000.0f64
}

prop_compose! {
    fn traditional_inputs()(
        fuel in money(),
        manual in money(),
        gardening in money(),
        mows in 1u32..200,
    ) -> TraditionalCostInputs {
        TraditionalCostInputs {
            fuel_cost_per_season: fuel,
            manual_mower_cost: manual,
            gardening_service_cost: gardening,
            mows_per_season: mows,
        }
    }
}

prop_compose! {
    fn robot_inputs()(
        purchase in money(),
        maintenance in money(),
        mows in 1u32..200,
        years in 1u32..30,
        area in 1.0..20_000.0f64,
    ) -> RobotCostInputs {
        RobotCostInputs {
            purchase_price: purchase,
            annual_maintenance_cost: maintenance,
            robot_mows_per_season: mows,
            duration_years: years,
            lawn_area_m2: area,
        }
    }
}

prop_compose! {
    fn diagnostic_answers()(
        area in 1.0..5_000.0f64,
        usage in prop::sample::select(UsageFrequency::ALL.to_vec()),
        terrain in prop::sample::select(TerrainType::ALL.to_vec()),
        issues in any::<bool>(),
        maintenance in any::<bool>(),
        accessories in prop::collection::vec("[a-zA-Z ]{0,12}", 0..5),
    ) -> DiagnosticAnswers {
        DiagnosticAnswers {
            brand: "Marque".into(),
            model: "Modèle".into(),
            lawn_area_m2: area,
            usage_frequency: usage,
            terrain_type: terrain,
            had_technical_issues: issues,
            had_regular_maintenance: maintenance,
            accessories,
        }
    }
}

proptest! {
    #[test]
    fn traditional_cost_is_never_negative(inputs in traditional_inputs()) {
        prop_assert!(traditional_annual_cost(&inputs) >= 0.0);
    }

    #[test]
    fn traditional_cost_is_linear_in_each_item(inputs in traditional_inputs(), extra in money()) {
        let base = traditional_annual_cost(&inputs);
        let expected = extra * f64::from(inputs.mows_per_season);
        let tolerance = 1e-9 * (base + expected).max(1.0);

        for bump in 0..3 {
            let mut bumped = inputs.clone();
            match bump {
                0 => bumped.fuel_cost_per_season += extra,
                1 => bumped.manual_mower_cost += extra,
                _ => bumped.gardening_service_cost += extra,
            }
            let delta = traditional_annual_cost(&bumped) - base;
            prop_assert!((delta - expected).abs() <= tolerance);
        }
    }

    #[test]
    fn robot_cost_grows_with_duration(inputs in robot_inputs()) {
        let mut longer = inputs.clone();
        longer.duration_years += 1;
        prop_assert!(robot_total_cost(&longer) >= robot_total_cost(&inputs));
    }

    #[test]
    fn cost_models_are_deterministic(t in traditional_inputs(), r in robot_inputs()) {
        prop_assert_eq!(traditional_annual_cost(&t).to_bits(), traditional_annual_cost(&t).to_bits());
        prop_assert_eq!(robot_total_cost(&r).to_bits(), robot_total_cost(&r).to_bits());
    }

    #[test]
    fn net_savings_matches_its_definition(t in traditional_inputs(), r in robot_inputs()) {
        let inputs = RoiInputs { traditional: t, robot: r };
        let result = calculate_roi(&inputs).unwrap();
        let expected = result.annual_traditional_cost * f64::from(inputs.robot.duration_years)
            - result.total_robot_cost;
        prop_assert_eq!(result.net_savings.to_bits(), expected.to_bits());
    }

    #[test]
    fn diagnostic_always_explains_six_steps(answers in diagnostic_answers()) {
        let result = estimate(&answers);
        prop_assert_eq!(result.breakdown_lines.len(), 6);
        prop_assert_eq!(result.explanation_lines.len(), 6);
        prop_assert!(result.estimated_annual_cost > 0.0);
        prop_assert_eq!(estimate(&answers), result);
    }

    #[test]
    fn maintenance_never_raises_the_estimate(answers in diagnostic_answers()) {
        let mut maintained = answers.clone();
        maintained.had_regular_maintenance = true;
        let mut neglected = answers;
        neglected.had_regular_maintenance = false;
        prop_assert!(estimate(&maintained).estimated_annual_cost <= estimate(&neglected).estimated_annual_cost);
    }
}
