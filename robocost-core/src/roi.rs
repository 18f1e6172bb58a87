//! The comparative ROI calculator: traditional lawn care against a robot,
//! over the robot's ownership period.

use crate::{
    cost_model::{robot_total_cost, traditional_annual_cost},
    currency::format_eur,
    error::{FieldError, FieldErrorKind, ValidationErrors},
    validation::{
        check_amount, check_at_least, check_count, FormReader, ROBOT_FIELDS, TRADITIONAL_FIELDS,
    },
};
use robocost_schemas::{
    form::FormValues,
    roi::{RobotCostInputs, RoiInputs, RoiResult, TraditionalCostInputs},
};
use tracing::debug;

/// Smallest lawn the robot form accepts, in m².
pub const MIN_LAWN_AREA_M2: f64 = 1.0;

/// Which way the comparison went. Zero counts as savings.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RoiOutcome {
    Savings(f64),
    Overspend(f64),
}

impl RoiOutcome {
    pub fn from_net_savings(net_savings: f64) -> Self {
        if net_savings >= 0.0 {
            RoiOutcome::Savings(net_savings)
        } else {
            RoiOutcome::Overspend(-net_savings)
        }
    }

    pub fn is_savings(self) -> bool {
        matches!(self, RoiOutcome::Savings(_))
    }

    /// The sentence shown under the calculator.
    pub fn headline(self, duration_years: u32) -> String {
        let period = if duration_years == 1 {
            "1 an".to_string()
        } else {
            format!("{} ans", duration_years)
        };
        match self {
            RoiOutcome::Savings(amount) => format!(
                "Vous économiserez {} sur {} en passant au robot tondeuse.",
                format_eur(amount),
                period
            ),
            RoiOutcome::Overspend(amount) => format!(
                "Le robot tondeuse vous coûtera {} de plus sur {}.",
                format_eur(amount),
                period
            ),
        }
    }
}

pub fn outcome(result: &RoiResult) -> RoiOutcome {
    RoiOutcome::from_net_savings(result.net_savings)
}

/// Typed entry point. The record is checked against the same constraints as
/// the form before anything is computed.
pub fn calculate_roi(inputs: &RoiInputs) -> Result<RoiResult, ValidationErrors> {
    check_roi_inputs(inputs)?;
    Ok(compute(inputs))
}

/// Raw form entry point: validates every field of both forms, then computes.
pub fn calculate_roi_from_form(form: &FormValues) -> Result<RoiResult, ValidationErrors> {
    let inputs = validate_roi_form(form)?;
    Ok(compute(&inputs))
}

pub fn validate_roi_form(form: &FormValues) -> Result<RoiInputs, ValidationErrors> {
    let mut reader = FormReader::new(form);

    let fuel = reader.amount(TRADITIONAL_FIELDS[0]);
    let manual_mower = reader.amount(TRADITIONAL_FIELDS[1]);
    let gardening = reader.amount(TRADITIONAL_FIELDS[2]);
    let mows = reader.count(TRADITIONAL_FIELDS[3]);

    let purchase = reader.amount(ROBOT_FIELDS[0]);
    let maintenance = reader.amount(ROBOT_FIELDS[1]);
    let robot_mows = reader.count(ROBOT_FIELDS[2]);
    let duration = reader.count(ROBOT_FIELDS[3]);
    let area = reader.at_least(ROBOT_FIELDS[4], MIN_LAWN_AREA_M2);

    match (
        fuel,
        manual_mower,
        gardening,
        mows,
        purchase,
        maintenance,
        robot_mows,
        duration,
        area,
    ) {
        (
            Some(fuel_cost_per_season),
            Some(manual_mower_cost),
            Some(gardening_service_cost),
            Some(mows_per_season),
            Some(purchase_price),
            Some(annual_maintenance_cost),
            Some(robot_mows_per_season),
            Some(duration_years),
            Some(lawn_area_m2),
        ) => reader.finish(|| RoiInputs {
            traditional: TraditionalCostInputs {
                fuel_cost_per_season,
                manual_mower_cost,
                gardening_service_cost,
                mows_per_season,
            },
            robot: RobotCostInputs {
                purchase_price,
                annual_maintenance_cost,
                robot_mows_per_season,
                duration_years,
                lawn_area_m2,
            },
        }),
        _ => Err(reader.into_errors()),
    }
}

fn check_roi_inputs(inputs: &RoiInputs) -> Result<(), ValidationErrors> {
    let t = &inputs.traditional;
    let r = &inputs.robot;
    let checks: [(&str, Result<(), FieldErrorKind>); 9] = [
        (TRADITIONAL_FIELDS[0], check_amount(t.fuel_cost_per_season).map(drop)),
        (TRADITIONAL_FIELDS[1], check_amount(t.manual_mower_cost).map(drop)),
        (TRADITIONAL_FIELDS[2], check_amount(t.gardening_service_cost).map(drop)),
        (TRADITIONAL_FIELDS[3], check_count(f64::from(t.mows_per_season)).map(drop)),
        (ROBOT_FIELDS[0], check_amount(r.purchase_price).map(drop)),
        (ROBOT_FIELDS[1], check_amount(r.annual_maintenance_cost).map(drop)),
        (ROBOT_FIELDS[2], check_count(f64::from(r.robot_mows_per_season)).map(drop)),
        (ROBOT_FIELDS[3], check_count(f64::from(r.duration_years)).map(drop)),
        (ROBOT_FIELDS[4], check_at_least(r.lawn_area_m2, MIN_LAWN_AREA_M2).map(drop)),
    ];

    let mut errors = ValidationErrors::new();
    for (field, check) in checks {
        if let Err(kind) = check {
            errors.push(FieldError::new(field, kind));
        }
    }
    errors.into_result(|| ())
}

fn compute(inputs: &RoiInputs) -> RoiResult {
    let annual_traditional_cost = traditional_annual_cost(&inputs.traditional);
    let total_robot_cost = robot_total_cost(&inputs.robot);
    let net_savings =
        annual_traditional_cost * f64::from(inputs.duration_years()) - total_robot_cost;
    debug!(
        annual_traditional_cost,
        total_robot_cost, net_savings, "roi calculated"
    );
    RoiResult {
        annual_traditional_cost,
        total_robot_cost,
        net_savings,
    }
}
