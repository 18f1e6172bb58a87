use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TraditionalCostInputs {
    pub fuel_cost_per_season: f64,
    pub manual_mower_cost: f64,
    pub gardening_service_cost: f64,
    pub mows_per_season: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RobotCostInputs {
    pub purchase_price: f64,
    pub annual_maintenance_cost: f64,
    pub robot_mows_per_season: u32,
    pub duration_years: u32,
    /// Collected by the form but not part of the cost formula.
    pub lawn_area_m2: f64,
}

/// Both sides of the comparison. The duration lives on the robot inputs and is
/// shared by the whole comparison.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoiInputs {
    pub traditional: TraditionalCostInputs,
    pub robot: RobotCostInputs,
}

impl RoiInputs {
    pub fn duration_years(&self) -> u32 {
        self.robot.duration_years
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoiResult {
    pub annual_traditional_cost: f64,
    pub total_robot_cost: f64,
    /// Positive when the robot is the cheaper option over the duration.
    pub net_savings: f64,
}

/// Cumulative spend of both options at the end of a given year.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct YearlyCost {
    pub year: u32,
    pub traditional: f64,
    pub robot: f64,
}
