use robocost_schemas::roi::{RobotCostInputs, RoiInputs, TraditionalCostInputs, YearlyCost};
use tracing::debug;

/// Something that can put a price on a way of keeping a lawn mowed.
pub trait CostModel {
    /// The headline cost of this option. For traditional care this is one
    /// season; for a robot it is the whole ownership period.
    fn cost(&self) -> f64;

    /// Cumulative spend after `years` full seasons.
    fn cost_after_years(&self, years: u32) -> f64;
}

impl CostModel for TraditionalCostInputs {
    fn cost(&self) -> f64 {
        let per_mow = self.fuel_cost_per_season + self.manual_mower_cost + self.gardening_service_cost;
        let annual = per_mow * f64::from(self.mows_per_season);
        debug!(per_mow, mows = self.mows_per_season, annual, "traditional annual cost");
        annual
    }

    fn cost_after_years(&self, years: u32) -> f64 {
        self.cost() * f64::from(years)
    }
}

impl CostModel for RobotCostInputs {
    fn cost(&self) -> f64 {
        let total = self.cost_after_years(self.duration_years);
        debug!(
            purchase = self.purchase_price,
            maintenance = self.annual_maintenance_cost,
            mows = self.robot_mows_per_season,
            years = self.duration_years,
            total,
            "robot total cost"
        );
        total
    }

    // Purchase is paid once; maintenance is charged per mow, every season.
    fn cost_after_years(&self, years: u32) -> f64 {
        self.purchase_price
            + self.annual_maintenance_cost * f64::from(self.robot_mows_per_season) * f64::from(years)
    }
}

pub fn traditional_annual_cost(inputs: &TraditionalCostInputs) -> f64 {
    inputs.cost()
}

pub fn robot_total_cost(inputs: &RobotCostInputs) -> f64 {
    inputs.cost()
}

/// Cumulative spend of both options from year 0 (robot bought, nothing mowed
/// yet) to the end of the comparison period.
pub fn cumulative_costs(inputs: &RoiInputs) -> Vec<YearlyCost> {
    (0..=inputs.duration_years())
        .map(|year| YearlyCost {
            year,
            traditional: inputs.traditional.cost_after_years(year),
            robot: inputs.robot.cost_after_years(year),
        })
        .collect()
}

/// First year in which traditional care has cost at least as much as the robot.
pub fn break_even_year(series: &[YearlyCost]) -> Option<u32> {
    series
        .iter()
        .filter(|point| point.year > 0)
        .find(|point| point.traditional >= point.robot)
        .map(|point| point.year)
}
