//! Charts saved next to the ledger for each ROI scenario.

use anyhow::Result;
use plotters::prelude::*;
use robocost_schemas::roi::YearlyCost;
use std::path::{Path, PathBuf};
use tracing::info;

/// Draws cumulative spend per year for traditional care and for the robot.
/// The crossing point, if any, is the break-even year.
pub fn plot_cumulative_costs(
    output_dir: &Path,
    scenario_id: &str,
    scenario_name: &str,
    series: &[YearlyCost],
) -> Result<Option<PathBuf>> {
    if series.len() < 2 {
        info!(scenario_id, "not enough points to plot");
        return Ok(None);
    }

    let path = output_dir.join(format!("{}_cumulative_costs.png", scenario_id));
    draw_chart(&path, scenario_name, series)?;

    info!(path = %path.display(), "cumulative cost chart saved");
    Ok(Some(path))
}

fn draw_chart(path: &Path, scenario_name: &str, series: &[YearlyCost]) -> Result<()> {
    let root = BitMapBackend::new(path, (1024, 768)).into_drawing_area();
    root.fill(&WHITE)?;

    let max_year = series.last().map_or(1, |p| p.year);
    let max_cost: f64 = series
        .iter()
        .map(|p| p.traditional.max(p.robot))
        .fold(0.0, f64::max);
    let y_top = if max_cost > 0.0 { max_cost * 1.1 } else { 1.0 };

    let mut chart = ChartBuilder::on(&root)
        .caption(
            format!("Coût cumulé : {}", scenario_name),
            ("sans-serif", 40).into_font(),
        )
        .margin(10)
        .x_label_area_size(30)
        .y_label_area_size(70)
        .build_cartesian_2d(0u32..max_year, 0f64..y_top)?;

    chart
        .configure_mesh()
        .x_desc("Années")
        .y_desc("Coût cumulé (€)")
        .draw()?;

    let lines = [
        ("Entretien traditionnel", RED, series.iter().map(|p| (p.year, p.traditional)).collect::<Vec<_>>()),
        ("Robot tondeuse", GREEN, series.iter().map(|p| (p.year, p.robot)).collect::<Vec<_>>()),
    ];

    for (label, color, points) in lines {
        chart
            .draw_series(LineSeries::new(points, color.stroke_width(2)))?
            .label(label)
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], color.filled()));
    }

    chart
        .configure_series_labels()
        .background_style(&WHITE.mix(0.8))
        .border_style(&BLACK)
        .draw()?;
    root.present()?;
    Ok(())
}
