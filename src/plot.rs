//! Visualization utilities for generating charts

use crate::curves::Curve;
use anyhow::Result;
use plotters::prelude::*;

/// Generates a price vs cumulative supply chart.
///
/// Integer prices are widened to `f64` for drawing only.
pub fn plot_price_vs_supply<C: Curve>(c: &C, out_path: &str) -> Result<()> {
    let root = BitMapBackend::new(out_path, (1200, 700)).into_drawing_area();
    root.fill(&WHITE)?;
    let steps = c.step_count();
    let mut supply = 0.0_f64;
    let mut data: Vec<(f64, f64)> = Vec::with_capacity(2 * steps);
    for i in 0..steps {
        let p = c.price_of_step(i) as f64;
        data.push((supply, p));
        supply += c.tickets_in_step(i) as f64;
        data.push((supply, p)); // step
    }
    let x_max = data.last().map(|(x, _)| *x).unwrap_or(1.0).max(1.0);
    let y_max = data.iter().map(|(_, y)| *y).fold(0.0, f64::max).max(1.0);
    let mut chart = ChartBuilder::on(&root)
        .margin(20)
        .caption("Ticket Price vs Supply", ("sans-serif", 28))
        .x_label_area_size(40)
        .y_label_area_size(60)
        .build_cartesian_2d(0.0..x_max, 0.0..(y_max * 1.05))?;
    chart.configure_mesh().draw()?;
    chart.draw_series(LineSeries::new(data, &BLACK))?;
    root.present()?;
    Ok(())
}

/// Generates a chart of cumulative buy cost from zero supply.
///
/// Sampled at every tier boundary, so the line is exact between samples.
pub fn plot_cost_vs_supply<C: Curve>(c: &C, out_path: &str) -> Result<()> {
    let root = BitMapBackend::new(out_path, (1200, 700)).into_drawing_area();
    root.fill(&WHITE)?;
    let mut supply = 0.0_f64;
    let mut cost = 0.0_f64;
    let mut pts: Vec<(f64, f64)> = vec![(0.0, 0.0)];
    for i in 0..c.step_count() {
        let tickets = c.tickets_in_step(i) as f64;
        supply += tickets;
        cost += tickets * c.price_of_step(i) as f64;
        pts.push((supply, cost));
    }
    let x_max = supply.max(1.0);
    let y_max = cost.max(1.0);
    let mut chart = ChartBuilder::on(&root)
        .margin(20)
        .caption("Cumulative Buy Cost vs Supply", ("sans-serif", 28))
        .x_label_area_size(40)
        .y_label_area_size(60)
        .build_cartesian_2d(0.0..x_max, 0.0..(y_max * 1.05))?;
    chart.configure_mesh().draw()?;
    chart.draw_series(LineSeries::new(pts, &BLACK))?;
    root.present()?;
    Ok(())
}
