//! Visualization utilities for generating charts

use crate::logistic::LogisticFeeParams;
use crate::word::Q64_F64;
use anyhow::Result;
use plotters::prelude::*;

/// Generates a chart of the encoded fee (as a percent) against volume
pub fn plot_fee_vs_volume(params: &LogisticFeeParams, max_volume: u64, out_path: &str) -> Result<()> {
    let root = BitMapBackend::new(out_path, (1200, 700)).into_drawing_area();
    root.fill(&WHITE)?;
    let max_volume = max_volume.max(1);
    let pts: Vec<(f64, f64)> = (0..=500u64)
        .map(|i| -> Result<(f64, f64)> {
            let x = (max_volume as u128 * i as u128 / 500) as u64;
            let word = params.fee_x64(x.into())?;
            // back to a percent for the axis
            let pct = word.low_u128() as f64 / Q64_F64 * 100.0;
            Ok((x as f64, pct))
        })
        .collect::<Result<_>>()?;
    let x_max = max_volume as f64;
    let y_max = pts.iter().map(|(_, y)| *y).fold(0.0, f64::max).max(1e-12);
    let mut chart = ChartBuilder::on(&root)
        .margin(20)
        .caption("Fee (%) vs Volume", ("sans-serif", 28))
        .x_label_area_size(40)
        .y_label_area_size(60)
        .build_cartesian_2d(0.0..x_max, 0.0..(y_max * 1.05))?;
    chart.configure_mesh().draw()?;
    chart.draw_series(LineSeries::new(pts, &BLACK))?;
    root.present()?;
    Ok(())
}
