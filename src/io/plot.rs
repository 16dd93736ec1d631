//! PNG chart rendering for a computed schedule.
//!
//! Only compiled with the `plot` feature.

use std::error::Error;
use std::path::Path;

use plotters::prelude::*;

use crate::sched::{HourlyInputs, Schedule};

/// Renders a three-panel schedule chart to a PNG file.
///
/// Panels from top to bottom: spot price; load, PV production, and grid
/// power; battery state of charge with the y-axis fixed to [0, 100].
///
/// # Errors
///
/// Returns a boxed error if the backend cannot write the file or a series
/// fails to draw.
pub fn render_schedule_png(
    inputs: &HourlyInputs,
    schedule: &Schedule,
    path: &Path,
) -> Result<(), Box<dyn Error>> {
    let hours = inputs.len();
    let x_max = hours.saturating_sub(1).max(1) as f64;

    let root = BitMapBackend::new(path, (1000, 1200)).into_drawing_area();
    root.fill(&WHITE)?;

    let areas = root.split_evenly((3, 1));

    // Panel 1: spot price
    let (price_min, price_max) = padded_bounds(&[&inputs.spot_price]);
    let mut chart1 = ChartBuilder::on(&areas[0])
        .caption("Spot Price", ("sans-serif", 25))
        .margin(15)
        .x_label_area_size(40)
        .y_label_area_size(60)
        .build_cartesian_2d(0f64..x_max, price_min..price_max)?;
    chart1
        .configure_mesh()
        .x_desc("Hour")
        .y_desc("Price (/kWh)")
        .draw()?;
    chart1
        .draw_series(LineSeries::new(points(&inputs.spot_price), RED.stroke_width(2)))?
        .label("Spot Price")
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 15, y)], RED.stroke_width(2)));
    chart1.configure_series_labels().draw()?;

    // Panel 2: load, PV, and grid power
    let (power_min, power_max) =
        padded_bounds(&[&inputs.load_kwh, &inputs.pv_kwh, &schedule.grid_kw]);
    let mut chart2 = ChartBuilder::on(&areas[1])
        .caption("Load, PV, and Grid Power", ("sans-serif", 25))
        .margin(15)
        .x_label_area_size(40)
        .y_label_area_size(60)
        .build_cartesian_2d(0f64..x_max, power_min..power_max)?;
    chart2
        .configure_mesh()
        .x_desc("Hour")
        .y_desc("Power (kW)")
        .draw()?;
    chart2
        .draw_series(LineSeries::new(points(&inputs.load_kwh), BLUE.stroke_width(2)))?
        .label("Load")
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 15, y)], BLUE.stroke_width(2)));
    chart2
        .draw_series(LineSeries::new(points(&inputs.pv_kwh), GREEN.stroke_width(2)))?
        .label("PV Production")
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 15, y)], GREEN.stroke_width(2)));
    chart2
        .draw_series(LineSeries::new(points(&schedule.grid_kw), RED.stroke_width(2)))?
        .label("Grid Power")
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 15, y)], RED.stroke_width(2)));
    chart2.configure_series_labels().draw()?;

    // Panel 3: state of charge, fixed axis
    let mut chart3 = ChartBuilder::on(&areas[2])
        .caption("Battery State of Charge", ("sans-serif", 25))
        .margin(15)
        .x_label_area_size(40)
        .y_label_area_size(60)
        .build_cartesian_2d(0f64..x_max, 0f64..100f64)?;
    chart3
        .configure_mesh()
        .x_desc("Hour")
        .y_desc("SoC (%)")
        .draw()?;
    chart3
        .draw_series(LineSeries::new(points(&schedule.soc_percent), MAGENTA.stroke_width(2)))?
        .label("State of Charge")
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 15, y)], MAGENTA.stroke_width(2)));
    chart3.configure_series_labels().draw()?;

    root.present()?;
    Ok(())
}

/// Hour-indexed points for one line series.
fn points(series: &[f32]) -> impl Iterator<Item = (f64, f64)> + '_ {
    series
        .iter()
        .enumerate()
        .map(|(i, &y)| (i as f64, f64::from(y)))
}

/// Min/max over several series with a small margin so lines do not sit on
/// the frame. Falls back to a unit range for flat data.
fn padded_bounds(series: &[&[f32]]) -> (f64, f64) {
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    for s in series {
        for &v in *s {
            min = min.min(f64::from(v));
            max = max.max(f64::from(v));
        }
    }
    if !min.is_finite() || !max.is_finite() {
        return (0.0, 1.0);
    }
    let pad = ((max - min) * 0.1).max(0.05);
    (min - pad, max + pad)
}

#[cfg(test)]
mod tests {
    use super::padded_bounds;

    #[test]
    fn bounds_cover_all_series() {
        let a = [1.0_f32, 5.0];
        let b = [-2.0_f32, 3.0];
        let (min, max) = padded_bounds(&[&a, &b]);
        assert!(min < -2.0);
        assert!(max > 5.0);
    }

    #[test]
    fn flat_data_gets_a_nonzero_range() {
        let a = [2.0_f32, 2.0];
        let (min, max) = padded_bounds(&[&a]);
        assert!(max > min);
    }

    #[test]
    fn empty_series_fall_back_to_unit_range() {
        let (min, max) = padded_bounds(&[]);
        assert_eq!((min, max), (0.0, 1.0));
    }
}
