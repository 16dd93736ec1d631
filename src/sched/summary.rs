//! Post-hoc cost and utilization summary for a computed schedule.

use std::fmt;

use super::types::{BatterySpec, HourRecord};

/// Battery power below this magnitude counts as an idle hour.
const IDLE_EPS_KW: f32 = 1e-6;

/// Aggregate figures derived from a complete schedule.
///
/// Computed post-hoc from the joined [`HourRecord`]s so the report always
/// agrees with the per-hour data. One-hour steps throughout, so kW sums
/// double as kWh totals.
#[derive(Debug, Clone)]
pub struct ScheduleSummary {
    /// Total cost of grid energy over the horizon (currency).
    pub grid_cost: f32,
    /// Cost of serving the same net load with no battery action (currency).
    pub grid_cost_without_battery: f32,
    /// Cost reduction achieved by the battery (may be negative).
    pub savings: f32,
    /// Total battery energy throughput (kWh, sum of |battery power| x 1 h).
    pub battery_throughput_kwh: f32,
    /// Battery equivalent full cycles (throughput / 2x capacity).
    pub equivalent_full_cycles: f32,
    /// Hours in which the battery took energy in.
    pub charge_hours: usize,
    /// Hours in which the battery put energy out.
    pub discharge_hours: usize,
    /// Hours in which the battery did not move.
    pub idle_hours: usize,
    /// Peak grid import power (kW, positive).
    pub peak_import_kw: f32,
    /// Peak grid export power (kW, positive magnitude).
    pub peak_export_kw: f32,
    /// State of charge after the last hour (percent).
    pub final_soc_percent: f32,
}

impl ScheduleSummary {
    /// Computes the summary from the complete hour records.
    pub fn from_records(records: &[HourRecord], battery: &BatterySpec) -> Self {
        if records.is_empty() {
            return Self {
                grid_cost: 0.0,
                grid_cost_without_battery: 0.0,
                savings: 0.0,
                battery_throughput_kwh: 0.0,
                equivalent_full_cycles: 0.0,
                charge_hours: 0,
                discharge_hours: 0,
                idle_hours: 0,
                peak_import_kw: 0.0,
                peak_export_kw: 0.0,
                final_soc_percent: 0.0,
            };
        }

        let mut grid_cost = 0.0_f32;
        let mut baseline_cost = 0.0_f32;
        let mut throughput = 0.0_f32;
        let mut charge_hours = 0_usize;
        let mut discharge_hours = 0_usize;
        let mut idle_hours = 0_usize;
        let mut peak_import = 0.0_f32;
        let mut peak_export = 0.0_f32;

        for r in records {
            grid_cost += r.grid_kw * r.spot_price;
            baseline_cost += r.net_load_kw * r.spot_price;

            let battery_kw = r.battery_kw();
            throughput += battery_kw.abs();
            if battery_kw > IDLE_EPS_KW {
                charge_hours += 1;
            } else if battery_kw < -IDLE_EPS_KW {
                discharge_hours += 1;
            } else {
                idle_hours += 1;
            }

            peak_import = peak_import.max(r.grid_kw);
            peak_export = peak_export.max(-r.grid_kw);
        }

        let cycles = if battery.capacity_kwh > 0.0 {
            throughput / (2.0 * battery.capacity_kwh)
        } else {
            0.0
        };

        Self {
            grid_cost,
            grid_cost_without_battery: baseline_cost,
            savings: baseline_cost - grid_cost,
            battery_throughput_kwh: throughput,
            equivalent_full_cycles: cycles,
            charge_hours,
            discharge_hours,
            idle_hours,
            peak_import_kw: peak_import,
            peak_export_kw: peak_export,
            final_soc_percent: records[records.len() - 1].soc_percent,
        }
    }
}

impl fmt::Display for ScheduleSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "--- Schedule Summary ---")?;
        writeln!(f, "Grid cost:             {:.4}", self.grid_cost)?;
        writeln!(
            f,
            "Cost without battery:  {:.4}",
            self.grid_cost_without_battery
        )?;
        writeln!(f, "Savings:               {:.4}", self.savings)?;
        writeln!(
            f,
            "Battery throughput:    {:.2} kWh ({:.2} equiv. cycles)",
            self.battery_throughput_kwh, self.equivalent_full_cycles
        )?;
        writeln!(
            f,
            "Hours charge/discharge/idle: {} / {} / {}",
            self.charge_hours, self.discharge_hours, self.idle_hours
        )?;
        writeln!(f, "Peak import:           {:.2} kW", self.peak_import_kw)?;
        writeln!(f, "Peak export:           {:.2} kW", self.peak_export_kw)?;
        write!(f, "Final SoC:             {:.1}%", self.final_soc_percent)
    }
}
