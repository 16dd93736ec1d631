//! Threshold-based battery dispatch over a fixed hourly horizon.

use crate::sched::types::{BatterySpec, HourlyInputs, Schedule, ScheduleError};

/// Dispatch policy constants.
///
/// The thresholds are derived once per run from the horizon's average spot
/// price: charge below `charge_factor` times the average, discharge above
/// `discharge_factor` times the average. The SOC bounds are strict: at
/// exactly the ceiling charging stays off, at exactly the floor discharging
/// stays off.
#[derive(Debug, Clone, Copy)]
pub struct ThresholdPolicy {
    /// Charge when price <= this fraction of the average price.
    pub charge_factor: f32,
    /// Discharge when price >= this fraction of the average price.
    pub discharge_factor: f32,
    /// Charging is disabled at or above this SOC (percent).
    pub soc_ceiling_percent: f32,
    /// Discharging is disabled at or below this SOC (percent).
    pub soc_floor_percent: f32,
}

impl Default for ThresholdPolicy {
    fn default() -> Self {
        Self {
            charge_factor: 0.9,
            discharge_factor: 1.1,
            soc_ceiling_percent: 90.0,
            soc_floor_percent: 10.0,
        }
    }
}

/// Computes an hour-by-hour charge/discharge schedule with the default policy.
///
/// Walks the horizon once, left to right, carrying the state of charge from
/// hour to hour (`init_soc_percent` seeds hour 0). Each hour either charges,
/// discharges, or idles the battery based on the price thresholds and the SOC
/// bounds, then clamps the resulting SOC to [0, 100]. Pure and deterministic;
/// O(H) time.
///
/// # Errors
///
/// Returns a [`ScheduleError`] without computing anything if the series
/// lengths differ, the horizon is empty, `capacity_kwh <= 0`,
/// `charge_rate_kw < 0`, or `init_soc_percent` is outside [0, 100].
pub fn schedule(
    battery: &BatterySpec,
    inputs: &HourlyInputs,
    init_soc_percent: f32,
) -> Result<Schedule, ScheduleError> {
    schedule_with_policy(battery, inputs, init_soc_percent, &ThresholdPolicy::default())
}

/// Same as [`schedule`] but with an explicit [`ThresholdPolicy`].
pub fn schedule_with_policy(
    battery: &BatterySpec,
    inputs: &HourlyInputs,
    init_soc_percent: f32,
    policy: &ThresholdPolicy,
) -> Result<Schedule, ScheduleError> {
    validate(battery, inputs, init_soc_percent)?;

    let hours = inputs.len();
    let avg_price = inputs.spot_price.iter().sum::<f32>() / hours as f32;
    let charge_threshold = avg_price * policy.charge_factor;
    let discharge_threshold = avg_price * policy.discharge_factor;

    let mut soc_percent = Vec::with_capacity(hours);
    let mut grid_kw = Vec::with_capacity(hours);
    let mut prev_soc = init_soc_percent;

    for hour in 0..hours {
        let net_load = inputs.net_load_kwh(hour);
        let price = inputs.spot_price[hour];

        // One-hour steps, so headroom and stored energy in kWh double as
        // power bounds in kW.
        let max_charge = battery
            .charge_rate_kw
            .min(battery.capacity_kwh * (100.0 - prev_soc) / 100.0);
        let max_discharge = battery
            .charge_rate_kw
            .min(battery.capacity_kwh * prev_soc / 100.0);

        let soc_raw = if price <= charge_threshold && prev_soc < policy.soc_ceiling_percent {
            let charge_power = max_charge.min(battery.charge_rate_kw);
            grid_kw.push(net_load + charge_power);
            prev_soc + charge_power / battery.capacity_kwh * 100.0
        } else if price >= discharge_threshold && prev_soc > policy.soc_floor_percent {
            // Discharge covers net load only, never exports for profit. A PV
            // surplus makes net_load negative, so this branch then absorbs
            // the surplus into the battery instead.
            let discharge_power = max_discharge.min(net_load);
            grid_kw.push(net_load - discharge_power);
            prev_soc - discharge_power / battery.capacity_kwh * 100.0
        } else {
            grid_kw.push(net_load);
            prev_soc
        };

        prev_soc = soc_raw.clamp(0.0, 100.0);
        soc_percent.push(prev_soc);
    }

    Ok(Schedule {
        soc_percent,
        grid_kw,
    })
}

fn validate(
    battery: &BatterySpec,
    inputs: &HourlyInputs,
    init_soc_percent: f32,
) -> Result<(), ScheduleError> {
    let (prices, load, pv) = (
        inputs.spot_price.len(),
        inputs.load_kwh.len(),
        inputs.pv_kwh.len(),
    );
    if prices != load || prices != pv {
        return Err(ScheduleError::LengthMismatch {
            spot_price: prices,
            load,
            pv,
        });
    }
    if prices == 0 {
        return Err(ScheduleError::EmptyHorizon);
    }
    if battery.capacity_kwh <= 0.0 {
        return Err(ScheduleError::NonPositiveCapacity(battery.capacity_kwh));
    }
    if battery.charge_rate_kw < 0.0 {
        return Err(ScheduleError::NegativeChargeRate(battery.charge_rate_kw));
    }
    if !(0.0..=100.0).contains(&init_soc_percent) {
        return Err(ScheduleError::InitialSocOutOfRange(init_soc_percent));
    }
    Ok(())
}
