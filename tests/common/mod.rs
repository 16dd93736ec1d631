//! Shared test fixtures for integration tests.

use bess_sched::sched::{BatterySpec, HourlyInputs};

/// Small test battery (10 kWh, 5 kW symmetric rate).
pub fn small_battery() -> BatterySpec {
    BatterySpec {
        capacity_kwh: 10.0,
        charge_rate_kw: 5.0,
    }
}

/// Powerwall-sized battery (13.5 kWh, 2 kW symmetric rate).
pub fn powerwall() -> BatterySpec {
    BatterySpec {
        capacity_kwh: 13.5,
        charge_rate_kw: 2.0,
    }
}

/// A fixed 24-hour demo day: morning and evening price peaks, evening-peaked
/// load, and a midday PV hump that overshoots demand.
pub fn demo_day() -> HourlyInputs {
    HourlyInputs::new(
        vec![
            0.10, 0.09, 0.08, 0.08, 0.09, 0.15, // night / early morning
            0.20, 0.25, 0.22, 0.18, 0.15, 0.12, // morning peak
            0.11, 0.10, 0.12, 0.14, 0.18, 0.25, // midday / ramp-up
            0.28, 0.22, 0.18, 0.15, 0.12, 0.11, // evening peak
        ],
        vec![
            0.8, 0.6, 0.5, 0.4, 0.4, 0.6, //
            1.2, 2.0, 2.5, 2.0, 1.8, 1.5, //
            1.3, 1.2, 1.4, 1.6, 2.0, 2.8, //
            3.0, 2.5, 2.0, 1.5, 1.2, 1.0,
        ],
        vec![
            0.0, 0.0, 0.0, 0.0, 0.0, 0.1, //
            0.3, 1.0, 2.5, 3.8, 4.5, 4.8, //
            4.6, 4.2, 3.5, 2.5, 1.2, 0.3, //
            0.0, 0.0, 0.0, 0.0, 0.0, 0.0,
        ],
    )
}

/// Flat inputs: the same price, load, and PV value in every hour.
pub fn flat_day(hours: usize, price: f32, load: f32, pv: f32) -> HourlyInputs {
    HourlyInputs::new(vec![price; hours], vec![load; hours], vec![pv; hours])
}
