//! Core scheduling types: battery parameters, hourly inputs, and outputs.

use std::error::Error;
use std::fmt;

/// Battery parameters seen by the scheduler.
///
/// The charge rate is symmetric: it bounds both charging and discharging
/// power. Every schedule step is one hour long, so a kW rate and a kWh
/// energy delta are numerically interchangeable throughout the scheduler.
#[derive(Debug, Clone, Copy)]
pub struct BatterySpec {
    /// Total energy capacity (kWh, must be > 0).
    pub capacity_kwh: f32,
    /// Maximum charge and discharge power (kW, must be >= 0).
    pub charge_rate_kw: f32,
}

/// Forecast inputs for one scheduling horizon, one entry per hour.
///
/// All three series must have the same length; the scheduler rejects
/// mismatched inputs with [`ScheduleError::LengthMismatch`]. Spot prices may
/// be negative.
#[derive(Debug, Clone, Default)]
pub struct HourlyInputs {
    /// Hourly spot price (currency per kWh).
    pub spot_price: Vec<f32>,
    /// Hourly load demand (kWh).
    pub load_kwh: Vec<f32>,
    /// Hourly on-site PV production (kWh).
    pub pv_kwh: Vec<f32>,
}

impl HourlyInputs {
    /// Bundles the three forecast series.
    pub fn new(spot_price: Vec<f32>, load_kwh: Vec<f32>, pv_kwh: Vec<f32>) -> Self {
        Self {
            spot_price,
            load_kwh,
            pv_kwh,
        }
    }

    /// Horizon length in hours (length of the price series).
    pub fn len(&self) -> usize {
        self.spot_price.len()
    }

    /// Returns `true` if the horizon is empty.
    pub fn is_empty(&self) -> bool {
        self.spot_price.is_empty()
    }

    /// Net load at the given hour: load minus PV production.
    ///
    /// Negative means on-site generation exceeds demand.
    pub fn net_load_kwh(&self, hour: usize) -> f32 {
        self.load_kwh[hour] - self.pv_kwh[hour]
    }
}

/// The two output trajectories of one scheduling run.
///
/// Both vectors have the horizon length. Every state-of-charge entry is in
/// [0, 100]. Grid power is positive when drawing from the grid (including
/// charging draw) and negative when exporting.
#[derive(Debug, Clone, PartialEq)]
pub struct Schedule {
    /// Battery state of charge after each hour (percent).
    pub soc_percent: Vec<f32>,
    /// Net grid power during each hour (kW).
    pub grid_kw: Vec<f32>,
}

impl Schedule {
    /// Number of scheduled hours.
    pub fn len(&self) -> usize {
        self.soc_percent.len()
    }

    /// Returns `true` if the schedule is empty.
    pub fn is_empty(&self) -> bool {
        self.soc_percent.is_empty()
    }

    /// Joins the schedule with its inputs into one record per hour.
    ///
    /// # Panics
    ///
    /// Panics if `inputs` is not the series this schedule was computed from
    /// (length mismatch).
    pub fn records(&self, inputs: &HourlyInputs) -> Vec<HourRecord> {
        assert_eq!(self.len(), inputs.len(), "schedule/input length mismatch");
        (0..self.len())
            .map(|hour| HourRecord {
                hour,
                spot_price: inputs.spot_price[hour],
                load_kwh: inputs.load_kwh[hour],
                pv_kwh: inputs.pv_kwh[hour],
                net_load_kw: inputs.net_load_kwh(hour),
                grid_kw: self.grid_kw[hour],
                soc_percent: self.soc_percent[hour],
            })
            .collect()
    }
}

/// Complete record of one scheduled hour: forecast inputs joined with the
/// scheduler's outputs.
#[derive(Debug, Clone)]
pub struct HourRecord {
    /// Hour index within the horizon.
    pub hour: usize,
    /// Spot price (currency per kWh).
    pub spot_price: f32,
    /// Load demand (kWh).
    pub load_kwh: f32,
    /// PV production (kWh).
    pub pv_kwh: f32,
    /// Net load: load minus PV (kW).
    pub net_load_kw: f32,
    /// Net grid power (kW; positive=import, negative=export).
    pub grid_kw: f32,
    /// State of charge after this hour (percent).
    pub soc_percent: f32,
}

impl HourRecord {
    /// Battery power during this hour (kW; positive=charging, negative=discharging).
    ///
    /// Recovered from the power balance: `grid_kw = net_load_kw + battery_kw`.
    pub fn battery_kw(&self) -> f32 {
        self.grid_kw - self.net_load_kw
    }
}

impl fmt::Display for HourRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "h={:>2} | price={:>7.4} | load={:>5.2}  pv={:>5.2}  net={:>6.2} | \
             grid={:>6.2} kW  bat={:>6.2} kW | SoC={:>5.1}%",
            self.hour,
            self.spot_price,
            self.load_kwh,
            self.pv_kwh,
            self.net_load_kw,
            self.grid_kw,
            self.battery_kw(),
            self.soc_percent,
        )
    }
}

/// Invalid scheduler input.
///
/// Raised before any computation; the scheduler never returns partial
/// results. Numeric edge cases (negative net load, zero charge rate, SOC
/// exactly at a policy bound) are regular branch behavior, not errors.
#[derive(Debug, Clone, PartialEq)]
pub enum ScheduleError {
    /// The input series are empty.
    EmptyHorizon,
    /// The three input series have different lengths.
    LengthMismatch {
        spot_price: usize,
        load: usize,
        pv: usize,
    },
    /// Battery capacity is zero or negative.
    NonPositiveCapacity(f32),
    /// Charge rate is negative.
    NegativeChargeRate(f32),
    /// Initial state of charge is outside [0, 100].
    InitialSocOutOfRange(f32),
}

impl fmt::Display for ScheduleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyHorizon => write!(f, "input series are empty, need at least one hour"),
            Self::LengthMismatch {
                spot_price,
                load,
                pv,
            } => write!(
                f,
                "input series lengths differ: spot_price={spot_price}, load={load}, pv={pv}"
            ),
            Self::NonPositiveCapacity(v) => {
                write!(f, "battery capacity must be > 0 kWh, got {v}")
            }
            Self::NegativeChargeRate(v) => {
                write!(f, "battery charge rate must be >= 0 kW, got {v}")
            }
            Self::InitialSocOutOfRange(v) => {
                write!(f, "initial state of charge must be in [0, 100] %, got {v}")
            }
        }
    }
}

impl Error for ScheduleError {}
