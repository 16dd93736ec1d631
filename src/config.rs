//! TOML-based scenario configuration and preset definitions.

use std::fmt;
use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::sched::{BatterySpec, ThresholdPolicy};

/// Top-level scenario configuration parsed from TOML.
///
/// All fields have defaults matching the baseline scenario. Load from
/// TOML with [`ScenarioConfig::from_toml_file`] or use
/// [`ScenarioConfig::baseline`] for the built-in default.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ScenarioConfig {
    /// Horizon and seeding parameters.
    #[serde(default)]
    pub simulation: SimulationConfig,
    /// Battery parameters.
    #[serde(default)]
    pub battery: BatteryConfig,
    /// Dispatch policy thresholds.
    #[serde(default)]
    pub policy: PolicyConfig,
    /// Spot price profile parameters.
    #[serde(default)]
    pub price: PriceConfig,
    /// Load profile parameters.
    #[serde(default)]
    pub load: LoadConfig,
    /// PV profile parameters.
    #[serde(default)]
    pub solar: SolarConfig,
}

/// Horizon and seeding parameters.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SimulationConfig {
    /// Number of hours to schedule (must be > 0).
    pub hours: usize,
    /// Master random seed for the profile generators.
    pub seed: u64,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self { hours: 24, seed: 42 }
    }
}

/// Battery parameters.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BatteryConfig {
    /// Total energy capacity (kWh, must be > 0).
    pub capacity_kwh: f32,
    /// Maximum charge/discharge power (kW, must be >= 0).
    pub charge_rate_kw: f32,
    /// Initial state of charge (percent, 0-100).
    pub initial_soc_percent: f32,
}

impl Default for BatteryConfig {
    fn default() -> Self {
        // Powerwall-sized home battery
        Self {
            capacity_kwh: 13.5,
            charge_rate_kw: 2.0,
            initial_soc_percent: 50.0,
        }
    }
}

impl BatteryConfig {
    /// The scheduler-facing battery parameters.
    pub fn spec(&self) -> BatterySpec {
        BatterySpec {
            capacity_kwh: self.capacity_kwh,
            charge_rate_kw: self.charge_rate_kw,
        }
    }
}

/// Dispatch policy thresholds. Defaults reproduce the standard policy:
/// charge below 90% of the average price while under 90% SOC, discharge
/// above 110% while over 10% SOC.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PolicyConfig {
    /// Charge when price <= this fraction of the average price.
    pub charge_factor: f32,
    /// Discharge when price >= this fraction of the average price.
    pub discharge_factor: f32,
    /// Charging is disabled at or above this SOC (percent).
    pub soc_ceiling_percent: f32,
    /// Discharging is disabled at or below this SOC (percent).
    pub soc_floor_percent: f32,
}

impl Default for PolicyConfig {
    fn default() -> Self {
        let p = ThresholdPolicy::default();
        Self {
            charge_factor: p.charge_factor,
            discharge_factor: p.discharge_factor,
            soc_ceiling_percent: p.soc_ceiling_percent,
            soc_floor_percent: p.soc_floor_percent,
        }
    }
}

impl PolicyConfig {
    /// The scheduler-facing policy.
    pub fn policy(&self) -> ThresholdPolicy {
        ThresholdPolicy {
            charge_factor: self.charge_factor,
            discharge_factor: self.discharge_factor,
            soc_ceiling_percent: self.soc_ceiling_percent,
            soc_floor_percent: self.soc_floor_percent,
        }
    }
}

/// Spot price profile parameters.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PriceConfig {
    /// Base price level (currency per kWh).
    pub base: f32,
    /// Height of the morning peak (currency per kWh).
    pub morning_amp: f32,
    /// Hour of day at the center of the morning peak.
    pub morning_hour: f32,
    /// Height of the evening peak (currency per kWh).
    pub evening_amp: f32,
    /// Hour of day at the center of the evening peak.
    pub evening_hour: f32,
    /// Half-width of each peak in hours (must be > 0).
    pub peak_width_hours: f32,
    /// Gaussian noise standard deviation (currency per kWh).
    pub noise_std: f32,
}

impl Default for PriceConfig {
    fn default() -> Self {
        Self {
            base: 0.10,
            morning_amp: 0.15,
            morning_hour: 7.0,
            evening_amp: 0.18,
            evening_hour: 18.0,
            peak_width_hours: 4.0,
            noise_std: 0.01,
        }
    }
}

/// Load profile parameters.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoadConfig {
    /// Baseline consumption per hour (kWh).
    pub base_kwh: f32,
    /// Sinusoidal daily swing amplitude (kWh).
    pub amp_kwh: f32,
    /// Phase offset (radians).
    pub phase_rad: f32,
    /// Gaussian noise standard deviation (kWh).
    pub noise_std: f32,
}

impl Default for LoadConfig {
    fn default() -> Self {
        // Peak demand in the early evening
        Self {
            base_kwh: 1.5,
            amp_kwh: 1.0,
            phase_rad: std::f32::consts::PI,
            noise_std: 0.05,
        }
    }
}

/// PV profile parameters.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SolarConfig {
    /// Peak hourly production (kWh).
    pub kwh_peak: f32,
    /// Hour of day when production starts (inclusive).
    pub sunrise_hour: usize,
    /// Hour of day when production ends (exclusive).
    pub sunset_hour: usize,
    /// Noise standard deviation as a fraction of output.
    pub noise_std: f32,
}

impl Default for SolarConfig {
    fn default() -> Self {
        Self {
            kwh_peak: 4.8,
            sunrise_hour: 6,
            sunset_hour: 18,
            noise_std: 0.05,
        }
    }
}

/// Configuration error with field path and constraint description.
#[derive(Debug)]
pub struct ConfigError {
    /// Dotted field path (e.g., `"battery.capacity_kwh"`).
    pub field: String,
    /// Human-readable constraint description.
    pub message: String,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "config error: {} — {}", self.field, self.message)
    }
}

impl ScenarioConfig {
    /// Returns the baseline scenario: a Powerwall-sized battery on a sunny
    /// day with mild price peaks.
    pub fn baseline() -> Self {
        Self {
            simulation: SimulationConfig::default(),
            battery: BatteryConfig::default(),
            policy: PolicyConfig::default(),
            price: PriceConfig::default(),
            load: LoadConfig::default(),
            solar: SolarConfig::default(),
        }
    }

    /// Returns the high-solar preset: a large PV array, a bigger battery,
    /// and midday surplus.
    pub fn high_solar() -> Self {
        Self {
            battery: BatteryConfig {
                capacity_kwh: 15.0,
                charge_rate_kw: 7.0,
                initial_soc_percent: 30.0,
            },
            solar: SolarConfig {
                kwh_peak: 9.0,
                sunrise_hour: 5,
                sunset_hour: 19,
                ..SolarConfig::default()
            },
            load: LoadConfig {
                base_kwh: 1.2,
                ..LoadConfig::default()
            },
            ..Self::baseline()
        }
    }

    /// Returns the volatile preset: sharp price peaks and heavy noise, small
    /// PV contribution.
    pub fn volatile() -> Self {
        Self {
            price: PriceConfig {
                base: 0.08,
                morning_amp: 0.25,
                evening_amp: 0.35,
                peak_width_hours: 3.0,
                noise_std: 0.03,
                ..PriceConfig::default()
            },
            solar: SolarConfig {
                kwh_peak: 2.0,
                ..SolarConfig::default()
            },
            battery: BatteryConfig {
                capacity_kwh: 10.0,
                charge_rate_kw: 4.0,
                initial_soc_percent: 60.0,
            },
            ..Self::baseline()
        }
    }

    /// Available preset names.
    pub const PRESETS: &[&str] = &["baseline", "high_solar", "volatile"];

    /// Loads a scenario from a named preset.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the preset name is unknown.
    pub fn from_preset(name: &str) -> Result<Self, ConfigError> {
        match name {
            "baseline" => Ok(Self::baseline()),
            "high_solar" => Ok(Self::high_solar()),
            "volatile" => Ok(Self::volatile()),
            _ => Err(ConfigError {
                field: "preset".to_string(),
                message: format!(
                    "unknown preset \"{name}\", available: {}",
                    Self::PRESETS.join(", ")
                ),
            }),
        }
    }

    /// Parses a scenario from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the file cannot be read or the TOML is invalid.
    pub fn from_toml_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError {
            field: "scenario".to_string(),
            message: format!("cannot read \"{}\": {e}", path.display()),
        })?;
        Self::from_toml_str(&content)
    }

    /// Parses a scenario from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the TOML is invalid or contains unknown fields.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        toml::from_str(s).map_err(|e| ConfigError {
            field: "toml".to_string(),
            message: e.to_string(),
        })
    }

    /// Validates all fields and returns a list of errors.
    ///
    /// Returns an empty vector if configuration is valid.
    pub fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();

        if self.simulation.hours == 0 {
            errors.push(ConfigError {
                field: "simulation.hours".into(),
                message: "must be > 0".into(),
            });
        }

        let bat = &self.battery;
        if bat.capacity_kwh <= 0.0 {
            errors.push(ConfigError {
                field: "battery.capacity_kwh".into(),
                message: "must be > 0".into(),
            });
        }
        if bat.charge_rate_kw < 0.0 {
            errors.push(ConfigError {
                field: "battery.charge_rate_kw".into(),
                message: "must be >= 0".into(),
            });
        }
        if !(0.0..=100.0).contains(&bat.initial_soc_percent) {
            errors.push(ConfigError {
                field: "battery.initial_soc_percent".into(),
                message: "must be in [0, 100]".into(),
            });
        }

        let pol = &self.policy;
        if pol.charge_factor < 0.0 {
            errors.push(ConfigError {
                field: "policy.charge_factor".into(),
                message: "must be >= 0".into(),
            });
        }
        if pol.discharge_factor < pol.charge_factor {
            errors.push(ConfigError {
                field: "policy.discharge_factor".into(),
                message: "must be >= policy.charge_factor".into(),
            });
        }
        if !(0.0..=100.0).contains(&pol.soc_floor_percent)
            || !(0.0..=100.0).contains(&pol.soc_ceiling_percent)
        {
            errors.push(ConfigError {
                field: "policy.soc_floor_percent".into(),
                message: "SOC bounds must be in [0, 100]".into(),
            });
        }
        if pol.soc_floor_percent >= pol.soc_ceiling_percent {
            errors.push(ConfigError {
                field: "policy.soc_floor_percent".into(),
                message: "must be < policy.soc_ceiling_percent".into(),
            });
        }

        if self.price.peak_width_hours <= 0.0 {
            errors.push(ConfigError {
                field: "price.peak_width_hours".into(),
                message: "must be > 0".into(),
            });
        }

        let sol = &self.solar;
        if sol.sunrise_hour >= sol.sunset_hour {
            errors.push(ConfigError {
                field: "solar.sunrise_hour".into(),
                message: "must be < solar.sunset_hour".into(),
            });
        }
        if sol.sunset_hour > 24 {
            errors.push(ConfigError {
                field: "solar.sunset_hour".into(),
                message: "must be <= 24".into(),
            });
        }

        errors
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn baseline_preset_valid() {
        let cfg = ScenarioConfig::baseline();
        let errors = cfg.validate();
        assert!(errors.is_empty(), "baseline should be valid: {errors:?}");
    }

    #[test]
    fn from_preset_baseline() {
        let cfg = ScenarioConfig::from_preset("baseline");
        assert!(cfg.is_ok());
    }

    #[test]
    fn from_preset_unknown() {
        let err = ScenarioConfig::from_preset("nonexistent");
        assert!(err.is_err());
        let e = err.unwrap_err();
        assert!(e.message.contains("unknown preset"));
    }

    #[test]
    fn all_presets_are_valid() {
        for name in ScenarioConfig::PRESETS {
            let cfg = ScenarioConfig::from_preset(name);
            assert!(cfg.is_ok(), "preset \"{name}\" should load");
            let errors = cfg.as_ref().map(|c| c.validate()).unwrap_or_default();
            assert!(
                errors.is_empty(),
                "preset \"{name}\" should be valid: {errors:?}"
            );
        }
    }

    #[test]
    fn valid_toml_parses() {
        let toml = r#"
[simulation]
hours = 48
seed = 99

[battery]
capacity_kwh = 15.0
charge_rate_kw = 7.0
initial_soc_percent = 30.0

[policy]
charge_factor = 0.85
discharge_factor = 1.15
soc_ceiling_percent = 95.0
soc_floor_percent = 5.0

[price]
base = 0.08
morning_amp = 0.2
morning_hour = 8.0
evening_amp = 0.3
evening_hour = 19.0
peak_width_hours = 3.0
noise_std = 0.02

[load]
base_kwh = 1.2
amp_kwh = 0.8
phase_rad = 3.1
noise_std = 0.1

[solar]
kwh_peak = 9.0
sunrise_hour = 5
sunset_hour = 19
noise_std = 0.1
"#;
        let cfg = ScenarioConfig::from_toml_str(toml);
        assert!(cfg.is_ok(), "valid TOML should parse: {:?}", cfg.err());
        let cfg = cfg.ok();
        assert_eq!(cfg.as_ref().map(|c| c.simulation.hours), Some(48));
        assert_eq!(cfg.as_ref().map(|c| c.battery.capacity_kwh), Some(15.0));
        assert_eq!(cfg.as_ref().map(|c| c.policy.charge_factor), Some(0.85));
    }

    #[test]
    fn invalid_toml_unknown_field() {
        let toml = r#"
[battery]
capacity_kwh = 10.0
bogus_field = true
"#;
        let result = ScenarioConfig::from_toml_str(toml);
        assert!(result.is_err());
    }

    #[test]
    fn partial_toml_uses_defaults() {
        let toml = r#"
[simulation]
seed = 99
"#;
        let cfg = ScenarioConfig::from_toml_str(toml);
        assert!(cfg.is_ok());
        let cfg = cfg.ok();
        // seed overridden
        assert_eq!(cfg.as_ref().map(|c| c.simulation.seed), Some(99));
        // hours kept default
        assert_eq!(cfg.as_ref().map(|c| c.simulation.hours), Some(24));
        // battery kept default
        assert_eq!(cfg.as_ref().map(|c| c.battery.capacity_kwh), Some(13.5));
    }

    #[test]
    fn validation_catches_zero_hours() {
        let mut cfg = ScenarioConfig::baseline();
        cfg.simulation.hours = 0;
        let errors = cfg.validate();
        assert!(errors.iter().any(|e| e.field == "simulation.hours"));
    }

    #[test]
    fn validation_catches_invalid_soc() {
        let mut cfg = ScenarioConfig::baseline();
        cfg.battery.initial_soc_percent = 150.0;
        let errors = cfg.validate();
        assert!(
            errors
                .iter()
                .any(|e| e.field == "battery.initial_soc_percent")
        );
    }

    #[test]
    fn validation_catches_inverted_policy_bounds() {
        let mut cfg = ScenarioConfig::baseline();
        cfg.policy.soc_floor_percent = 95.0;
        let errors = cfg.validate();
        assert!(errors.iter().any(|e| e.field == "policy.soc_floor_percent"));
    }

    #[test]
    fn validation_catches_inverted_sun_hours() {
        let mut cfg = ScenarioConfig::baseline();
        cfg.solar.sunrise_hour = 20;
        cfg.solar.sunset_hour = 6;
        let errors = cfg.validate();
        assert!(errors.iter().any(|e| e.field == "solar.sunrise_hour"));
    }

    #[test]
    fn default_policy_config_matches_scheduler_default() {
        let cfg = PolicyConfig::default();
        let policy = cfg.policy();
        assert_eq!(policy.charge_factor, 0.9);
        assert_eq!(policy.discharge_factor, 1.1);
        assert_eq!(policy.soc_ceiling_percent, 90.0);
        assert_eq!(policy.soc_floor_percent, 10.0);
    }

    #[test]
    fn high_solar_has_larger_pv() {
        let base = ScenarioConfig::baseline();
        let high = ScenarioConfig::high_solar();
        assert!(high.solar.kwh_peak > base.solar.kwh_peak);
    }

    #[test]
    fn volatile_has_sharper_peaks() {
        let base = ScenarioConfig::baseline();
        let vol = ScenarioConfig::volatile();
        assert!(vol.price.evening_amp > base.price.evening_amp);
        assert!(vol.price.noise_std > base.price.noise_std);
    }
}
