use rand::{SeedableRng, rngs::StdRng};

use super::{HOURS_PER_DAY, gaussian_noise};

/// A household load profile generator with a sinusoidal daily pattern.
///
/// `LoadProfile` combines a baseline, a single daily sine swing, and Gaussian
/// noise into an hourly demand series. Demand never goes negative.
///
/// # Examples
///
/// ```
/// use bess_sched::profile::LoadProfile;
///
/// let mut load = LoadProfile::new(
///     1.5,                    // base_kwh - average consumption
///     1.0,                    // amp_kwh - daily swing
///     std::f32::consts::PI,   // phase_rad - peak in the evening
///     0.05,                   // noise_std - small random variation
///     42,                     // seed - for reproducible noise
/// );
///
/// let day = load.generate(24);
/// assert_eq!(day.len(), 24);
/// ```
#[derive(Debug, Clone)]
pub struct LoadProfile {
    /// Baseline consumption per hour (kWh).
    pub base_kwh: f32,

    /// Amplitude of the sinusoidal daily swing (kWh).
    pub amp_kwh: f32,

    /// Phase offset of the sinusoidal pattern in radians.
    pub phase_rad: f32,

    /// Standard deviation of the Gaussian noise (kWh).
    pub noise_std: f32,

    /// Random number generator for noise generation.
    rng: StdRng,
}

impl LoadProfile {
    /// Creates a new load profile generator.
    pub fn new(base_kwh: f32, amp_kwh: f32, phase_rad: f32, noise_std: f32, seed: u64) -> Self {
        Self {
            base_kwh,
            amp_kwh,
            phase_rad,
            noise_std: noise_std.max(0.0),
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Demand for a single hour of the day (kWh, non-negative).
    pub fn sample_kwh(&mut self, hour: usize) -> f32 {
        let day_pos = (hour % HOURS_PER_DAY) as f32 / HOURS_PER_DAY as f32; // [0,1)
        let angle = 2.0 * std::f32::consts::PI * day_pos + self.phase_rad;
        let kwh = self.base_kwh + self.amp_kwh * angle.sin() + gaussian_noise(&mut self.rng, self.noise_std);
        kwh.max(0.0) // no negative demand
    }

    /// Generates an hourly demand series of the given horizon length.
    pub fn generate(&mut self, hours: usize) -> Vec<f32> {
        (0..hours).map(|h| self.sample_kwh(h)).collect()
    }
}
