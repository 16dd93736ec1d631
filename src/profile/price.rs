use rand::{SeedableRng, rngs::StdRng};

use super::{HOURS_PER_DAY, gaussian_noise};

/// A day-ahead spot price profile generator with morning and evening peaks.
///
/// `PriceProfile` layers two cosine-shaped price bumps over a flat base and
/// adds Gaussian noise. Prices are not floored: with a negative base or large
/// noise the series can go negative, which the scheduler accepts.
#[derive(Debug, Clone)]
pub struct PriceProfile {
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

    /// Half-width of each peak in hours.
    pub peak_width_hours: f32,

    /// Standard deviation of the Gaussian noise (currency per kWh).
    pub noise_std: f32,

    /// Random number generator for noise generation.
    rng: StdRng,
}

impl PriceProfile {
    /// Creates a new price profile generator.
    ///
    /// # Panics
    ///
    /// Panics if `peak_width_hours` is not positive.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        base: f32,
        morning_amp: f32,
        morning_hour: f32,
        evening_amp: f32,
        evening_hour: f32,
        peak_width_hours: f32,
        noise_std: f32,
        seed: u64,
    ) -> Self {
        assert!(peak_width_hours > 0.0, "peak_width_hours must be > 0");
        Self {
            base,
            morning_amp,
            morning_hour,
            evening_amp,
            evening_hour,
            peak_width_hours,
            noise_std: noise_std.max(0.0),
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Raised-cosine bump centered on `center`, one at the center and zero
    /// beyond `peak_width_hours` on either side.
    fn bump(&self, hour: f32, center: f32) -> f32 {
        let dist = (hour - center).abs();
        if dist >= self.peak_width_hours {
            return 0.0;
        }
        0.5 * (1.0 + (std::f32::consts::PI * dist / self.peak_width_hours).cos())
    }

    /// Price for a single hour of the day (currency per kWh, may be negative).
    pub fn sample(&mut self, hour: usize) -> f32 {
        let h = (hour % HOURS_PER_DAY) as f32;
        self.base
            + self.morning_amp * self.bump(h, self.morning_hour)
            + self.evening_amp * self.bump(h, self.evening_hour)
            + gaussian_noise(&mut self.rng, self.noise_std)
    }

    /// Generates an hourly price series of the given horizon length.
    pub fn generate(&mut self, hours: usize) -> Vec<f32> {
        (0..hours).map(|h| self.sample(h)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile(noise_std: f32) -> PriceProfile {
        PriceProfile::new(0.10, 0.15, 7.0, 0.18, 18.0, 4.0, noise_std, 42)
    }

    #[test]
    fn generate_matches_horizon_length() {
        assert_eq!(profile(0.01).generate(24).len(), 24);
    }

    #[test]
    fn peaks_rise_above_the_base() {
        let mut p = profile(0.0);
        assert!((p.sample(7) - 0.25).abs() < 1e-5);
        assert!((p.sample(18) - 0.28).abs() < 1e-5);
    }

    #[test]
    fn price_off_peak_is_the_base() {
        let mut p = profile(0.0);
        // hour 0 is more than the peak width away from both centers
        assert!((p.sample(0) - 0.10).abs() < 1e-5);
        assert!((p.sample(12) - 0.10).abs() < 1e-5);
    }

    #[test]
    fn bump_tapers_to_zero_at_the_width() {
        let p = profile(0.0);
        assert_eq!(p.bump(11.0, 7.0), 0.0);
        assert!(p.bump(9.0, 7.0) > 0.0);
    }

    #[test]
    fn negative_base_yields_negative_prices() {
        let mut p = PriceProfile::new(-0.05, 0.0, 7.0, 0.0, 18.0, 4.0, 0.0, 42);
        assert!(p.sample(0) < 0.0);
    }

    #[test]
    fn deterministic_with_same_seed() {
        let mut a = profile(0.02);
        let mut b = profile(0.02);
        assert_eq!(a.generate(24), b.generate(24));
    }

    #[test]
    #[should_panic]
    fn zero_peak_width_panics() {
        PriceProfile::new(0.1, 0.1, 7.0, 0.1, 18.0, 0.0, 0.0, 42);
    }
}
