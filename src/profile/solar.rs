use rand::{SeedableRng, rngs::StdRng};

use super::{HOURS_PER_DAY, gaussian_noise};

/// A PV production profile generator shaped by daylight hours.
///
/// `PvProfile` produces a half-sine generation curve between sunrise and
/// sunset with a configurable peak and multiplicative noise for weather
/// variation. Production is zero at night and never negative.
#[derive(Debug, Clone)]
pub struct PvProfile {
    /// Peak hourly production under ideal conditions (kWh).
    pub kwh_peak: f32,

    /// Hour of day when production starts (inclusive).
    pub sunrise_hour: usize,

    /// Hour of day when production ends (exclusive).
    pub sunset_hour: usize,

    /// Standard deviation of the noise as a fraction of output.
    pub noise_std: f32,

    /// Random number generator for noise generation.
    rng: StdRng,
}

impl PvProfile {
    /// Creates a new PV profile generator.
    ///
    /// # Panics
    ///
    /// Panics if `sunrise_hour >= sunset_hour` or `sunset_hour > 24`.
    pub fn new(
        kwh_peak: f32,
        sunrise_hour: usize,
        sunset_hour: usize,
        noise_std: f32,
        seed: u64,
    ) -> Self {
        assert!(sunrise_hour < sunset_hour && sunset_hour <= HOURS_PER_DAY);
        Self {
            kwh_peak: kwh_peak.max(0.0),
            sunrise_hour,
            sunset_hour,
            noise_std: noise_std.max(0.0),
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Daylight fraction at the given hour of day: a half-sine rising from
    /// zero at sunrise to one at solar noon and back to zero at sunset.
    fn daylight_frac(&self, hour: usize) -> f32 {
        let h = hour % HOURS_PER_DAY;
        if h < self.sunrise_hour || h >= self.sunset_hour {
            return 0.0;
        }
        let span = (self.sunset_hour - self.sunrise_hour) as f32;
        let pos = (h - self.sunrise_hour) as f32 / span;
        (std::f32::consts::PI * pos).sin().max(0.0)
    }

    /// Production for a single hour of the day (kWh, non-negative).
    pub fn sample_kwh(&mut self, hour: usize) -> f32 {
        let frac = self.daylight_frac(hour);
        if frac <= 0.0 {
            return 0.0;
        }
        let noise_mult = 1.0 + gaussian_noise(&mut self.rng, self.noise_std);
        (self.kwh_peak * frac * noise_mult).max(0.0)
    }

    /// Generates an hourly production series of the given horizon length.
    pub fn generate(&mut self, hours: usize) -> Vec<f32> {
        (0..hours).map(|h| self.sample_kwh(h)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_production_at_night() {
        let mut pv = PvProfile::new(4.8, 6, 18, 0.0, 42);
        assert_eq!(pv.sample_kwh(0), 0.0);
        assert_eq!(pv.sample_kwh(5), 0.0);
        assert_eq!(pv.sample_kwh(18), 0.0);
        assert_eq!(pv.sample_kwh(23), 0.0);
    }

    #[test]
    fn peak_production_at_solar_noon() {
        let mut pv = PvProfile::new(4.8, 6, 18, 0.0, 42);
        let noon = pv.sample_kwh(12);
        assert!(noon > 4.7 && noon <= 4.8);
    }

    #[test]
    fn morning_and_afternoon_are_symmetric() {
        let pv = PvProfile::new(4.8, 6, 18, 0.0, 42);
        assert!((pv.daylight_frac(9) - pv.daylight_frac(15)).abs() < 1e-5);
    }

    #[test]
    fn production_is_never_negative() {
        let mut pv = PvProfile::new(4.8, 6, 18, 0.5, 42);
        for kwh in pv.generate(48) {
            assert!(kwh >= 0.0);
        }
    }

    #[test]
    fn negative_peak_clamped_to_zero() {
        let pv = PvProfile::new(-1.0, 6, 18, 0.05, 42);
        assert_eq!(pv.kwh_peak, 0.0);
    }

    #[test]
    #[should_panic]
    fn sunset_before_sunrise_panics() {
        PvProfile::new(4.8, 18, 6, 0.05, 42);
    }

    #[test]
    #[should_panic]
    fn sunset_past_midnight_panics() {
        PvProfile::new(4.8, 6, 25, 0.05, 42);
    }

    #[test]
    fn deterministic_with_same_seed() {
        let mut a = PvProfile::new(4.8, 6, 18, 0.1, 42);
        let mut b = PvProfile::new(4.8, 6, 18, 0.1, 42);
        assert_eq!(a.generate(24), b.generate(24));
    }
}
