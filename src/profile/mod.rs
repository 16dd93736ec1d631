//! Synthetic forecast profiles for the demo driver.
//!
//! These generators produce the example price, load, and PV series the CLI
//! feeds to the scheduler. The scheduler itself never depends on them.

/// Sinusoidal household demand generator.
pub mod load;
/// Double-peak spot price generator.
pub mod price;
/// Daylight-shaped PV production generator.
pub mod solar;

// Re-export the main types for convenience
pub use load::LoadProfile;
pub use price::PriceProfile;
pub use solar::PvProfile;

use rand::{Rng, rngs::StdRng};

/// All generators repeat on a daily cycle of this many hours.
pub const HOURS_PER_DAY: usize = 24;

/// Utility function to generate Gaussian noise using Box-Muller transform.
///
/// # Arguments
///
/// * `rng` - Random number generator
/// * `std_dev` - Standard deviation of the noise
///
/// # Returns
///
/// Random value from a Gaussian distribution with mean 0 and specified standard deviation
pub fn gaussian_noise(rng: &mut StdRng, std_dev: f32) -> f32 {
    if std_dev <= 0.0 {
        return 0.0;
    }

    let u1: f32 = rng.random::<f32>().clamp(1e-6, 1.0);
    let u2: f32 = rng.random::<f32>();
    let z0 = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f32::consts::PI * u2).cos();
    z0 * std_dev
}
