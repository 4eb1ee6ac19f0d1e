//! Core aerodynamic math utilities
//!
//! Includes:
//! - Vector alias & span reflection
//! - Angle conversions
//! - Atmosphere density (humid air)
//! - Free-stream representation
//!
//! Axes follow the lattice convention used across the workspace:
//! x downstream (root chord direction), y along the starboard span, z up.

use serde::{Deserialize, Serialize};

/// 3-D vector used for every point and velocity in the workspace.
pub type Vec3 = nalgebra::Vector3<f64>;

/// Sea-level density of the standard atmosphere [kg/m³]
pub const RHO_SEA_LEVEL: f64 = 1.225;

/// -------------------------
/// Vectors
/// -------------------------

/// Reflect a point (or velocity) across the symmetry plane y = 0.
#[inline]
pub fn reflect_span(v: &Vec3) -> Vec3 {
    Vec3::new(v.x, -v.y, v.z)
}

/// True if every component is finite.
#[inline]
pub fn is_finite_vec(v: &Vec3) -> bool {
    v.iter().all(|c| c.is_finite())
}

/// -------------------------
/// Angles
/// -------------------------

pub fn deg_to_rad(deg: f64) -> f64 { deg.to_radians() }

/// -------------------------
/// Atmosphere
/// -------------------------

/// Compute air density [kg/m³] from temperature [°C], pressure [hPa], humidity [%]
pub fn air_density(temp_c: f64, pressure_hpa: f64, humidity_pct: f64) -> f64 {
    // Convert inputs
    let t_kelvin = temp_c + 273.15;
    let p_pa = pressure_hpa * 100.0;
    let rh = (humidity_pct / 100.0).clamp(0.0, 1.0);

    // Constants
    let r_dry = 287.05;    // J/(kg·K)
    let r_vapor = 461.495; // J/(kg·K)

    // Saturation vapor pressure over water (Tetens formula)
    let es = 610.94 * f64::exp((17.625 * temp_c) / (temp_c + 243.04));
    let e = rh * es; // actual vapor pressure

    let pd = p_pa - e; // dry air partial pressure

    (pd / (r_dry * t_kelvin)) + (e / (r_vapor * t_kelvin))
}

/// Ambient conditions used when the density is not given directly.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Atmosphere {
    pub temperature_c: f64,   // °C
    pub pressure_hpa: f64,    // hPa
    pub humidity_pct: f64,    // 0..100
}

impl Atmosphere {
    /// ISA sea level, dry air.
    pub fn standard() -> Self {
        Self { temperature_c: 15.0, pressure_hpa: 1013.25, humidity_pct: 0.0 }
    }

    pub fn density(&self) -> f64 {
        air_density(self.temperature_c, self.pressure_hpa, self.humidity_pct)
    }
}

impl Default for Atmosphere {
    fn default() -> Self { Self::standard() }
}

/// -------------------------
/// Free stream
/// -------------------------

/// Uniform onset flow. The flow lies in the x–z plane; `alpha` tilts it
/// upward, so a wing lying in z = 0 sees a positive angle of attack.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Freestream {
    pub speed: f64,   // m/s
    pub alpha: f64,   // rad
    pub density: f64, // kg/m³
}

impl Freestream {
    pub fn new(speed: f64, alpha: f64, density: f64) -> Self {
        Self { speed, alpha, density }
    }

    /// Convenience constructor taking the angle of attack in degrees.
    pub fn from_degrees(speed: f64, alpha_deg: f64, density: f64) -> Self {
        Self::new(speed, deg_to_rad(alpha_deg), density)
    }

    /// Unit vector along the onset flow.
    pub fn direction(&self) -> Vec3 {
        Vec3::new(self.alpha.cos(), 0.0, self.alpha.sin())
    }

    /// Free-stream velocity vector [m/s]
    pub fn velocity(&self) -> Vec3 {
        self.direction() * self.speed
    }

    /// q = ½ ρ V² [Pa]
    pub fn dynamic_pressure(&self) -> f64 {
        0.5 * self.density * self.speed * self.speed
    }

    /// Same flow at a different angle of attack [rad].
    #[must_use]
    pub fn with_alpha(&self, alpha: f64) -> Self {
        Self { alpha, ..*self }
    }
}

/* -------------------------------- tests -------------------------------- */
