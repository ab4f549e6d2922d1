use std::{f64::consts::PI, fs, path::Path};

use serde::Deserialize;

use crate::error::{Error, Result};
use crate::types::Color;

pub const SCREEN_WIDTH: f64 = 1500.0;
pub const SCREEN_HEIGHT: f64 = 1000.0;
pub const FPS: f64 = 60.0;
pub const MAX_TRAIL_LEN: usize = 100;

pub const GRAVITY_G: f64 = 2.5;
pub const DEFAULT_SOFTENING: f64 = 0.0;

pub const PARTICLE_RADIUS: f64 = 5.0;
pub const DEFAULT_PARTICLE_COLOR: Color = Color::WHITE;

pub const FRAG_Q_STAR: f64 = 20.0;
pub const FRAG_C_N: f64 = 0.5;
pub const FRAG_BETA: f64 = 1.0;
pub const FRAG_N_MIN: usize = 2;
pub const FRAG_ALPHA: f64 = 0.5;
pub const FRAG_PARETO_SHAPE: f64 = 1.5;
pub const FRAG_MIN_MASS: f64 = 0.05;
pub const FRAG_DENSITY: f64 = 0.05;
pub const FRAG_K_EJ: f64 = 0.3;
pub const FRAG_MAX_FRAGMENTS: usize = 8;
pub const FRAG_MAX_BREAKUP: f64 = 0.09;
pub const MIN_PARTICLE_RADIUS: f64 = 1.5;
pub const FRAGMENT_LIFETIME: u32 = 180;

/// Breakup model parameters.
///
/// ```yaml
/// fragmentation:
///   q_star: 20.0              # specific strength, threshold E* = q_star * victim mass
///   c_n: 0.5                  # scales both breakup fraction and fragment count
///   beta: 1.0                 # breakup fraction exponent
///   n_min: 2
///   alpha: 0.5                # fragment count exponent
///   pareto_shape: 1.5
///   min_mass: 0.05            # floor added to each raw Pareto draw
///   density: 0.05             # radius = sqrt(mass / (pi * density))
///   k_ej: 0.3                 # ejection speed scale
///   max_fragments: 8
///   max_breakup_fraction: 0.09
///   min_particle_radius: 1.5
///   fragment_lifetime: 180    # frames
/// ```
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct FragmentationConfig {
    pub q_star: f64,
    pub c_n: f64,
    pub beta: f64,
    pub n_min: usize,
    pub alpha: f64,
    pub pareto_shape: f64,
    pub min_mass: f64,
    pub density: f64,
    pub k_ej: f64,
    pub max_fragments: usize,
    pub max_breakup_fraction: f64,
    pub min_particle_radius: f64,
    pub fragment_lifetime: u32,
}

impl Default for FragmentationConfig {
    fn default() -> Self {
        Self {
            q_star: FRAG_Q_STAR,
            c_n: FRAG_C_N,
            beta: FRAG_BETA,
            n_min: FRAG_N_MIN,
            alpha: FRAG_ALPHA,
            pareto_shape: FRAG_PARETO_SHAPE,
            min_mass: FRAG_MIN_MASS,
            density: FRAG_DENSITY,
            k_ej: FRAG_K_EJ,
            max_fragments: FRAG_MAX_FRAGMENTS,
            max_breakup_fraction: FRAG_MAX_BREAKUP,
            min_particle_radius: MIN_PARTICLE_RADIUS,
            fragment_lifetime: FRAGMENT_LIFETIME,
        }
    }
}

impl FragmentationConfig {
    pub fn validate(&self) -> Result<()> {
        non_negative("q_star", self.q_star)?;
        non_negative("c_n", self.c_n)?;
        non_negative("beta", self.beta)?;
        non_negative("alpha", self.alpha)?;
        positive("pareto_shape", self.pareto_shape)?;
        positive("min_mass", self.min_mass)?;
        positive("density", self.density)?;
        non_negative("k_ej", self.k_ej)?;
        non_negative("min_particle_radius", self.min_particle_radius)?;
        if !(0.0..1.0).contains(&self.max_breakup_fraction) {
            return Err(Error::InvalidParam(
                "max_breakup_fraction must lie in [0, 1)".into(),
            ));
        }
        if self.n_min == 0 || self.n_min > self.max_fragments {
            return Err(Error::InvalidParam(
                "n_min must be >= 1 and <= max_fragments".into(),
            ));
        }
        Ok(())
    }

    /// radius = sqrt(m / (pi rho)), floored at `min_particle_radius`.
    pub fn radius_for_mass(&self, mass: f64) -> f64 {
        (mass / (PI * self.density))
            .sqrt()
            .max(self.min_particle_radius)
    }
}

/// Engine configuration, loadable from YAML. Missing keys take the defaults above.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct SimConfig {
    pub gravity: f64,
    pub softening: f64,
    pub width: f64,
    pub height: f64,
    pub fps: f64,
    pub trail_len: usize,
    /// Opt-in: leave overlapping pairs that already move apart alone instead of
    /// bouncing them back into each other. Off by default, so every overlapping pair
    /// is resolved once per frame.
    pub skip_separating: bool,
    pub fragmentation: FragmentationConfig,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            gravity: GRAVITY_G,
            softening: DEFAULT_SOFTENING,
            width: SCREEN_WIDTH,
            height: SCREEN_HEIGHT,
            fps: FPS,
            trail_len: MAX_TRAIL_LEN,
            skip_separating: false,
            fragmentation: FragmentationConfig::default(),
        }
    }
}

impl SimConfig {
    pub fn from_yaml_str(src: &str) -> Result<Self> {
        let cfg: SimConfig = serde_yaml::from_str(src)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let src = fs::read_to_string(path)?;
        Self::from_yaml_str(&src)
    }

    pub fn validate(&self) -> Result<()> {
        non_negative("gravity", self.gravity)?;
        non_negative("softening", self.softening)?;
        positive("width", self.width)?;
        positive("height", self.height)?;
        positive("fps", self.fps)?;
        self.fragmentation.validate()
    }

    /// Fixed timestep matching the configured frame rate.
    pub fn dt(&self) -> f64 {
        1.0 / self.fps
    }
}

fn non_negative(name: &str, value: f64) -> Result<()> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(Error::InvalidParam(format!("{name} must be finite and >= 0")))
    }
}

fn positive(name: &str, value: f64) -> Result<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(Error::InvalidParam(format!("{name} must be finite and > 0")))
    }
}
