//! Configuration for the expression evaluator.
//!
//! All types implement [`serde::Deserialize`] and every section falls back to
//! its defaults when omitted, so an empty TOML document is a valid
//! configuration.
//!
//! # Overview
//!
//! - [`EngineConfig`] - Top-level configuration combining every section.
//! - [`ToleranceConfig`] - Tolerance used when comparing resolved values.
//! - [`RootsConfig`] - Sampling and bisection settings for plot intersections.
//! - [`DefaultsConfig`] - Fallback sizes and the default viewport.
//!
//! # Example
//!
//! ```
//! # use compass::config::EngineConfig;
//! let config = EngineConfig::from_toml_str(
//!     r#"
//!     [roots]
//!     samples = 1000
//!
//!     [defaults.viewport]
//!     x = [-5.0, 5.0]
//!     "#,
//! )
//! .unwrap();
//!
//! assert_eq!(config.roots().samples(), 1000);
//! assert_eq!(config.defaults().viewport().x(), (-5.0, 5.0));
//! assert_eq!(config.defaults().angle_radius(), 0.8);
//! ```

use std::{fs, io, path::Path};

use log::{debug, info};
use serde::Deserialize;
use thiserror::Error;

use compass_core::roots::RootFinderConfig;

/// Configuration loading errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read configuration: {0}")]
    Io(#[from] io::Error),

    #[error("Failed to parse TOML configuration: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),
}

/// Top-level evaluator configuration.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct EngineConfig {
    #[serde(default)]
    tolerance: ToleranceConfig,

    #[serde(default)]
    roots: RootsConfig,

    #[serde(default)]
    defaults: DefaultsConfig,
}

impl EngineConfig {
    pub fn new(tolerance: ToleranceConfig, roots: RootsConfig, defaults: DefaultsConfig) -> Self {
        Self {
            tolerance,
            roots,
            defaults,
        }
    }

    /// Parses and validates a TOML document.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for malformed TOML and
    /// [`ConfigError::Validation`] for out-of-range values.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn tolerance(&self) -> &ToleranceConfig {
        &self.tolerance
    }

    pub fn roots(&self) -> &RootsConfig {
        &self.roots
    }

    pub fn defaults(&self) -> &DefaultsConfig {
        &self.defaults
    }

    /// Checks every section for values the evaluator cannot work with.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Validation`] describing the first bad value.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.tolerance.equality > 0.0) {
            return Err(ConfigError::Validation(
                "tolerance.equality must be positive".to_string(),
            ));
        }
        if self.roots.samples < 2 {
            return Err(ConfigError::Validation(
                "roots.samples must be at least 2".to_string(),
            ));
        }
        if !(self.roots.tolerance > 0.0) {
            return Err(ConfigError::Validation(
                "roots.tolerance must be positive".to_string(),
            ));
        }
        if self.defaults.plot_samples < 2 {
            return Err(ConfigError::Validation(
                "defaults.plot_samples must be at least 2".to_string(),
            ));
        }
        for (name, (min, max)) in [
            ("x", self.defaults.viewport.x),
            ("y", self.defaults.viewport.y),
            ("z", self.defaults.viewport.z),
        ] {
            if !(min < max) {
                return Err(ConfigError::Validation(format!(
                    "defaults.viewport.{name} must be an increasing range, got [{min}, {max}]"
                )));
            }
        }
        Ok(())
    }
}

/// Tolerances for comparing resolved values.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ToleranceConfig {
    /// Maximum per-value difference for two resolved values to be equal.
    equality: f64,
}

impl ToleranceConfig {
    pub fn equality(&self) -> f64 {
        self.equality
    }
}

impl Default for ToleranceConfig {
    fn default() -> Self {
        Self { equality: 1e-9 }
    }
}

/// Settings for the plot-vs-plot root finder.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct RootsConfig {
    samples: usize,
    tolerance: f64,
    max_iterations: usize,
}

impl RootsConfig {
    pub fn samples(&self) -> usize {
        self.samples
    }

    pub fn tolerance(&self) -> f64 {
        self.tolerance
    }

    pub fn max_iterations(&self) -> usize {
        self.max_iterations
    }

    /// The settings in the form the root finder takes them.
    pub fn to_finder_config(&self) -> RootFinderConfig {
        RootFinderConfig {
            samples: self.samples,
            tolerance: self.tolerance,
            max_iterations: self.max_iterations,
        }
    }
}

impl Default for RootsConfig {
    fn default() -> Self {
        let finder = RootFinderConfig::default();
        Self {
            samples: finder.samples,
            tolerance: finder.tolerance,
            max_iterations: finder.max_iterations,
        }
    }
}

/// Fallback values used when an expression leaves something unspecified.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct DefaultsConfig {
    /// Arc radius of angle markers.
    angle_radius: f64,
    /// Length of tangent lines.
    tangent_length: f64,
    /// Number of samples in a plot's command polyline.
    plot_samples: usize,
    viewport: ViewportConfig,
}

impl DefaultsConfig {
    pub fn angle_radius(&self) -> f64 {
        self.angle_radius
    }

    pub fn tangent_length(&self) -> f64 {
        self.tangent_length
    }

    pub fn plot_samples(&self) -> usize {
        self.plot_samples
    }

    pub fn viewport(&self) -> &ViewportConfig {
        &self.viewport
    }
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            angle_radius: compass_core::shape::DEFAULT_ANGLE_RADIUS,
            tangent_length: compass_core::circle::DEFAULT_TANGENT_LENGTH,
            plot_samples: 200,
            viewport: ViewportConfig::default(),
        }
    }
}

/// Axis ranges used when no graph argument supplies them.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ViewportConfig {
    x: (f64, f64),
    y: (f64, f64),
    /// Only used by 3D graphs.
    z: (f64, f64),
}

impl ViewportConfig {
    pub fn x(&self) -> (f64, f64) {
        self.x
    }

    pub fn y(&self) -> (f64, f64) {
        self.y
    }

    pub fn z(&self) -> (f64, f64) {
        self.z
    }
}

impl Default for ViewportConfig {
    fn default() -> Self {
        Self {
            x: (-10.0, 10.0),
            y: (-10.0, 10.0),
            z: (-10.0, 10.0),
        }
    }
}

/// Loads and validates an [`EngineConfig`] from a TOML file.
///
/// # Errors
///
/// Returns error if:
/// - The file cannot be read
/// - TOML parsing fails
/// - A value fails validation
pub fn load_config(path: impl AsRef<Path>) -> Result<EngineConfig, ConfigError> {
    let path = path.as_ref();
    info!(path = path.display().to_string(); "Loading configuration");

    let content = fs::read_to_string(path)?;
    let config = EngineConfig::from_toml_str(&content)?;

    debug!(config:?; "Configuration loaded");
    Ok(config)
}
