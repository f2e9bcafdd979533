#[cfg(feature = "serde")]
use serde::Deserialize;

use crate::constants::MEAN_EARTH_RADIUS_M;
use crate::error::Error;

fn default_noise_sigma() -> f64 {
    1.0
}

fn default_max_iterations() -> usize {
    5_000
}

fn default_tolerance_m() -> f64 {
    1.0E-3
}

fn default_reporting_radius_m() -> f64 {
    MEAN_EARTH_RADIUS_M
}

/// Solving method
#[derive(Default, Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Deserialize))]
pub enum Method {
    /// Closed form linearized least squares around the reference
    /// station. One pass, no iteration. Also resolves the emitter to
    /// reference station range as an auxiliary unknown.
    /// Requires 5 stations.
    #[default]
    LeastSquares,
    /// Maximum likelihood estimation under a Gaussian arrival time
    /// noise model, minimized with a derivative free simplex search.
    /// Requires 3 stations, more reduce the estimation variance.
    MaximumLikelihood,
}

impl std::fmt::Display for Method {
    fn fmt(&self, fmt: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Self::LeastSquares => write!(fmt, "LS"),
            Self::MaximumLikelihood => write!(fmt, "MLE"),
        }
    }
}

/// Solver parametrization
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Deserialize))]
pub struct Config {
    /// Estimation [Method] to be used.
    #[cfg_attr(feature = "serde", serde(default))]
    pub method: Method,

    /// Standard deviation [s] of the Gaussian arrival time noise assumed
    /// by [Method::MaximumLikelihood]. A uniform rescale of the objective:
    /// it moves the likelihood value, never the location of its minimum.
    #[cfg_attr(feature = "serde", serde(default = "default_noise_sigma"))]
    pub noise_sigma: f64,

    /// Iteration budget for the simplex search, bounds worst case latency.
    #[cfg_attr(feature = "serde", serde(default = "default_max_iterations"))]
    pub max_iterations: usize,

    /// Simplex diameter [m] under which the search is declared converged.
    #[cfg_attr(feature = "serde", serde(default = "default_tolerance_m"))]
    pub convergence_tolerance_m: f64,

    /// Radius [m] of the sphere used when reporting estimates
    /// geographically. Defaults to [MEAN_EARTH_RADIUS_M], override for
    /// non Earth or hypothetical scenarios.
    #[cfg_attr(feature = "serde", serde(default = "default_reporting_radius_m"))]
    pub reporting_radius_m: f64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            method: Method::default(),
            noise_sigma: default_noise_sigma(),
            max_iterations: default_max_iterations(),
            convergence_tolerance_m: default_tolerance_m(),
            reporting_radius_m: default_reporting_radius_m(),
        }
    }
}

impl Config {
    /// Returns [Config] with desired [Method]
    pub fn with_method(&self, method: Method) -> Self {
        let mut s = *self;
        s.method = method;
        s
    }

    /// Returns [Config] with desired arrival time noise deviation [s]
    pub fn with_noise_sigma(&self, noise_sigma: f64) -> Self {
        let mut s = *self;
        s.noise_sigma = noise_sigma;
        s
    }

    /// Returns [Config] with desired iteration budget
    pub fn with_max_iterations(&self, max_iterations: usize) -> Self {
        let mut s = *self;
        s.max_iterations = max_iterations;
        s
    }

    /// Returns [Config] with desired convergence tolerance [m]
    pub fn with_convergence_tolerance(&self, tolerance_m: f64) -> Self {
        let mut s = *self;
        s.convergence_tolerance_m = tolerance_m;
        s
    }

    /// Returns [Config] with desired geographic reporting radius [m]
    pub fn with_reporting_radius(&self, radius_m: f64) -> Self {
        let mut s = *self;
        s.reporting_radius_m = radius_m;
        s
    }

    /// Rejects unusable parametrizations before any solving attempt.
    pub(crate) fn validate(&self) -> Result<(), Error> {
        if !self.noise_sigma.is_finite() || self.noise_sigma <= 0.0 {
            return Err(Error::InvalidNoiseSigma);
        }
        if self.max_iterations == 0 {
            return Err(Error::InvalidIterationBudget);
        }
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::{Config, Method};
    use crate::error::Error;

    #[test]
    fn default_preset() {
        let cfg = Config::default();
        assert_eq!(cfg.method, Method::LeastSquares);
        assert_eq!(cfg.noise_sigma, 1.0);
        assert_eq!(cfg.max_iterations, 5_000);
        assert_eq!(cfg.convergence_tolerance_m, 1.0E-3);
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn builder() {
        let cfg = Config::default()
            .with_method(Method::MaximumLikelihood)
            .with_noise_sigma(1.0E-9)
            .with_max_iterations(100)
            .with_convergence_tolerance(1.0);
        assert_eq!(cfg.method, Method::MaximumLikelihood);
        assert_eq!(cfg.noise_sigma, 1.0E-9);
        assert_eq!(cfg.max_iterations, 100);
        assert_eq!(cfg.convergence_tolerance_m, 1.0);
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn invalid_presets() {
        assert_eq!(
            Config::default().with_noise_sigma(0.0).validate(),
            Err(Error::InvalidNoiseSigma),
        );
        assert_eq!(
            Config::default().with_noise_sigma(f64::NAN).validate(),
            Err(Error::InvalidNoiseSigma),
        );
        assert_eq!(
            Config::default().with_max_iterations(0).validate(),
            Err(Error::InvalidIterationBudget),
        );
    }
}
