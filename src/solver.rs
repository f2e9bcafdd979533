//! Emitter position solver
use log::{debug, info};

use crate::{
    cfg::{Config, Method},
    error::Error,
    estimate::Estimate,
    linear::LinearSolver,
    measurements::MeasurementSet,
    mle::MleSolver,
};

/// [Solver] resolves emitter position [Estimate]s from TDOA
/// [MeasurementSet]s, using the [Method] selected in its [Config].
/// Stateless: each resolution is a pure function of its input, and
/// independent [MeasurementSet]s may be resolved concurrently.
#[derive(Debug, Clone)]
pub struct Solver {
    /// Solver parametrization
    pub cfg: Config,
}

impl Solver {
    /// Builds a new [Solver] from a [Config] preset.
    /// Unusable parametrizations are rejected here, before any
    /// resolution attempt.
    pub fn new(cfg: Config) -> Result<Self, Error> {
        cfg.validate()?;
        Ok(Self { cfg })
    }

    /// Resolves one emitter position [Estimate] from `set`.
    pub fn resolve(&self, set: &MeasurementSet) -> Result<Estimate, Error> {
        let estimate = match self.cfg.method {
            Method::LeastSquares => LinearSolver::resolve(set)?,
            Method::MaximumLikelihood => MleSolver::resolve(set, &self.cfg)?,
        };

        match estimate.geodetic(self.cfg.reporting_radius_m) {
            Ok(geo) => info!(
                "({}) estimate lat={:.5}° long={:.5}°",
                self.cfg.method, geo.lat_deg, geo.long_deg,
            ),
            Err(_) => debug!(
                "({}) estimate lies off the reporting sphere",
                self.cfg.method,
            ),
        }

        Ok(estimate)
    }
}
