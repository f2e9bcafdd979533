//! Position estimates
use nalgebra::Vector3;

use crate::{cfg::Method, error::Error, geo::Geodetic};

/// Emitter position [Estimate], expressed in the frame the
/// [Station](crate::prelude::Station)s were expressed in.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Estimate {
    /// Estimated emitter position [m].
    pub position: Vector3<f64>,

    /// Estimated emitter to reference station range [m]. Only the
    /// linearized formulation resolves this auxiliary unknown.
    pub reference_range_m: Option<f64>,

    /// False when the iterative search exhausted its budget before
    /// reaching tolerance: best point found so far, to be inspected
    /// but not trusted as exact. Always true for the closed form.
    pub converged: bool,

    /// Iterations spent, 0 for the closed form.
    pub iterations: usize,

    /// [Method] that produced this estimate.
    pub method: Method,
}

impl Estimate {
    /// Projects this estimate onto the sphere of given radius [m],
    /// for geographic reporting. Fails with [Error::UndefinedLatitude]
    /// when the estimate lies outside the |z| <= radius domain.
    pub fn geodetic(&self, radius_m: f64) -> Result<Geodetic, Error> {
        Geodetic::from_ecef_m(self.position, radius_m)
    }
}
