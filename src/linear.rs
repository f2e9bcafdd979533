//! Linearized TDOA least squares
use log::debug;
use nalgebra::{DVector, MatrixXx4, Vector3};

use crate::{cfg::Method, error::Error, estimate::Estimate, measurements::MeasurementSet};

/// Conditioning floor: smallest to largest singular value ratio of the
/// normal matrix under which the geometry is declared degenerate.
const CONDITIONING_FLOOR: f64 = 1.0E-9;

/// Closed form TDOA engine. Expands the squared range difference
/// identity |Pᵢ - P|² - |P₀ - P|² = dᵢ² + 2 dᵢ R₀ around the reference
/// station (station 0), which turns the hyperbolic TDOA equations into
/// one linear equation per non reference station in the 4 unknowns
/// (x, y, z, R₀), solved by ordinary least squares. No iteration.
pub struct LinearSolver {}

impl LinearSolver {
    /// One equation per non reference station, 4 equations needed
    /// for the 4 unknowns.
    pub const MIN_STATIONS: usize = 5;

    /// Resolves the emitter position and reference range from `set`,
    /// leaving it untouched.
    ///
    /// ## Input
    /// - set: [MeasurementSet] with at least [Self::MIN_STATIONS]
    ///   stations, station 0 acting as the reference
    ///
    /// ## Returns
    /// - [Estimate] with both position and reference range resolved,
    ///   exactly determined with 5 stations, least squares beyond.
    pub fn resolve(set: &MeasurementSet) -> Result<Estimate, Error> {
        set.require_stations(Self::MIN_STATIONS)?;

        let stations = set.stations();
        let reference = &stations[0];
        let speed = set.propagation_speed_m_s;

        let rows = stations.len() - 1;
        let mut h = MatrixXx4::<f64>::zeros(rows);
        let mut k = DVector::<f64>::zeros(rows);

        for (row, station) in stations.iter().skip(1).enumerate() {
            let dp = station.position - reference.position;
            let dt = station.toa_s - reference.toa_s;
            let range_diff = speed * dt;

            h[(row, 0)] = -2.0 * dp[0];
            h[(row, 1)] = -2.0 * dp[1];
            h[(row, 2)] = -2.0 * dp[2];
            h[(row, 3)] = -2.0 * range_diff;

            k[row] = range_diff.powi(2) - station.position.norm_squared()
                + reference.position.norm_squared();
        }

        let ht = h.transpose();
        let normal = &ht * &h;

        let singular_values = normal.singular_values();
        let (s_max, s_min) = (singular_values.max(), singular_values.min());
        if s_min <= s_max * CONDITIONING_FLOOR {
            return Err(Error::DegenerateGeometry);
        }

        let beta = normal.try_inverse().ok_or(Error::DegenerateGeometry)? * (ht * k);

        debug!(
            "ls: position ({:.3E}, {:.3E}, {:.3E}) m, reference range {:.3E} m",
            beta[0], beta[1], beta[2], beta[3],
        );

        Ok(Estimate {
            position: Vector3::new(beta[0], beta[1], beta[2]),
            reference_range_m: Some(beta[3]),
            converged: true,
            iterations: 0,
            method: Method::LeastSquares,
        })
    }
}
