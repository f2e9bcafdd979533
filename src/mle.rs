//! Maximum likelihood TDOA engine
use std::f64::consts::PI;

use log::{debug, warn};
use nalgebra::Vector3;

use crate::{
    cfg::{Config, Method},
    error::Error,
    estimate::Estimate,
    measurements::MeasurementSet,
};

// Nelder Mead coefficients.
const REFLECTION: f64 = 1.0;
const EXPANSION: f64 = 2.0;
const CONTRACTION: f64 = 0.5;
const SHRINKAGE: f64 = 0.5;

/// Initial simplex edge, as a fraction of the station spread.
const SIMPLEX_SCALE: f64 = 0.05;

#[derive(Debug, Clone, Copy)]
struct Vertex {
    point: Vector3<f64>,
    value: f64,
}

impl Vertex {
    fn new<F: Fn(&Vector3<f64>) -> f64>(point: Vector3<f64>, objective: &F) -> Self {
        let value = objective(&point);
        Self { point, value }
    }
}

/// Maximum likelihood TDOA engine. Models each arrival time as the
/// exact propagation delay plus iid zero mean Gaussian noise, and
/// searches the position minimizing the negative log likelihood with
/// a derivative free Nelder Mead simplex, started at the station
/// centroid. Station clocks are assumed synchronized: no clock bias
/// unknown, 3 unknowns only.
pub struct MleSolver {}

impl MleSolver {
    /// 3 unknowns: theoretical minimum.
    pub const MIN_STATIONS: usize = 3;

    /// Resolves the emitter position from `set`, leaving it untouched.
    ///
    /// ## Input
    /// - set: [MeasurementSet] with at least [Self::MIN_STATIONS] stations
    /// - cfg: [Config] providing noise sigma, iteration budget and
    ///   convergence tolerance
    ///
    /// ## Returns
    /// - [Estimate] with position resolved and no reference range.
    ///   An exhausted iteration budget is not fatal: the best point
    ///   found is returned with `converged: false`, the caller decides
    ///   whether to accept it.
    pub fn resolve(set: &MeasurementSet, cfg: &Config) -> Result<Estimate, Error> {
        cfg.validate()?;
        set.require_stations(Self::MIN_STATIONS)?;

        let start = set.centroid();
        let spread_m = set
            .stations()
            .iter()
            .map(|station| (station.position - start).norm())
            .fold(0.0, f64::max);
        let edge_m = (spread_m * SIMPLEX_SCALE).max(1.0);

        // The normalization term of the log likelihood is constant in the
        // position: minimizing the standardized residual sum locates the
        // same minimum without burying tiny near-optimum differences
        // under a large constant.
        let sigma = cfg.noise_sigma;
        let objective = |point: &Vector3<f64>| Self::residual_ssq(point, set, sigma);

        let (position, converged, iterations) = Self::minimize(&objective, start, edge_m, cfg);

        if converged {
            debug!("mle: converged after {} iterations", iterations);
        } else {
            warn!(
                "mle: {} iterations exhausted before tolerance, estimate is best effort",
                cfg.max_iterations,
            );
        }

        Ok(Estimate {
            position,
            reference_range_m: None,
            converged,
            iterations,
            method: Method::MaximumLikelihood,
        })
    }

    /// Negative log likelihood of the observed arrival times for an
    /// emitter at `position`, under iid zero mean Gaussian arrival time
    /// noise of deviation `sigma` [s]. Lower is more likely.
    pub fn negative_log_likelihood(
        position: &Vector3<f64>,
        set: &MeasurementSet,
        sigma: f64,
    ) -> f64 {
        let n = set.len() as f64;
        0.5 * Self::residual_ssq(position, set, sigma)
            + 0.5 * n * (2.0 * PI * sigma.powi(2)).ln()
    }

    /// Sum of squared standardized arrival time residuals: the position
    /// dependent part of the negative log likelihood.
    fn residual_ssq(position: &Vector3<f64>, set: &MeasurementSet, sigma: f64) -> f64 {
        let speed = set.propagation_speed_m_s;
        set.stations()
            .iter()
            .map(|station| {
                let expected_s = station.distance_m(position) / speed;
                ((station.toa_s - expected_s) / sigma).powi(2)
            })
            .sum()
    }

    /// Nelder Mead over R³. Returns the best point, whether the simplex
    /// collapsed below tolerance, and the iterations spent.
    fn minimize<F: Fn(&Vector3<f64>) -> f64>(
        objective: &F,
        start: Vector3<f64>,
        edge_m: f64,
        cfg: &Config,
    ) -> (Vector3<f64>, bool, usize) {
        let mut vertices = vec![Vertex::new(start, objective)];
        for axis in 0..3 {
            let mut point = start;
            point[axis] += edge_m;
            vertices.push(Vertex::new(point, objective));
        }

        for iteration in 1..=cfg.max_iterations {
            vertices.sort_by(|a, b| {
                a.value
                    .partial_cmp(&b.value)
                    .unwrap_or(std::cmp::Ordering::Equal)
            });

            let diameter = vertices[1..]
                .iter()
                .map(|vertex| (vertex.point - vertices[0].point).norm())
                .fold(0.0, f64::max);
            if diameter < cfg.convergence_tolerance_m {
                return (vertices[0].point, true, iteration);
            }

            let best = vertices[0];
            let second_worst = vertices[2];
            let worst = vertices[3];
            let centroid = (vertices[0].point + vertices[1].point + vertices[2].point) / 3.0;

            let reflected =
                Vertex::new(centroid + (centroid - worst.point) * REFLECTION, objective);

            if reflected.value < best.value {
                let expanded = Vertex::new(
                    centroid + (reflected.point - centroid) * EXPANSION,
                    objective,
                );
                vertices[3] = if expanded.value < reflected.value {
                    expanded
                } else {
                    reflected
                };
            } else if reflected.value < second_worst.value {
                vertices[3] = reflected;
            } else {
                let towards = if reflected.value < worst.value {
                    reflected.point
                } else {
                    worst.point
                };
                let contracted =
                    Vertex::new(centroid + (towards - centroid) * CONTRACTION, objective);
                if contracted.value < worst.value.min(reflected.value) {
                    vertices[3] = contracted;
                } else {
                    for i in 1..4 {
                        let point =
                            best.point + (vertices[i].point - best.point) * SHRINKAGE;
                        vertices[i] = Vertex::new(point, objective);
                    }
                }
            }
        }

        vertices.sort_by(|a, b| {
            a.value
                .partial_cmp(&b.value)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        (vertices[0].point, false, cfg.max_iterations)
    }
}
