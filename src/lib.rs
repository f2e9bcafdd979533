#![doc = include_str!("../README.md")]
#![cfg_attr(docrs, feature(doc_cfg))]

// private modules
mod cfg;
mod constants;
mod error;
mod estimate;
mod geo;
mod linear;
mod measurements;
mod mle;
mod solver;

#[cfg(test)]
mod tests;

// prelude
pub mod prelude {
    pub use crate::cfg::{Config, Method};
    pub use crate::constants::{MEAN_EARTH_RADIUS_M, SPEED_OF_LIGHT_M_S};
    pub use crate::estimate::Estimate;
    pub use crate::geo::Geodetic;
    pub use crate::linear::LinearSolver;
    pub use crate::measurements::{MeasurementSet, Station};
    pub use crate::mle::MleSolver;
    pub use crate::solver::Solver;
    pub use crate::Error;
    // re-export
    pub use nalgebra::Vector3;
}

// pub export
pub use error::Error;
