//! TDOA measurements
use itertools::izip;
use nalgebra::Vector3;

use crate::error::Error;

/// One receiving [Station]: a fixed Cartesian position and the signal
/// arrival timestamp it reported.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Station {
    /// Position [m] in an Earth centered Cartesian frame.
    pub position: Vector3<f64>,
    /// Signal time of arrival [s]. All stations of a set share one time base.
    pub toa_s: f64,
}

impl Station {
    /// Builds a new [Station] from its Cartesian position [m]
    /// and the arrival timestamp [s] it reported.
    pub fn new(position: Vector3<f64>, toa_s: f64) -> Self {
        Self { position, toa_s }
    }

    /// Distance [m] from this station to an arbitrary point.
    pub(crate) fn distance_m(&self, point: &Vector3<f64>) -> f64 {
        (self.position - point).norm()
    }
}

/// One TDOA observation epoch: the ordered [Station]s and the shared
/// signal propagation speed. Built once, immutable, borrowed read only
/// by both engines. Station 0 is the reference of the linearized
/// formulation.
#[derive(Debug, Clone, PartialEq)]
pub struct MeasurementSet {
    /// Contributing [Station]s, index 0 is the reference.
    stations: Vec<Station>,
    /// Signal propagation speed [m/s], constant over all paths:
    /// no refraction, no multipath.
    pub propagation_speed_m_s: f64,
}

impl MeasurementSet {
    /// Builds a new [MeasurementSet] from [Station]s and the signal
    /// propagation speed [m/s].
    pub fn new(stations: Vec<Station>, propagation_speed_m_s: f64) -> Result<Self, Error> {
        if !propagation_speed_m_s.is_finite() || propagation_speed_m_s <= 0.0 {
            return Err(Error::InvalidPropagationSpeed);
        }
        Ok(Self {
            stations,
            propagation_speed_m_s,
        })
    }

    /// Builds a new [MeasurementSet] from index aligned position [m]
    /// and arrival time [s] slices. Slices of unequal lengths are
    /// rejected before anything else.
    pub fn from_slices(
        positions_m: &[Vector3<f64>],
        toas_s: &[f64],
        propagation_speed_m_s: f64,
    ) -> Result<Self, Error> {
        if positions_m.len() != toas_s.len() {
            return Err(Error::DimensionMismatch);
        }
        let stations = izip!(positions_m, toas_s)
            .map(|(position, toa_s)| Station::new(*position, *toa_s))
            .collect();
        Self::new(stations, propagation_speed_m_s)
    }

    /// Number of contributing [Station]s.
    pub fn len(&self) -> usize {
        self.stations.len()
    }

    /// True if no [Station] contributes.
    pub fn is_empty(&self) -> bool {
        self.stations.is_empty()
    }

    /// Read only view of the contributing [Station]s.
    pub fn stations(&self) -> &[Station] {
        &self.stations
    }

    /// Mean of all station positions. Always defined for a non empty set,
    /// serves as the likelihood search starting point.
    pub(crate) fn centroid(&self) -> Vector3<f64> {
        let mut sum = Vector3::<f64>::zeros();
        for station in &self.stations {
            sum += station.position;
        }
        sum / self.stations.len() as f64
    }

    /// Fails unless at least `required` stations contribute.
    pub(crate) fn require_stations(&self, required: usize) -> Result<(), Error> {
        let provided = self.stations.len();
        if provided < required {
            Err(Error::NotEnoughStations { required, provided })
        } else {
            Ok(())
        }
    }
}
