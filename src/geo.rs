//! Spherical Earth coordinates
use nalgebra::Vector3;

use crate::error::Error;

/// Geographic coordinates under the spherical Earth approximation.
/// The sphere radius is never stored: it is an explicit parameter of
/// both projections, so hypothetical (non Earth) scenarios remain easy
/// to express.
#[derive(Default, Debug, Clone, Copy, PartialEq)]
pub struct Geodetic {
    /// Latitude [ddeg]
    pub lat_deg: f64,
    /// Longitude [ddeg]
    pub long_deg: f64,
}

impl Geodetic {
    /// Builds [Geodetic] coordinates from latitude and longitude,
    /// both in decimal degrees.
    pub fn new(lat_deg: f64, long_deg: f64) -> Self {
        Self { lat_deg, long_deg }
    }

    /// Projects a Cartesian point [m] onto the sphere of given radius [m].
    /// The point does not have to lie exactly on the sphere (noisy
    /// position estimates generally will not), but |z| may not exceed the
    /// radius: past that the latitude arcsine is undefined and we surface
    /// [Error::UndefinedLatitude] rather than clamp.
    pub fn from_ecef_m(ecef_m: Vector3<f64>, radius_m: f64) -> Result<Self, Error> {
        let sin_lat = ecef_m[2] / radius_m;
        if sin_lat.abs() > 1.0 {
            return Err(Error::UndefinedLatitude);
        }
        Ok(Self {
            lat_deg: sin_lat.asin().to_degrees(),
            long_deg: ecef_m[1].atan2(ecef_m[0]).to_degrees(),
        })
    }

    /// Maps these coordinates to the Cartesian point [m] lying exactly
    /// on the sphere of given radius [m].
    pub fn to_ecef_m(&self, radius_m: f64) -> Vector3<f64> {
        let lat_rad = self.lat_deg.to_radians();
        let long_rad = self.long_deg.to_radians();
        Vector3::new(
            radius_m * lat_rad.cos() * long_rad.cos(),
            radius_m * lat_rad.cos() * long_rad.sin(),
            radius_m * lat_rad.sin(),
        )
    }
}
