/// Mean Earth radius in meters, radius of the spherical Earth
/// approximation used for geographic reporting.
pub const MEAN_EARTH_RADIUS_M: f64 = 6_371_000.0;

/// Speed of light in vacuum, in m.s⁻¹
pub const SPEED_OF_LIGHT_M_S: f64 = 299_792_458.0;
