use thiserror::Error;

/// Solver errors. All are deterministic functions of the input:
/// never retried internally, always surfaced at the call that triggers them.
#[derive(Debug, PartialEq, Error)]
pub enum Error {
    /// Station coordinates and arrival times were provided as
    /// index aligned slices of unequal lengths.
    #[error("mismatched station / arrival time dimensions")]
    DimensionMismatch,

    /// The selected engine needs more stations than were provided.
    /// [LeastSquares](crate::prelude::Method::LeastSquares) resolves
    /// 4 unknowns from one equation per non reference station and
    /// needs 5 stations; [MaximumLikelihood](crate::prelude::Method::MaximumLikelihood)
    /// resolves 3 unknowns and needs 3.
    #[error("{required} stations required, {provided} provided")]
    NotEnoughStations {
        /// Engine minimum
        required: usize,
        /// What the [MeasurementSet](crate::prelude::MeasurementSet) contains
        provided: usize,
    },

    /// Signal propagation speed must be finite and strictly positive.
    #[error("propagation speed must be finite and > 0")]
    InvalidPropagationSpeed,

    /// The Gaussian arrival time noise deviation must be finite
    /// and strictly positive, otherwise the likelihood is undefined.
    #[error("noise sigma must be finite and > 0")]
    InvalidNoiseSigma,

    /// The likelihood search needs a nonzero iteration budget.
    #[error("iteration budget must be > 0")]
    InvalidIterationBudget,

    /// The normal matrix is singular or near singular: the station
    /// configuration (collinear, coincident..) does not provide 4
    /// independent constraints. We abort rather than invert an ill
    /// conditioned matrix and return garbage.
    #[error("degenerate station geometry")]
    DegenerateGeometry,

    /// |z| exceeds the radius of the reporting sphere and the latitude
    /// arcsine is undefined. Expected for noisy estimates that land off
    /// the sphere: surfaced, never clamped.
    #[error("|z| exceeds sphere radius: latitude is undefined")]
    UndefinedLatitude,
}
