use thiserror::Error;

/// Top-level error type for the massing pipeline.
#[derive(Debug, Error)]
pub enum MassingError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Solid(#[from] SolidError),
}

/// Errors raised while validating the configuration bundle.
///
/// These indicate caller mistakes and are fatal before any geometry
/// processing begins.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("parameter {parameter} = {value} is out of range [{min}, {max}]")]
    ParameterOutOfRange {
        parameter: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },

    #[error("unknown visual style: {0:?}")]
    UnknownStyle(String),
}

/// Errors related to the solid-operation store and roof synthesis.
#[derive(Debug, Error)]
pub enum SolidError {
    #[error("entity not found: {0}")]
    EntityNotFound(&'static str),

    #[error("invalid input: {0}")]
    InvalidInput(String),
}

/// Convenience type alias for results using [`MassingError`].
pub type Result<T> = std::result::Result<T, MassingError>;
