//! Error types for the spatial index.

use thiserror::Error;

/// Spatial index errors.
///
/// Every variant signals a programmer-visible contract violation; none of
/// them are transient conditions, and there is no retry or recovery logic
/// anywhere in the crate.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SpatialError {
    /// Box construction with a max that does not exceed min on every axis.
    #[error("invalid bounds: max {max:?} must exceed min {min:?} on every axis")]
    InvalidBounds { min: [f64; 2], max: [f64; 2] },

    /// Decode of a negative curve index.
    #[error("invalid curve index {0}: curve indices are non-negative")]
    InvalidCurveIndex(i64),

    /// Index construction with an order whose curve indices would not fit
    /// the index word.
    #[error("invalid order {order}: maximum supported order is {max}")]
    InvalidOrder { order: u32, max: u32 },

    /// Intersection requested between unlike geometry kinds.
    #[error("unsupported geometry comparison: {left} vs {right}")]
    UnsupportedGeometry {
        left: &'static str,
        right: &'static str,
    },
}

/// Result type for spatial operations.
pub type Result<T> = std::result::Result<T, SpatialError>;
