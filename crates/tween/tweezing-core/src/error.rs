//! Error types for tween construction

/// Everything that can go wrong is detected synchronously while building a tween;
/// ticking never fails.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum TweenError {
    /// Negative or NaN timing
    #[error("Invalid config: {field} must be a non-negative number of milliseconds, got {value}")]
    InvalidConfig { field: &'static str, value: f32 },

    /// A composite tween was asked to animate a leaf value
    #[error("Invalid config: composite tween target must be an array or record, got {kind}")]
    NotStructured { kind: String },
}

impl TweenError {
    /// Get error category for logging/metrics
    #[inline]
    pub fn category(&self) -> &'static str {
        match self {
            Self::InvalidConfig { .. } | Self::NotStructured { .. } => "config",
        }
    }
}

pub type Result<T> = std::result::Result<T, TweenError>;
