use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("steps {requested} exceeds the limit of {max}")]
    StepsOutOfRange { requested: usize, max: usize },

    #[error("start price must be finite with magnitude <= 1e12, got {0}")]
    InvalidStartPrice(f64),

    #[error("volatility must be finite and >= 0, got {0}")]
    InvalidVolatility(f64),

    #[error("invalid SMA windows (fast {fast}, slow {slow}): need 0 < fast < slow")]
    InvalidWindow { fast: usize, slow: usize },

    #[error("tick interval must be > 0 ms")]
    InvalidInterval,

    #[error("timestamp out of range at tick {index}")]
    TimestampOverflow { index: usize },

    #[error("price walk left the finite range at tick {index}")]
    NonFinitePrice { index: usize },
}

impl AppError {
    /// Whether the error stems from caller-supplied parameters.
    pub fn is_invalid_input(&self) -> bool {
        !matches!(
            self,
            Self::TimestampOverflow { .. } | Self::NonFinitePrice { .. }
        )
    }
}
