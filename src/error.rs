pub type BoothResult<T> = Result<T, BoothError>;

#[derive(thiserror::Error, Debug)]
pub enum BoothError {
    /// Zero or non-finite natural dimensions reached the layout solver.
    /// Aborts card creation before anything is attached.
    #[error("invalid image dimensions: {width}x{height}")]
    InvalidImageDimensions { width: f64, height: f64 },

    #[error("validation error: {0}")]
    Validation(String),

    #[error("animation error: {0}")]
    Animation(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl BoothError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn animation(msg: impl Into<String>) -> Self {
        Self::Animation(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_prefixes_are_stable() {
        assert!(
            BoothError::validation("x")
                .to_string()
                .contains("validation error:")
        );
        assert!(
            BoothError::animation("x")
                .to_string()
                .contains("animation error:")
        );
        assert!(
            BoothError::InvalidImageDimensions {
                width: 0.0,
                height: 120.0
            }
            .to_string()
            .contains("invalid image dimensions")
        );
    }

    #[test]
    fn other_preserves_source() {
        let base = std::io::Error::other("boom");
        let err = BoothError::Other(anyhow::Error::new(base));
        assert!(err.to_string().contains("boom"));
    }
}
