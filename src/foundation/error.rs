/// Convenience result type used across scrollcal.
pub type ScrollcalResult<T> = Result<T, ScrollcalError>;

/// Top-level error taxonomy.
///
/// Every variant is fatal: generation aborts before any output is written, since a corrupted
/// payload would only surface inside the consuming shader.
#[derive(thiserror::Error, Debug)]
pub enum ScrollcalError {
    /// A value does not fit its declared bit width, or declared geometry is inconsistent.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// Template or header image missing, unreadable, or of unusable dimensions.
    #[error("asset error: {0}")]
    Asset(String),

    /// Text shaping or calendar layout failed.
    #[error("layout error: {0}")]
    Layout(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ScrollcalError {
    /// Build a [`ScrollcalError::Configuration`] value.
    pub fn configuration(msg: impl Into<String>) -> Self {
        Self::Configuration(msg.into())
    }

    /// Build a [`ScrollcalError::Asset`] value.
    pub fn asset(msg: impl Into<String>) -> Self {
        Self::Asset(msg.into())
    }

    /// Build a [`ScrollcalError::Layout`] value.
    pub fn layout(msg: impl Into<String>) -> Self {
        Self::Layout(msg.into())
    }

    /// True for errors caused by values or geometry that break the decode contract.
    pub fn is_configuration(&self) -> bool {
        matches!(self, Self::Configuration(_))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
