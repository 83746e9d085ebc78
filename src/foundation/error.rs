/// Result alias used across the crate.
pub type HalftoneResult<T> = Result<T, HalftoneError>;

/// Error taxonomy for loading, rendering and exporting.
///
/// Every failure is reported at the boundary where it happens; the render loop itself only ever
/// sees validated inputs.
#[derive(thiserror::Error, Debug)]
pub enum HalftoneError {
    /// Render or export requested before an image was loaded (or rendered).
    #[error("not ready: {0}")]
    NotReady(String),

    /// Input bytes are not a decodable image, or the fitted size is degenerate.
    #[error("decode error: {0}")]
    Decode(String),

    /// A parameter failed validation before any drawing started.
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// The raster backend refused the request (e.g. surface too large).
    #[error("render error: {0}")]
    Render(String),

    /// PNG serialization failed.
    #[error("encode error: {0}")]
    Encode(String),

    /// Parameter JSON could not be parsed.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Anything else, usually I/O with attached context.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl HalftoneError {
    /// Build a [`HalftoneError::NotReady`].
    pub fn not_ready(msg: impl Into<String>) -> Self {
        Self::NotReady(msg.into())
    }

    /// Build a [`HalftoneError::Decode`].
    pub fn decode(msg: impl Into<String>) -> Self {
        Self::Decode(msg.into())
    }

    /// Build a [`HalftoneError::InvalidParameter`].
    pub fn invalid_parameter(msg: impl Into<String>) -> Self {
        Self::InvalidParameter(msg.into())
    }

    /// Build a [`HalftoneError::Render`].
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    /// Build a [`HalftoneError::Encode`].
    pub fn encode(msg: impl Into<String>) -> Self {
        Self::Encode(msg.into())
    }

    /// Build a [`HalftoneError::Serde`].
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }

    /// True for [`HalftoneError::NotReady`].
    pub fn is_not_ready(&self) -> bool {
        matches!(self, Self::NotReady(_))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
