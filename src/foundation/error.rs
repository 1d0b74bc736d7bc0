/// Convenience result type used across moji.
pub type MojiResult<T> = Result<T, MojiError>;

/// Top-level error taxonomy surfaced to callers.
#[derive(thiserror::Error, Debug)]
pub enum MojiError {
    /// Invalid caller input or configuration.
    #[error("validation error: {0}")]
    Validation(String),

    /// Asset discovery, fetch or parse failure.
    #[error("load error: {0}")]
    Load(String),

    /// Rasterization or compositing failure.
    #[error("render error: {0}")]
    Render(String),

    /// PNG encoding or vector merge failure.
    #[error("export error: {0}")]
    Export(String),

    /// Operation requires a loaded catalog or a drawn composite.
    #[error("not ready: {0}")]
    NotReady(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl MojiError {
    /// Build a [`MojiError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`MojiError::Load`] value.
    pub fn load(msg: impl Into<String>) -> Self {
        Self::Load(msg.into())
    }

    /// Build a [`MojiError::Render`] value.
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    /// Build a [`MojiError::Export`] value.
    pub fn export(msg: impl Into<String>) -> Self {
        Self::Export(msg.into())
    }

    /// Build a [`MojiError::NotReady`] value.
    pub fn not_ready(msg: impl Into<String>) -> Self {
        Self::NotReady(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
