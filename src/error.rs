pub type TintmixResult<T> = Result<T, TintmixError>;

#[derive(thiserror::Error, Debug)]
pub enum TintmixError {
    #[error("validation error: {0}")]
    Validation(String),

    #[error("registry error: {0}")]
    Registry(String),

    #[error("render error: {0}")]
    Render(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl TintmixError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn registry(msg: impl Into<String>) -> Self {
        Self::Registry(msg.into())
    }

    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }
}
