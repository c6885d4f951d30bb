use crate::quad::StyleError;

#[derive(thiserror::Error, Debug)]
pub enum ShadowError {
    #[error("invalid shadow style: {0}")]
    Style(#[from] StyleError),

    #[error("failed to rasterize shadow background: {0}")]
    Rasterize(Box<dyn std::error::Error + Send + Sync>),
}
