use thiserror::Error;
#[derive(Debug, Error)]
pub enum VizError {
    #[error("malformed input: {reason}")]
    MalformedInput { reason: String },
    #[error("unknown channel: {0}")]
    UnknownChannel(String),
    #[error("missing channel: {0}")]
    MissingChannel(String),
    #[error("failed to render figure: {0}")]
    Render(String),
    #[error("failed to read recording file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to decode audio.wav: {0}")]
    Wav(#[from] hound::Error),
}
impl VizError {
    pub fn malformed(reason: impl Into<String>) -> Self {
        VizError::MalformedInput {
            reason: reason.into(),
        }
    }
}
impl<E: std::error::Error + Send + Sync + 'static> From<plotters::drawing::DrawingAreaErrorKind<E>>
    for VizError
{
    fn from(value: plotters::drawing::DrawingAreaErrorKind<E>) -> Self {
        VizError::Render(format!("{value:?}"))
    }
}
impl From<image::ImageError> for VizError {
    fn from(value: image::ImageError) -> Self {
        VizError::Render(value.to_string())
    }
}
