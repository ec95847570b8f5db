use thiserror::Error;

/// Failures inside the sound layer. None of these reach the user: the public
/// surface logs them and carries on in silence.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum SfxError {
    #[error("audio output is not available in this environment")]
    Unavailable,
    #[error("audio node error: {0}")]
    Node(String),
    #[error("preference storage error: {0}")]
    Storage(String),
    #[error("playback refused: {0}")]
    Playback(String),
}

pub type Result<T, E = SfxError> = std::result::Result<T, E>;
