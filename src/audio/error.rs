use thiserror::Error;

#[derive(Error, Debug)]
pub enum AudioError {
    #[error("audio output disabled")]
    Disabled,

    #[error("output error: {0}")]
    Output(String),

    #[error("failed to fetch {url}: {reason}")]
    Fetch { url: String, reason: String },

    #[error("decoder error: {0}")]
    Decoder(String),

    #[error("seek error: {0}")]
    Seek(String),

    #[error("player channel closed")]
    ChannelClosed,
}

pub type Result<T> = std::result::Result<T, AudioError>;
