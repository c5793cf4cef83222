use thiserror::Error;

/// Errors surfaced by the admin client
///
/// The `Display` text is what a manager shows to the editor.
#[derive(Debug, Error)]
pub enum ClientError {
    /// The request never got an HTTP answer
    #[error("{message}")]
    Transport {
        message: String,
        #[source]
        source: reqwest::Error,
    },

    /// The server answered with a non-2xx status
    #[error("{message}")]
    Api { status: u16, message: String },

    /// The form failed the local checks; nothing was sent
    #[error("{0}")]
    Validation(String),

    /// The server answered 2xx with a body we could not read
    #[error("unexpected response: {0}")]
    Decode(String),
}

impl ClientError {
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Api { status, .. } => Some(*status),
            ClientError::Transport { source, .. } => source.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}
