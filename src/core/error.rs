use thiserror::Error;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[derive(Error, Debug)]
pub enum DialError {
    /// The gateway answered with a non-success status. The body is kept verbatim.
    #[error("HTTP error {status}: {message}")]
    Http { status: u16, message: String },

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Network error: {message}")]
    Network {
        message: String,
        #[source]
        source: BoxError,
    },

    #[error("Parse error: {message}")]
    Parse {
        message: String,
        #[source]
        source: BoxError,
    },

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// The session backing a transport was already released.
    #[error("Session closed")]
    SessionClosed,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl DialError {
    /// HTTP status code, if the error came from a gateway response.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            DialError::Http { status, .. } => Some(*status),
            _ => None,
        }
    }
}
