use thiserror::Error;

/// Classified failure of a remote astronomy fetch.
///
/// Each variant maps to a distinct user-facing message; the orchestrator
/// converts all of them into a local-calculation fallback render.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    #[error("API credential rejected")]
    AuthRejected,

    #[error("API quota exceeded")]
    QuotaExceeded,

    #[error("provider rejected the request as malformed")]
    BadRequest,

    #[error("provider returned HTTP {0}")]
    HttpOther(u16),

    #[error("network error: {0}")]
    Network(String),

    #[error("malformed response: {0}")]
    MalformedResponse(String),

    #[error("provider reported unknown phase label: {0}")]
    UnknownPhase(String),
}

#[derive(Error, Debug)]
pub enum MoonError {
    #[error("Unknown phase label: {0}")]
    UnknownPhaseLabel(String),

    #[error("System clock predates the reference new moon")]
    ClockBeforeReference,

    #[error("Fetch error: {0}")]
    Fetch(#[from] FetchError),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Missing API credential: {0}")]
    MissingCredential(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Config parse error: {0}")]
    TomlError(#[from] toml::de::Error),
}

pub type Result<T> = std::result::Result<T, MoonError>;
