use thiserror::Error;

pub const FETCH_FAILED_MESSAGE: &str = "Error al cargar las fotos. Por favor, intenta nuevamente.";

/// Why a gallery fetch did not produce photos. Every variant is recovered at
/// the fetcher boundary and surfaced to the visitor as one notice.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    #[error("Network error: {0}")]
    Network(String),
    #[error("HTTP error! status: {status}")]
    Http { status: u16, reason: Option<String> },
    #[error("Request unsuccessful: {}", reason.as_deref().unwrap_or("unknown reason"))]
    Application { reason: Option<String> },
}

impl FetchError {
    pub fn reason(&self) -> Option<&str> {
        match self {
            FetchError::Network(reason) => Some(reason.as_str()),
            FetchError::Http { reason, .. } | FetchError::Application { reason } => {
                reason.as_deref()
            }
        }
    }

    pub fn user_message(&self) -> &'static str {
        FETCH_FAILED_MESSAGE
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StateError {
    #[error("Start index {index} is out of range for {len} photos")]
    StartIndexOutOfRange { index: usize, len: usize },
}
