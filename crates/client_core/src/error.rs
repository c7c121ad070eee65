use thiserror::Error;

use crate::surface::Element;

pub const INVALID_RESPONSE_STRUCTURE: &str = "Invalid response structure";
pub const INVALID_RESPONSE_DATA: &str = "Invalid response data";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormError {
    #[error("malformed form field '{0}', expected name=value")]
    MalformedField(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmitError {
    #[error("{0}")]
    Network(String),
    #[error("{message}")]
    Http { status: u16, message: String },
    #[error("{0}")]
    Schema(String),
    #[error("missing required display element: {0}")]
    Config(Element),
}

impl SubmitError {
    pub fn invalid_structure() -> Self {
        Self::Schema(INVALID_RESPONSE_STRUCTURE.to_string())
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Self::Network(_) => "network",
            Self::Http { .. } => "http",
            Self::Schema(_) => "schema",
            Self::Config(_) => "config",
        }
    }
}

impl From<reqwest::Error> for SubmitError {
    fn from(value: reqwest::Error) -> Self {
        Self::Network(value.to_string())
    }
}

#[derive(Debug, Error)]
pub enum TransportError {
    #[error("invalid server url '{url}': {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },
}
