use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Zendesk API error for {endpoint}: {source}")]
    Api {
        endpoint: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Zendesk returned HTTP {status} for {endpoint}")]
    Status { endpoint: String, status: u16 },

    #[error("Invalid date window: {0}")]
    Window(String),

    #[error("Invalid ticket reference: {0}")]
    UrlParse(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Views report error: {0}")]
    Views(String),

    #[error("LLM error: {0}")]
    Llm(String),

    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Wraps a reqwest failure with the endpoint it occurred on.
    pub fn api(endpoint: impl Into<String>, source: reqwest::Error) -> Self {
        Error::Api {
            endpoint: endpoint.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
