use thiserror::Error;

/// Everything that can go wrong during one authenticate + call_kw exchange.
#[derive(Debug, Error)]
pub enum OdooError {
    /// Odoo answered with a non-success HTTP status.
    #[error("Response status code does not indicate success: {status} ({url})")]
    Status {
        status: reqwest::StatusCode,
        url: String,
    },

    /// The HTTP request could not be sent or its body could not be read.
    #[error("network: {0}")]
    Network(#[from] reqwest::Error),

    /// The session could not be opened.
    #[error("{0}")]
    Authentication(String),

    /// The remote method returned a JSON-RPC `error`. Holds the indented
    /// JSON of `error.data`.
    #[error("{0}")]
    Remote(String),

    /// `Args` or `Kwargs` is not valid JSON text.
    #[error("{field} is not valid JSON: {source}")]
    MalformedInput {
        field: &'static str,
        #[source]
        source: serde_json::Error,
    },

    /// A response body was not the JSON envelope Odoo should send.
    #[error("decode: {0}")]
    Decode(#[from] serde_json::Error),

    /// The caller's cancellation token fired before the exchange finished.
    #[error("request was cancelled")]
    Cancelled,

    /// Missing or invalid configuration.
    #[error("Configuration error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, OdooError>;

/// Render an error as its message followed by its chain of causes, one per
/// line.
pub fn report(err: &OdooError) -> String {
    let mut text = err.to_string();
    let mut source = std::error::Error::source(err);
    while let Some(cause) = source {
        text.push_str("\n  caused by: ");
        text.push_str(&cause.to_string());
        source = cause.source();
    }
    text
}
