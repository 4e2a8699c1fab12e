use thiserror::Error;

#[derive(Debug, Error)]
pub enum SheetsError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("unexpected HTTP status {status} from {url}")]
    UnexpectedStatus { status: u16, url: String },

    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    /// Body parsed as JSON but is not the shape the endpoint promises.
    #[error("unexpected payload shape for {context}: expected {expected}")]
    UnexpectedShape {
        context: String,
        expected: &'static str,
    },

    /// The sheet script answered with an explicit error indicator.
    #[error("spreadsheet API error: {0}")]
    Api(String),

    #[error("invalid endpoint URL \"{url}\": {reason}")]
    InvalidEndpoint { url: String, reason: String },
}
