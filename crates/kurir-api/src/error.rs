use thiserror::Error;

/// Errors returned by the delivery-management API client.
///
/// Every variant is terminal for the current report run; nothing is
/// retried automatically.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The API rejected the bearer token (HTTP 401).
    #[error("authentication rejected (HTTP 401); check KURIR_API_TOKEN")]
    Auth,

    /// The API answered with a 5xx status. The caller may prompt the user
    /// to try again, but no automatic retry happens.
    #[error("server error (HTTP {status}); try again later")]
    TransientServer { status: u16 },

    /// The request succeeded but the result set was empty. Distinct from
    /// a network failure so the surface can say "no data for this date".
    #[error("no rows returned for {context}")]
    EmptyResult { context: String },

    /// Network, TLS, or timeout failure from the underlying HTTP client.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The API answered with an unexpected non-2xx status.
    #[error("unexpected API response: {0}")]
    Api(String),

    /// The response body could not be deserialized into the expected shape.
    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },
}
