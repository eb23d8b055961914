use thiserror::Error;

/// Errors returned by the Supabase REST client.
#[derive(Debug, Error)]
pub enum SupabaseError {
    /// Network or TLS failure from the underlying HTTP client, or a
    /// non-2xx response status.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The configured base URL could not be parsed or joined.
    #[error("invalid backend URL: {0}")]
    InvalidUrl(String),

    /// The response body was not the expected JSON array of rows.
    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },
}
