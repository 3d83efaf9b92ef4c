use reqwest::StatusCode;

/// Failures while talking to the geocoding or forecast endpoints.
///
/// None of these are surfaced to the user as UI state: callers recover
/// locally (clear suggestions, keep the last weather record) and log.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("{service} request failed with status {status}: {body}")]
    Status {
        service: &'static str,
        status: StatusCode,
        body: String,
    },

    #[error("failed to parse {service} JSON: {source}")]
    Parse {
        service: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("forecast response contained no daily data")]
    MissingDaily,
}

impl FetchError {
    pub(crate) fn status(service: &'static str, status: StatusCode, body: &str) -> Self {
        Self::Status {
            service,
            status,
            body: truncate_body(body),
        }
    }

    pub(crate) fn parse(service: &'static str, source: serde_json::Error) -> Self {
        Self::Parse { service, source }
    }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    match body.char_indices().nth(MAX) {
        Some((idx, _)) => format!("{}...", &body[..idx]),
        None => body.to_string(),
    }
}
