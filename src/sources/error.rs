use reqwest::{Response, StatusCode};

#[derive(thiserror::Error, Debug)]
pub enum SourceError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("upstream returned {status_code}: {message}")]
    Status { status_code: u16, message: String },
    #[error("unable to decode upstream response: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("upstream reported failure: {0}")]
    Upstream(String),
}

impl SourceError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, SourceError::Status { status_code, .. } if *status_code == StatusCode::NOT_FOUND.as_u16())
    }
}

/// Turn non-2xx responses into [`SourceError::Status`]
pub(crate) async fn ensure_success(response: Response) -> Result<Response, SourceError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    Err(SourceError::Status {
        status_code: status.as_u16(),
        message: response.text().await.unwrap_or_default(),
    })
}
