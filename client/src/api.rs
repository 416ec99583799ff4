use std::fmt;

use gloo_net::http::Request;
use serde::de::DeserializeOwned;

use rollcall_shared::api::QueryParams;

/// Failure of a single JSON request, rendered inline by the region that
/// issued it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    Network(String),
    NotFound,
    Status(u16),
    Decode(String),
}

impl fmt::Display for FetchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FetchError::Network(e) => write!(f, "fetch error: {e}"),
            FetchError::NotFound => f.write_str("HTTP 404"),
            FetchError::Status(status) => write!(f, "HTTP {status}"),
            FetchError::Decode(e) => write!(f, "parse error: {e}"),
        }
    }
}

impl std::error::Error for FetchError {}

pub fn check_status(status: u16) -> Result<(), FetchError> {
    match status {
        200..=299 => Ok(()),
        404 => Err(FetchError::NotFound),
        other => Err(FetchError::Status(other)),
    }
}

/// GET `path` with `query` and decode the JSON body.
pub async fn get_json<T: DeserializeOwned>(path: &str, query: &QueryParams) -> Result<T, FetchError> {
    let resp = Request::get(path)
        .query(query.iter().map(|(key, value)| (*key, value.as_str())))
        .send()
        .await
        .map_err(|e| FetchError::Network(e.to_string()))?;

    check_status(resp.status())?;

    resp.json::<T>()
        .await
        .map_err(|e| FetchError::Decode(e.to_string()))
}

pub async fn get<T: DeserializeOwned>(path: &str) -> Result<T, FetchError> {
    get_json(path, &QueryParams::new()).await
}

pub fn log_failure(region: &str, err: &FetchError) {
    web_sys::console::warn_1(&format!("[{region}] {err}").into());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_classification() {
        assert_eq!(check_status(200), Ok(()));
        assert_eq!(check_status(204), Ok(()));
        assert_eq!(check_status(404), Err(FetchError::NotFound));
        assert_eq!(check_status(500), Err(FetchError::Status(500)));
        assert_eq!(check_status(302), Err(FetchError::Status(302)));
    }

    #[test]
    fn messages_are_short() {
        assert_eq!(FetchError::Status(503).to_string(), "HTTP 503");
        assert_eq!(
            FetchError::Decode("expected value".into()).to_string(),
            "parse error: expected value"
        );
    }
}
