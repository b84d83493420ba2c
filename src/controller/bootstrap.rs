use reqwest::Client;
use tracing::debug;

use crate::error::SpectatorError;
use crate::model::wire::CourseDataPayload;

pub const HOLES_PATH: &str = "/api/holes";

/// Fetches the course over plain HTTP so something can be drawn before the
/// socket delivers its own `course_data`.
///
/// # Errors
///
/// Will return `Err` if the request fails, the server answers with a non-2xx
/// status, or the body is not a course payload.
pub async fn fetch_course(base_url: &str) -> Result<CourseDataPayload, SpectatorError> {
    let url = format!("{}{HOLES_PATH}", base_url.trim_end_matches('/'));
    debug!(%url, "fetching course");
    let client = Client::new();
    let resp = client.get(&url).send().await?.error_for_status()?;
    let payload: CourseDataPayload = resp.json().await?;
    Ok(payload)
}

/// Maps a socket base URL onto the matching HTTP base:
/// `ws://host:8000` becomes `http://host:8000`, `wss://` becomes `https://`.
///
/// # Errors
///
/// Will return `Err` if `ws_base` is not a `ws://` or `wss://` URL.
pub fn http_base_from_ws(ws_base: &str) -> Result<String, SpectatorError> {
    if let Some(rest) = ws_base.strip_prefix("wss://") {
        Ok(format!("https://{}", rest.trim_end_matches('/')))
    } else if let Some(rest) = ws_base.strip_prefix("ws://") {
        Ok(format!("http://{}", rest.trim_end_matches('/')))
    } else {
        Err(SpectatorError::Config(format!(
            "server url '{ws_base}' must start with ws:// or wss://"
        )))
    }
}
